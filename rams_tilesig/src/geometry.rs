/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! reversal of the block-to-block geometric adjustment

use crate::{coeffs::CoefficientList, errors::{Result, invalid_coefficients}};

/// the 4 coefficient affine (rotation/scale/translation) adjustment applied to block map coordinates:
/// ```text
///   x' = a + c*x + d*y
///   y' = c*y - d*x - b
/// ```
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeometricAdjustment {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl GeometricAdjustment {
    pub fn new (a: f64, b: f64, c: f64, d: f64)->Self {
        GeometricAdjustment { a, b, c, d }
    }

    pub fn identity ()->Self {
        GeometricAdjustment { a: 0.0, b: 0.0, c: 1.0, d: 0.0 }
    }

    pub fn from_coefficients (coeffs: &CoefficientList)->Result<Self> {
        match coeffs.values() {
            &[a, b, c, d] => Ok( GeometricAdjustment { a, b, c, d } ),
            vs => Err( invalid_coefficients( format!("geometric adjustment needs 4 coefficients, got {}", vs.len())))
        }
    }

    pub fn to_coefficients (&self)->CoefficientList {
        CoefficientList::new( vec![self.a, self.b, self.c, self.d])
    }

    /// apply the adjustment to an unadjusted map coordinate
    pub fn forward (&self, x: f64, y: f64)->(f64,f64) {
        let GeometricAdjustment { a, b, c, d } = *self;
        ( a + c*x + d*y, c*y - d*x - b )
    }

    /// recover the map coordinate prior to the adjustment. Fails if `c` is zero
    pub fn invert (&self, x1: f64, y1: f64)->Result<(f64,f64)> {
        let GeometricAdjustment { a, b, c, d } = *self;
        if c == 0.0 {
            return Err( invalid_coefficients("geometric adjustment with c == 0 is not invertible"))
        }

        let diff = d / c;
        let geo_y = (diff * x1 + y1 - diff * a + b) / (diff * d + c);
        let geo_x = (x1 - a - d * geo_y) / c;

        Ok( (geo_x, geo_y) )
    }
}

/// invert the geometric adjustment given by exactly 4 coefficients (a,b,c,d) at (x1,y1)
pub fn invert_geometric (x1: f64, y1: f64, coeffs: &CoefficientList)->Result<(f64,f64)> {
    GeometricAdjustment::from_coefficients( coeffs)?.invert( x1, y1)
}
