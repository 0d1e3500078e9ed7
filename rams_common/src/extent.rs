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

use serde::{Serialize,Deserialize};

/// an axis aligned map extent in projected (easting/northing) coordinates
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct MapExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64
}

impl MapExtent {
    pub fn new (min_x: f64, min_y: f64, max_x: f64, max_y: f64)->Self {
        MapExtent{ min_x, min_y, max_x, max_y }
    }

    #[inline] pub fn width (&self)->f64 { self.max_x - self.min_x }
    #[inline] pub fn height (&self)->f64 { self.max_y - self.min_y }

    /// inclusive on all sides
    pub fn contains (&self, x: f64, y: f64)->bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// the smallest extent that covers both self and other
    pub fn union (&self, other: &MapExtent)->MapExtent {
        MapExtent {
            min_x: self.min_x.min( other.min_x),
            min_y: self.min_y.min( other.min_y),
            max_x: self.max_x.max( other.max_x),
            max_y: self.max_y.max( other.max_y)
        }
    }

    /// union of all extents, None if the iterator is empty
    pub fn union_all<'a,I> (extents: I)->Option<MapExtent> where I: IntoIterator<Item=&'a MapExtent> {
        let mut it = extents.into_iter();
        let first = *it.next()?;
        Some( it.fold( first, |acc,e| acc.union(e)) )
    }
}
