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

//! polynomial coefficient lists and the bivariate equation evaluator used by the radiometric
//! balancing adjustments of blocks and frames

use crate::errors::{Result, invalid_coefficients};

/// an immutable, ordered list of bivariate polynomial coefficients.
///
/// Coefficients are stored highest order first. Each order level `k` holds the `k+1` monomials
/// `x^k, x^(k-1)*y, .. y^k`, and the list ends with the constant term.
/// The polynomial order is inferred from the number of coefficients once at construction. Lists
/// with a count that does not describe a complete polynomial are kept (so that configurations can
/// be loaded and reported) but fail on evaluation.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct CoefficientList {
    values: Vec<f64>,
    order: Option<usize>,
}

impl CoefficientList {
    pub fn new (values: Vec<f64>)->Self {
        let order = polynomial_order( values.len());
        CoefficientList { values, order }
    }

    pub fn empty ()->Self {
        CoefficientList { values: Vec::new(), order: None }
    }

    #[inline] pub fn len (&self)->usize { self.values.len() }
    #[inline] pub fn is_empty (&self)->bool { self.values.is_empty() }
    #[inline] pub fn values (&self)->&[f64] { self.values.as_slice() }

    /// the polynomial order, None if the list is empty or has no valid polynomial term count
    #[inline] pub fn order (&self)->Option<usize> { self.order }

    #[inline] pub fn is_polynomial (&self)->bool { self.order.is_some() }

    /// the constant (last) term
    pub fn constant (&self)->Option<f64> { self.values.last().copied() }

    /// evaluate the polynomial at map coordinate (x,y)
    pub fn evaluate (&self, x: f64, y: f64)->Result<f64> {
        let order = match self.order {
            Some(order) => order,
            None => {
                return if self.values.is_empty() {
                    Err( invalid_coefficients("empty list of equation coefficients"))
                } else {
                    Err( invalid_coefficients( format!("{} equation coefficients do not form a polynomial", self.values.len())))
                }
            }
        };

        let mut value = 0.0;
        let mut i = 0;
        for level in (1..=order).rev() {
            for pow_x in (0..=level).rev() {
                let pow_y = level - pow_x;
                value += x.powi(pow_x as i32) * y.powi(pow_y as i32) * self.values[i];
                i += 1;
            }
        }
        value += self.values[i];

        Ok(value)
    }
}

impl From<Vec<f64>> for CoefficientList {
    fn from (values: Vec<f64>)->Self { CoefficientList::new(values) }
}

impl From<&[f64]> for CoefficientList {
    fn from (values: &[f64])->Self { CoefficientList::new(values.to_vec()) }
}

impl FromIterator<f64> for CoefficientList {
    fn from_iter<I: IntoIterator<Item=f64>> (iter: I)->Self { CoefficientList::new( iter.into_iter().collect()) }
}

/// the number of coefficients of a bivariate polynomial of given order as counted by the
/// balancing equation encoding: `order + (order-1) + .. + 1` for the non-constant levels
/// plus `order + 1`
pub fn term_count (order: usize)->usize {
    let mut terms = 0;
    for i in (1..=order).rev() {
        terms += i;
    }
    terms + order + 1
}

/// the smallest order (starting at 1) whose term count reaches `n_coeffs`
pub fn infer_order (n_coeffs: usize)->usize {
    let mut order = 0;
    let mut terms = 0;
    while terms < n_coeffs {
        order += 1;
        terms = term_count( order);
    }
    order
}

/// the polynomial order for a coefficient count, or None if the count leaves the polynomial incomplete.
/// A single coefficient is a constant (order 0)
pub fn polynomial_order (n_coeffs: usize)->Option<usize> {
    match n_coeffs {
        0 => None,
        1 => Some(0),
        n => {
            let order = infer_order( n);
            // evaluation consumes exactly term_count(order) coefficients, a shorter list runs out before the constant term
            if term_count( order) == n { Some(order) } else { None }
        }
    }
}
