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

//! the per-pixel reversal of block radiometric, block geometric and frame radiometric adjustments

use serde::{Serialize,Deserialize};
use tracing::trace;
use rams_common::{exp10, log10};

use crate::{
    calibration::CalibrationModel,
    coeffs::CoefficientList,
    errors::Result,
    geometry::invert_geometric,
};

/// valid range of raw samples, applied after reversing block edge ties
pub const RAW_MIN: f64 = 0.0;
pub const RAW_MAX: f64 = 32767.0;

/// order in which the frame power conversion parameters are reversed
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum ScaleOrder {
    /// subtract min_pwr, then divide by cnvt_scale
    #[default]
    OffsetThenScale,
    /// divide by cnvt_scale, then subtract min_pwr
    ScaleThenOffset,
}

impl ScaleOrder {
    pub fn reverse_conversion (&self, v: f64, min_pwr: f64, cnvt_scale: f64)->f64 {
        match self {
            ScaleOrder::OffsetThenScale => (v - min_pwr) / cnvt_scale,
            ScaleOrder::ScaleThenOffset => v / cnvt_scale - min_pwr,
        }
    }
}

/// the intermediate and final values of one pixel reversal
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PixelSample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub source_index: usize,
    pub geo_x: f64,
    pub geo_y: f64,
    pub sigma0: f64,
}

/// reverses the calibration chain for single pixels. This only borrows the (read-only) model so
/// instances can be freely shared between worker threads
#[derive(Debug,Clone,Copy)]
pub struct ReversalPipeline<'a> {
    model: &'a CalibrationModel,
    scale_order: ScaleOrder,
}

impl<'a> ReversalPipeline<'a> {
    pub fn new (model: &'a CalibrationModel, scale_order: ScaleOrder)->Self {
        ReversalPipeline { model, scale_order }
    }

    pub fn model (&self)->&'a CalibrationModel { self.model }
    pub fn scale_order (&self)->ScaleOrder { self.scale_order }

    /// sigma nought (dB) for a raw pixel value with given source index at map coordinate (x,y)
    pub fn sigma0 (&self, value: f64, source_index: usize, x: f64, y: f64)->Result<f64> {
        Ok( self.reverse( value, source_index, x, y)?.sigma0 )
    }

    pub fn reverse (&self, value: f64, source_index: usize, x: f64, y: f64)->Result<PixelSample> {
        let (frame, block) = self.model.resolve( source_index)?;
        let mut s0 = value;

        if !block.edge_ties.is_empty() {
            let offset = block.edge_ties.offset_at( x, y);
            s0 = (s0 - offset).clamp( RAW_MIN, RAW_MAX);
            trace!("reversing block edge offset ({offset}): {s0}");
        }

        if block.has_radiometric() {
            s0 = reverse_radiometric( s0, x, y, &block.offset, &block.scale)?;
        }

        let (geo_x, geo_y) = invert_geometric( x, y, &block.geometric)?;
        trace!("reversing geometric adj: ({x:.2},{y:.2})->({geo_x:.2},{geo_y:.2})");

        if !frame.edge_ties.is_empty() {
            let offset = frame.edge_ties.offset_at( geo_x, geo_y);
            s0 -= offset;
            trace!("reversing frame edge offset ({offset}): {s0}");
        }

        if frame.has_radiometric() {
            s0 = reverse_radiometric( s0, geo_x, geo_y, &frame.offset, &frame.scale)?;
        }

        s0 = self.scale_order.reverse_conversion( s0, frame.min_pwr, frame.cnvt_scale);
        trace!("amplitude: {s0}");

        let power = s0 * s0;
        let sigma0 = 10.0 * log10( power);
        trace!("power: {power}, sigma nought: {sigma0}");

        Ok( PixelSample { x, y, value, source_index, geo_x, geo_y, sigma0 } )
    }
}

/// subtract the offset polynomial and divide by the exponentiated (log10 domain) scale polynomial, both at (x,y)
pub fn reverse_radiometric (v: f64, x: f64, y: f64, offset: &CoefficientList, scale: &CoefficientList)->Result<f64> {
    let off = offset.evaluate( x, y)?;
    let v = v - off;
    trace!("reversing offset ({off}): {v}");

    let scl = exp10( scale.evaluate( x, y)?);
    let v = v / scl;
    trace!("reversing scale ({scl}): {v}");

    Ok(v)
}
