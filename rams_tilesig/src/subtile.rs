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

//! processing of complete subtile buffers into quantized sigma nought samples

use tracing::{debug, error};
use rams_common::{MinMaxAvg, Raster};

use crate::{
    config::Quantization,
    errors::{Result, invalid_buffer},
    pipeline::ReversalPipeline,
    tile::{Subtile, TileGeometry},
};

/// sentinels, clamp range and quantization of 16 bit output samples
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SampleEncoding {
    /// raw value that marks pixels without data
    pub no_data: i16,
    /// output value for pixels without data
    pub out_null: i16,
    pub min_sigma0: f64,
    pub max_sigma0: f64,
    pub quantization: Quantization,
}

impl SampleEncoding {
    /// clamp sigma nought to the output range and encode it as 16 bit sample.
    /// The upper end of the default range encodes to 32768, which saturates to `i16::MAX`
    pub fn quantize (&self, sigma0: f64)->i16 {
        let s0 = clamp_sigma0( sigma0, self.min_sigma0, self.max_sigma0);
        let q = &self.quantization;
        let v = ((s0 + q.offset) * q.data_scale).round() as i64 - q.out_offset as i64;
        v.clamp( i16::MIN as i64, i16::MAX as i64) as i16
    }

    /// the sigma nought value an encoded sample stands for, None for the null sentinel
    pub fn dequantize (&self, sample: i16)->Option<f64> {
        if sample == self.out_null {
            None
        } else {
            let q = &self.quantization;
            Some( (sample as f64 + q.out_offset as f64) / q.data_scale - q.offset )
        }
    }
}

/// NaN (zero or undefined power) maps to the lower bound
pub fn clamp_sigma0 (s0: f64, min: f64, max: f64)->f64 {
    if s0.is_nan() || s0 < min { min } else if s0 > max { max } else { s0 }
}

/// the finished output of a subtile, ready to be placed into the mosaics
#[derive(Debug,Clone)]
pub struct SubtileOutput {
    pub name: String,
    pub samples: Raster<i16>,
    pub indices: Raster<u8>,
}

/// applies the reversal pipeline to every pixel of a subtile
#[derive(Debug,Clone,Copy)]
pub struct SubtileProcessor<'a> {
    pipeline: ReversalPipeline<'a>,
    geometry: &'a TileGeometry,
    encoding: &'a SampleEncoding,
}

impl<'a> SubtileProcessor<'a> {
    pub fn new (pipeline: ReversalPipeline<'a>, geometry: &'a TileGeometry, encoding: &'a SampleEncoding)->Self {
        SubtileProcessor { pipeline, geometry, encoding }
    }

    pub fn pipeline (&self)->&ReversalPipeline<'a> { &self.pipeline }
    pub fn geometry (&self)->&TileGeometry { self.geometry }
    pub fn encoding (&self)->&SampleEncoding { self.encoding }

    /// check that the buffers have the dimensions of the tile geometry
    pub fn check_buffers (&self, subtile: &Subtile, image: &Raster<i16>, index: &Raster<u8>)->Result<()> {
        let g = self.geometry;
        if image.dimensions() != (g.image_size, g.image_size) {
            return Err( invalid_buffer( format!("{}: image buffer {:?} does not match subtile size {}", subtile.name, image.dimensions(), g.image_size)))
        }
        if index.dimensions() != (g.index_size, g.index_size) {
            return Err( invalid_buffer( format!("{}: index buffer {:?} does not match index size {}", subtile.name, index.dimensions(), g.index_size)))
        }
        Ok(())
    }

    /// compute the quantized sigma nought buffer for a subtile. Any pixel failure aborts the subtile
    pub fn process (&self, subtile: &Subtile, image: &Raster<i16>, index: &Raster<u8>)->Result<Raster<i16>> {
        self.check_buffers( subtile, image, index)?;

        let g = self.geometry;
        let enc = self.encoding;
        let n = g.image_size;
        let mut out = Raster::new( n, n, enc.out_null);
        let mut stats = MinMaxAvg::new();

        for row in 0..n {
            for col in 0..n {
                let raw = image.get( col, row);
                if raw == enc.no_data { continue } // already out_null

                let (i_row, i_col) = g.index_cell( row, col);
                let source_index = index.get_checked( i_col, i_row)
                    .ok_or_else( || invalid_buffer( format!("{}: no index cell {},{} for pixel {},{}", subtile.name, i_col, i_row, col, row)))?;

                let (x, y) = g.pixel_to_map( &subtile.extent, row, col);
                let sigma0 = self.pipeline.sigma0( raw as f64, source_index as usize, x, y).map_err( |e| {
                    error!("{}: pixel {},{} (index cell {},{}) failed: {}", subtile.name, col, row, i_col, i_row, e);
                    e
                })?;

                stats.add( sigma0);
                out.set( col, row, enc.quantize( sigma0));
            }
        }

        if stats.n > 0 {
            debug!("{}: {} pixels, sigma0 min: {:.2}, max: {:.2}, avg: {:.2}", subtile.name, stats.n, stats.min, stats.max, stats.avg);
        } else {
            debug!("{}: no data", subtile.name);
        }

        Ok(out)
    }
}
