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

//! orchestration of a complete tile run: loading the tile description, processing all subtiles in
//! parallel and placing the results into the output mosaics

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    calibration::CalibrationModel,
    config::TileSigConfig,
    errors::{Result, config_error, invalid_buffer},
    keyfile::{load_calibration, load_master},
    mosaic::{MosaicLayout, MosaicWriter, SubtilePlacement},
    pipeline::ReversalPipeline,
    source::SubtileSource,
    subtile::{SampleEncoding, SubtileOutput, SubtileProcessor},
    tile::{Subtile, TileGeometry},
};

/// sigma nought at a single map point
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PointSample {
    pub x: f64,
    pub y: f64,
    /// None if the raw sample at this point has no data
    pub sigma0: Option<f64>,
    pub quantized: i16,
}

/// everything that is needed to process the subtiles of a tile. Built once, read-only afterwards
#[derive(Debug)]
pub struct TileRun {
    pub config: TileSigConfig,
    pub geometry: TileGeometry,
    pub subtiles: Vec<Subtile>,
    pub model: CalibrationModel,
    pub layout: MosaicLayout,
    pub encoding: SampleEncoding,
}

impl TileRun {
    /// read MASTER.TXT, FRAMES.KEY and BLOCKS.KEY as configured
    pub fn load (config: TileSigConfig)->Result<Self> {
        let master = load_master( &config.master_file)?;
        let geometry = master.geometry()?;
        info!("subtile size {}x{} pixels, index {}x{} (ratio {})",
              geometry.image_size, geometry.image_size, geometry.index_size, geometry.index_size, geometry.ratio);

        let model = load_calibration( &config)?;
        TileRun::new( config, geometry, master.subtiles, model)
    }

    pub fn new (config: TileSigConfig, geometry: TileGeometry, subtiles: Vec<Subtile>, model: CalibrationModel)->Result<Self> {
        let layout = MosaicLayout::new( &subtiles, &geometry)?;
        let encoding = config.sample_encoding();
        Ok( TileRun { config, geometry, subtiles, model, layout, encoding } )
    }

    pub fn pipeline (&self)->ReversalPipeline<'_> {
        ReversalPipeline::new( &self.model, self.config.scale_order)
    }

    pub fn processor (&self)->SubtileProcessor<'_> {
        SubtileProcessor::new( self.pipeline(), &self.geometry, &self.encoding)
    }

    pub fn summary (&self)->String {
        format!("{} subtiles, {} frames, {} blocks, mosaic {}x{}",
                self.subtiles.len(), self.model.n_frames(), self.model.n_blocks(), self.layout.width, self.layout.height)
    }

    pub fn process_subtile (&self, subtile: &Subtile, source: &dyn SubtileSource)->Result<SubtileOutput> {
        let (image, indices) = source.load( subtile)?;
        let samples = self.processor().process( subtile, &image, &indices)?;
        Ok( SubtileOutput { name: subtile.name.clone(), samples, indices } )
    }

    fn write_output (&self, output: &SubtileOutput, placement: &SubtilePlacement, writer: &dyn MosaicWriter)->Result<()> {
        writer.write_samples( &placement.image_rect, &output.samples)?;
        writer.write_indices( &placement.index_rect, &output.indices)
    }

    /// process and write all subtiles in parallel. The first error aborts the run
    pub fn process_all (&self, source: &dyn SubtileSource, writer: &dyn MosaicWriter)->Result<()> {
        info!("processing {}", self.summary());

        self.subtiles.par_iter().zip( self.layout.placements.par_iter()).try_for_each( |(subtile, placement)| {
            let output = self.process_subtile( subtile, source)?;
            self.write_output( &output, placement, writer)?;
            info!("{} done", subtile.name);
            Ok(())
        })
    }

    /// the first subtile that contains (x,y)
    pub fn find_subtile (&self, x: f64, y: f64)->Option<&Subtile> {
        self.subtiles.iter().find( |s| s.extent.contains( x, y))
    }

    /// compute sigma nought for a single map point without writing any output
    pub fn sample_point (&self, x: f64, y: f64, source: &dyn SubtileSource)->Result<PointSample> {
        let subtile = self.find_subtile( x, y)
            .ok_or_else( || config_error( format!("point {x},{y} is not inside any subtile")))?;

        let (image, indices) = source.load( subtile)?;
        self.processor().check_buffers( subtile, &image, &indices)?;

        let (row, col) = self.geometry.map_to_pixel( &subtile.extent, x, y);
        let raw = image.get( col, row);
        debug!("point {x},{y} is pixel {col},{row} of {}, raw value {raw}", subtile.name);

        if raw == self.encoding.no_data {
            return Ok( PointSample { x, y, sigma0: None, quantized: self.encoding.out_null } )
        }

        let (i_row, i_col) = self.geometry.index_cell( row, col);
        let source_index = indices.get_checked( i_col, i_row)
            .ok_or_else( || invalid_buffer( format!("{}: no index cell {},{} for pixel {},{}", subtile.name, i_col, i_row, col, row)))?;

        // the raw sample and index come from the enclosing pixel, the calibration is evaluated at the point itself
        let sigma0 = self.pipeline().sigma0( raw as f64, source_index as usize, x, y)?;

        Ok( PointSample { x, y, sigma0: Some(sigma0), quantized: self.encoding.quantize( sigma0) } )
    }
}
