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

//! tile and subtile geometry: pixel spacings, buffer sizes and pixel/map coordinate mapping

use rams_common::MapExtent;
use crate::errors::{Result, config_error};

// guards floor() against representation errors of decimal spacings (e.g. 0.1)
const RATIO_EPS: f64 = 1e-9;

fn floor_ratio (a: f64, b: f64)->usize {
    (a / b + RATIO_EPS).floor() as usize
}

/// the spacings and derived buffer dimensions shared by all subtiles of a tile
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TileGeometry {
    /// raw image pixel spacing (map units)
    pub image_res: f64,
    /// source-index pixel spacing (map units)
    pub index_res: f64,
    /// edge length of a square subtile (map units)
    pub tile_size: f64,

    pub image_size: usize,
    pub index_size: usize,
    /// index_res / image_res
    pub ratio: usize,
}

impl TileGeometry {
    pub fn new (image_res: f64, index_res: f64, tile_size: f64)->Result<Self> {
        if !(image_res > 0.0) || !(index_res > 0.0) || !(tile_size > 0.0) {
            return Err( config_error( format!("invalid spacings image: {image_res}, index: {index_res}, subtile: {tile_size}")))
        }

        let image_size = floor_ratio( tile_size, image_res);
        let index_size = floor_ratio( tile_size, index_res);
        let ratio = floor_ratio( index_res, image_res);

        if image_size == 0 || index_size == 0 {
            return Err( config_error( format!("subtile size {tile_size} smaller than pixel spacing")))
        }
        if ratio == 0 {
            return Err( config_error( format!("index spacing {index_res} finer than image spacing {image_res}")))
        }
        if (image_size - 1) / ratio >= index_size {
            return Err( config_error( format!("{index_size}x{index_size} index cells do not cover {image_size}x{image_size} image pixels (ratio {ratio})")))
        }

        Ok( TileGeometry { image_res, index_res, tile_size, image_size, index_size, ratio } )
    }

    /// map coordinate of raw pixel (row,col) within a subtile with given extent
    #[inline]
    pub fn pixel_to_map (&self, extent: &MapExtent, row: usize, col: usize)->(f64,f64) {
        ( extent.min_x + col as f64 * self.image_res, extent.max_y - row as f64 * self.image_res )
    }

    /// raw pixel (row,col) of a map coordinate within a subtile, limited to the buffer bounds
    pub fn map_to_pixel (&self, extent: &MapExtent, x: f64, y: f64)->(usize,usize) {
        let max = self.image_size - 1;
        let row = ((extent.max_y - y) / self.image_res).floor().max(0.0) as usize;
        let col = ((x - extent.min_x) / self.image_res).floor().max(0.0) as usize;
        ( row.min(max), col.min(max) )
    }

    /// (row,col) of the source-index cell covering raw pixel (row,col)
    #[inline]
    pub fn index_cell (&self, row: usize, col: usize)->(usize,usize) {
        ( row / self.ratio, col / self.ratio )
    }
}

/// a fixed size square region of the tile that is processed as one unit
#[derive(Debug,Clone,PartialEq)]
pub struct Subtile {
    pub name: String,
    pub extent: MapExtent,
}

impl Subtile {
    pub fn new (name: impl ToString, extent: MapExtent)->Self {
        Subtile { name: name.to_string(), extent }
    }
}
