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

//! loading of per-subtile raw image and source-index buffers

use std::{io::ErrorKind, path::{Path,PathBuf}};
use tracing::debug;
use rams_common::{Raster, fs::filepath_contents_exact};

use crate::{
    config::{ByteOrder, TileSigConfig},
    errors::{Result, invalid_buffer},
    tile::{Subtile, TileGeometry},
};

// short files are buffer errors, not IO errors
fn read_buffer (path: &Path, len: usize)->Result<Vec<u8>> {
    filepath_contents_exact( &path, len).map_err( |e| {
        if e.kind() == ErrorKind::UnexpectedEof { invalid_buffer( e.to_string()) } else { e.into() }
    })
}

pub const IMAGE_EXT: &str = "IMG";
pub const INDEX_EXT: &str = "IDX";

/// the capability to provide the raw image and source-index buffers of a subtile
pub trait SubtileSource: Send + Sync {
    fn load (&self, subtile: &Subtile)->Result<(Raster<i16>,Raster<u8>)>;
}

/// reads `<images_dir>/<name>.IMG` (16 bit samples) and `<indices_dir>/<name>.IDX` (8 bit indices)
#[derive(Debug,Clone)]
pub struct DirSubtileSource {
    pub images_dir: PathBuf,
    pub indices_dir: PathBuf,
    pub byte_order: ByteOrder,
    pub image_size: usize,
    pub index_size: usize,
}

impl DirSubtileSource {
    pub fn new (config: &TileSigConfig, geometry: &TileGeometry)->Self {
        DirSubtileSource {
            images_dir: config.images_dir.clone(),
            indices_dir: config.indices_dir.clone(),
            byte_order: config.input_byte_order,
            image_size: geometry.image_size,
            index_size: geometry.index_size,
        }
    }

    pub fn image_path (&self, subtile: &Subtile)->PathBuf {
        self.images_dir.join( format!("{}.{}", subtile.name, IMAGE_EXT))
    }

    pub fn index_path (&self, subtile: &Subtile)->PathBuf {
        self.indices_dir.join( format!("{}.{}", subtile.name, INDEX_EXT))
    }
}

impl SubtileSource for DirSubtileSource {
    fn load (&self, subtile: &Subtile)->Result<(Raster<i16>,Raster<u8>)> {
        let n = self.image_size;
        let path = self.image_path( subtile);
        debug!("reading {:?}", path);
        let bytes = read_buffer( &path, n*n*2)?;
        let image = Raster::from_vec( n, n, self.byte_order.decode_i16( &bytes))
            .map_err( |_| invalid_buffer( format!("{:?} does not hold {}x{} samples", path, n, n)))?;

        let m = self.index_size;
        let path = self.index_path( subtile);
        debug!("reading {:?}", path);
        let bytes = read_buffer( &path, m*m)?;
        let index = Raster::from_vec( m, m, bytes)
            .map_err( |_| invalid_buffer( format!("{:?} does not hold {}x{} indices", path, m, m)))?;

        Ok( (image, index) )
    }
}
