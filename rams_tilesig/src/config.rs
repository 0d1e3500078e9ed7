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

use std::path::{Path,PathBuf};
use serde::{Serialize,Deserialize};
use rams_common::fs::filepath_contents_as_string;

use crate::{errors::Result, pipeline::ScaleOrder, subtile::SampleEncoding};

pub const FRAMES_KEY: &str = "FRAMES.KEY";
pub const BLOCKS_KEY: &str = "BLOCKS.KEY";

/// byte order of 16 bit raw image samples
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    pub fn decode_i16 (&self, bytes: &[u8])->Vec<i16> {
        bytes.chunks_exact(2).map( |b| {
            let b = [b[0], b[1]];
            match self {
                ByteOrder::Big => i16::from_be_bytes(b),
                ByteOrder::Little => i16::from_le_bytes(b),
            }
        }).collect()
    }
}

/// constants of the `round((s0 + offset) * data_scale) - out_offset` output sample encoding
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct Quantization {
    pub offset: f64,
    pub data_scale: f64,
    pub out_offset: i32,
}

impl Default for Quantization {
    fn default()->Self {
        Quantization { offset: 30.0, data_scale: 1638.35, out_offset: 32766 }
    }
}

/// runtime configuration of a tilesig run, normally read from a RON file. Missing fields get their
/// default values. Relative paths are resolved against the tile root directory
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct TileSigConfig {
    pub master_file: PathBuf,
    pub index_dir: PathBuf,
    pub images_dir: PathBuf,
    pub indices_dir: PathBuf,

    pub no_data: i16,
    pub out_null: i16,
    pub index_null: u8,

    pub min_sigma0: f64,
    pub max_sigma0: f64,
    pub quantization: Quantization,

    pub scale_order: ScaleOrder,
    pub input_byte_order: ByteOrder,
}

impl Default for TileSigConfig {
    fn default()->Self {
        TileSigConfig {
            master_file: PathBuf::from("MASTER.TXT"),
            index_dir: PathBuf::from("IMGINDEX.DIR"),
            images_dir: PathBuf::from("IMAGES.DIR"),
            indices_dir: PathBuf::from("INDICES.DIR"),
            no_data: -9999,
            out_null: -32767,
            index_null: 255,
            min_sigma0: -30.0,
            max_sigma0: 10.0,
            quantization: Quantization::default(),
            scale_order: ScaleOrder::default(),
            input_byte_order: ByteOrder::default(),
        }
    }
}

impl TileSigConfig {
    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        let contents = filepath_contents_as_string( &path)?;
        Ok( ron::from_str( contents.as_str())? )
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        Ok( ron::from_str(s)? )
    }

    /// a copy of this config with all relative paths resolved against `root`
    pub fn with_root (&self, root: impl AsRef<Path>)->Self {
        let root = root.as_ref();
        TileSigConfig {
            master_file: root.join( &self.master_file),
            index_dir: root.join( &self.index_dir),
            images_dir: root.join( &self.images_dir),
            indices_dir: root.join( &self.indices_dir),
            ..self.clone()
        }
    }

    pub fn frames_key_path (&self)->PathBuf { self.index_dir.join( FRAMES_KEY) }
    pub fn blocks_key_path (&self)->PathBuf { self.index_dir.join( BLOCKS_KEY) }

    pub fn sample_encoding (&self)->SampleEncoding {
        SampleEncoding {
            no_data: self.no_data,
            out_null: self.out_null,
            min_sigma0: self.min_sigma0,
            max_sigma0: self.max_sigma0,
            quantization: self.quantization,
        }
    }
}
