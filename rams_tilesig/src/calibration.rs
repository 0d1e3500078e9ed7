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

//! the calibration data model: blocks, frames and the source-index lookup

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{
    coeffs::CoefficientList,
    edge_ties::EdgeTieTable,
    errors::{Result, TileSigError, config_error},
};

/// a grand radiometric/geometric calibration unit covering a number of frames
#[derive(Debug,Clone,PartialEq)]
pub struct Block {
    pub id: i32,
    pub name: String,
    pub offset: CoefficientList,
    pub scale: CoefficientList,
    pub geometric: CoefficientList,
    pub edge_ties: EdgeTieTable,
}

impl Block {
    pub fn new (id: i32, name: impl ToString)->Self {
        Block {
            id,
            name: name.to_string(),
            offset: CoefficientList::empty(),
            scale: CoefficientList::empty(),
            geometric: CoefficientList::empty(),
            edge_ties: EdgeTieTable::empty(),
        }
    }

    /// does this block carry a radiometric adjustment. The offset list decides, a scale list without
    /// offset is ignored
    pub fn has_radiometric (&self)->bool {
        !self.offset.is_empty()
    }
}

/// an image acquisition unit within a block. `index` is the value of the source-index pixels it produced
#[derive(Debug,Clone,PartialEq)]
pub struct Frame {
    pub index: usize,
    pub name: String,
    pub block_id: i32,
    pub min_pwr: f64,
    pub cnvt_scale: f64,
    pub offset: CoefficientList,
    pub scale: CoefficientList,
    pub edge_ties: EdgeTieTable,
}

impl Frame {
    pub fn new (index: usize, name: impl ToString, block_id: i32)->Self {
        Frame {
            index,
            name: name.to_string(),
            block_id,
            min_pwr: 0.0,
            cnvt_scale: 1.0,
            offset: CoefficientList::empty(),
            scale: CoefficientList::empty(),
            edge_ties: EdgeTieTable::empty(),
        }
    }

    pub fn has_radiometric (&self)->bool {
        !self.offset.is_empty()
    }
}

/// owns all frames (positioned by their index) and blocks. Frame to block references are resolved
/// once at construction and the model is read-only afterwards
#[derive(Debug,Clone)]
pub struct CalibrationModel {
    frames: Vec<Frame>,
    blocks: Vec<Block>,
    frame_blocks: Vec<usize>, // block position for each frame
}

impl CalibrationModel {

    pub fn new (frames: Vec<Frame>, blocks: Vec<Block>)->Result<Self> {
        let mut block_positions: HashMap<i32,usize> = HashMap::with_capacity( blocks.len());
        for (i,block) in blocks.iter().enumerate() {
            if block_positions.contains_key( &block.id) {
                warn!("duplicate block id {} ({}), using first definition", block.id, block.name);
            } else {
                block_positions.insert( block.id, i);
            }
        }

        let mut frame_blocks = Vec::with_capacity( frames.len());
        for (i,frame) in frames.iter().enumerate() {
            if frame.index != i {
                return Err( config_error( format!("frame '{}' has index {} but position {}", frame.name, frame.index, i)))
            }
            match block_positions.get( &frame.block_id) {
                Some(&pos) => {
                    debug!("assigning block {} to frame {}", frame.block_id, frame.name);
                    frame_blocks.push( pos)
                }
                None => return Err( config_error( format!("block {} of frame '{}' not found", frame.block_id, frame.name)))
            }
        }

        Ok( CalibrationModel { frames, blocks, frame_blocks } )
    }

    #[inline] pub fn n_frames (&self)->usize { self.frames.len() }
    #[inline] pub fn n_blocks (&self)->usize { self.blocks.len() }

    pub fn frames (&self)->&[Frame] { self.frames.as_slice() }
    pub fn blocks (&self)->&[Block] { self.blocks.as_slice() }

    pub fn frame (&self, index: usize)->Option<&Frame> { self.frames.get( index) }

    pub fn block_by_id (&self, id: i32)->Option<&Block> {
        self.blocks.iter().find( |b| b.id == id)
    }

    /// the frame and its owning block for a source-index value
    pub fn resolve (&self, source_index: usize)->Result<(&Frame,&Block)> {
        match self.frames.get( source_index) {
            Some(frame) => Ok( (frame, &self.blocks[ self.frame_blocks[source_index]]) ),
            None => Err( TileSigError::IndexOutOfRange( source_index, self.frames.len()))
        }
    }
}
