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

//! parsers for the line oriented tile description files: MASTER.TXT (tile geometry and subtiles),
//! FRAMES.KEY and BLOCKS.KEY (calibration data)
//!
//! All files consist of `label: values` lines. FRAMES.KEY and BLOCKS.KEY are divided into sections
//! that start with a `Frame Index` or `Block Index` line respectively. Within a section an `Edge ties`
//! line starts the list of `x y target [avg]` tie lines.

use std::path::Path;
use tracing::{debug, info, warn};
use rams_common::{MapExtent, fs::filepath_contents_as_string};

use crate::{
    calibration::{Block, CalibrationModel, Frame},
    coeffs::CoefficientList,
    config::TileSigConfig,
    edge_ties::{EdgeTie, EdgeTieTable},
    errors::{Result, config_error, key_file_error},
    tile::{Subtile, TileGeometry},
};

/* #region line parsing helpers ***************************************************************************/

/// the (trimmed) text after the first ':'
fn values_of (line: &str)->Option<&str> {
    line.split_once(':').map( |(_,v)| v.trim())
}

fn parse_f64 (file: &str, line_no: usize, s: &str)->Result<f64> {
    s.parse::<f64>().map_err( |_| key_file_error( file, line_no, format!("not a number: '{}'", s)))
}

/// the first whitespace separated value after the label
fn first_f64 (file: &str, line_no: usize, line: &str)->Result<f64> {
    match values_of( line).and_then( |v| v.split_whitespace().next()) {
        Some(s) => parse_f64( file, line_no, s),
        None => Err( key_file_error( file, line_no, "missing value"))
    }
}

fn all_f64 (file: &str, line_no: usize, s: &str)->Result<Vec<f64>> {
    s.split_whitespace().map( |v| parse_f64( file, line_no, v)).collect()
}

fn coefficients (file: &str, line_no: usize, line: &str)->Result<CoefficientList> {
    let values = values_of( line).ok_or_else( || key_file_error( file, line_no, "missing ':'"))?;
    Ok( CoefficientList::new( all_f64( file, line_no, values)?) )
}

/// parse the integer id that follows a "Block" keyword, e.g. "Block 12" or "Block12"
fn block_id (file: &str, line_no: usize, after_keyword: &str)->Result<i32> {
    let s = after_keyword.trim_start();
    let end = s.char_indices()
        .find( |&(i,c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map( |(i,_)| i)
        .unwrap_or( s.len());

    s[..end].parse::<i32>().map_err( |_| key_file_error( file, line_no, format!("no block id in '{}'", after_keyword.trim())))
}

/// the text from the "Block" keyword to the end of line, plus the block id that follows the keyword
fn block_ref (file: &str, line_no: usize, s: &str)->Result<(String,i32)> {
    let pos = s.find("Block").ok_or_else( || key_file_error( file, line_no, "missing 'Block' reference"))?;
    let name = s[pos..].trim().to_string();
    let id = block_id( file, line_no, &s[pos+5..])?;
    Ok( (name, id) )
}

/* #endregion line parsing helpers */

/* #region master file ************************************************************************************/

/// tile geometry and subtile definitions from MASTER.TXT
#[derive(Debug,Clone,PartialEq)]
pub struct MasterInfo {
    pub image_res: f64,
    pub index_res: f64,
    pub tile_size: f64,
    pub subtiles: Vec<Subtile>,
}

impl MasterInfo {
    pub fn geometry (&self)->Result<TileGeometry> {
        TileGeometry::new( self.image_res, self.index_res, self.tile_size)
    }
}

pub fn parse_master (file: &str, text: &str)->Result<MasterInfo> {
    let mut image_res: Option<f64> = None;
    let mut index_res: Option<f64> = None;
    let mut tile_size: Option<f64> = None;
    let mut n_subtiles: Option<usize> = None;
    let mut subtiles: Vec<Subtile> = Vec::new();

    for (i,line) in text.lines().enumerate() {
        let line_no = i+1;

        if line.contains("Image pixel spacing") {
            image_res = Some( first_f64( file, line_no, line)?);

        } else if line.contains("Index tile pixel spacing") {
            index_res = Some( first_f64( file, line_no, line)?);

        } else if line.contains("Subtile size") {
            tile_size = Some( first_f64( file, line_no, line)?);

        } else if line.contains("Number of sub-tiles") {
            let n = first_f64( file, line_no, line)?;
            if n < 1.0 { return Err( config_error( format!("no subtiles in {}", file))) }
            n_subtiles = Some( n as usize);

        } else if line.trim_start().starts_with("Subtile") {
            let values = values_of( line).ok_or_else( || key_file_error( file, line_no, "missing ':'"))?;
            let mut it = values.split_whitespace();
            let name = it.next().ok_or_else( || key_file_error( file, line_no, "missing subtile name"))?;
            let coords = all_f64( file, line_no, &it.collect::<Vec<&str>>().join(" "))?;
            if coords.len() < 4 {
                return Err( key_file_error( file, line_no, "subtile needs name min_x min_y max_x max_y"))
            }
            let extent = MapExtent::new( coords[0], coords[1], coords[2], coords[3]);
            debug!("{}: {} {:.0} {:.0} {:.0} {:.0}", subtiles.len(), name, extent.min_x, extent.min_y, extent.max_x, extent.max_y);
            subtiles.push( Subtile::new( name, extent));
        }
    }

    let image_res = image_res.ok_or_else( || config_error( format!("no 'Image pixel spacing' in {}", file)))?;
    let index_res = index_res.ok_or_else( || config_error( format!("no 'Index tile pixel spacing' in {}", file)))?;
    let tile_size = tile_size.ok_or_else( || config_error( format!("no 'Subtile size' in {}", file)))?;

    match n_subtiles {
        None => return Err( config_error( format!("no 'Number of sub-tiles' in {}", file))),
        Some(n) if n != subtiles.len() => warn!("{} declares {} subtiles but defines {}", file, n, subtiles.len()),
        _ => {}
    }
    if subtiles.is_empty() {
        return Err( config_error( format!("no subtiles in {}", file)))
    }

    Ok( MasterInfo { image_res, index_res, tile_size, subtiles } )
}

pub fn load_master (path: impl AsRef<Path>)->Result<MasterInfo> {
    let path = path.as_ref();
    debug!("reading {:?}", path);
    let text = filepath_contents_as_string( &path)?;
    parse_master( &path.to_string_lossy(), &text)
}

/* #endregion master file */

/* #region edge tie sections ******************************************************************************/

/// accumulates the edge tie lines of the current frame or block section
#[derive(Default)]
struct TieCollector {
    declared: Option<usize>,
    spacing: f64,
    ties: Vec<EdgeTie>,
    active: bool,
}

impl TieCollector {
    /// handle edge tie related lines. Returns false if the line is not an edge tie line
    fn accept (&mut self, file: &str, line_no: usize, line: &str)->Result<bool> {
        if line.contains("Edge ties") {
            self.active = true;

        } else if line.contains("Edge tie number") {
            self.declared = Some( first_f64( file, line_no, line)? as usize);

        } else if line.contains("Edge tie spacing") {
            self.spacing = first_f64( file, line_no, line)?;

        } else if self.active && !line.contains(':') {
            if line.trim().len() < 3 { return Ok(true) }

            let vs = all_f64( file, line_no, line)?;
            if vs.len() < 3 {
                return Err( key_file_error( file, line_no, "edge tie needs x y target [avg]"))
            }
            let avg = vs.get(3).copied().unwrap_or(0.0);
            self.ties.push( EdgeTie::new( vs[0], vs[1], avg, vs[2]));

        } else {
            return Ok(false)
        }

        Ok(true)
    }

    fn finish (&mut self, file: &str, owner: &str)->EdgeTieTable {
        let tc = std::mem::take( self);
        if let Some(n) = tc.declared {
            if n != tc.ties.len() {
                warn!("{}: {} declares {} edge ties but lists {}", file, owner, n, tc.ties.len());
            }
        }
        EdgeTieTable::new( tc.ties, tc.spacing)
    }
}

/* #endregion edge tie sections */

/* #region frames *****************************************************************************************/

pub fn parse_frames (file: &str, text: &str)->Result<Vec<Frame>> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut ties = TieCollector::default();

    for (i,line) in text.lines().enumerate() {
        let line_no = i+1;

        if line.contains("Frame Index") {
            if let Some(frame) = frames.last_mut() {
                frame.edge_ties = ties.finish( file, &frame.name);
            }
            let (name, block_id) = block_ref( file, line_no, line)?;
            debug!("  {}", name);
            frames.push( Frame::new( frames.len(), name, block_id));
            continue;
        }

        let Some(frame) = frames.last_mut() else { continue }; // preamble

        if line.contains("Conversion parameters") {
            let vs = all_f64( file, line_no, values_of( line).unwrap_or(""))?;
            if vs.len() < 2 {
                return Err( key_file_error( file, line_no, "conversion parameters need cnvt_scale min_pwr"))
            }
            frame.cnvt_scale = vs[0];
            frame.min_pwr = vs[1];

        } else if line.contains("Radiometric balancing offset") {
            frame.offset = coefficients( file, line_no, line)?;

        } else if line.contains("Radiometric balancing scale") {
            frame.scale = coefficients( file, line_no, line)?;

        } else {
            ties.accept( file, line_no, line)?;
        }
    }

    if let Some(frame) = frames.last_mut() {
        frame.edge_ties = ties.finish( file, &frame.name);
    }

    Ok(frames)
}

pub fn load_frames (path: impl AsRef<Path>)->Result<Vec<Frame>> {
    let path = path.as_ref();
    debug!("reading {:?}", path);
    let text = filepath_contents_as_string( &path)?;
    parse_frames( &path.to_string_lossy(), &text)
}

/* #endregion frames */

/* #region blocks *****************************************************************************************/

pub fn parse_blocks (file: &str, text: &str)->Result<Vec<Block>> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut ties = TieCollector::default();

    for (i,line) in text.lines().enumerate() {
        let line_no = i+1;

        if line.contains("Block Index") {
            if let Some(block) = blocks.last_mut() {
                block.edge_ties = ties.finish( file, &block.name);
            }
            let values = values_of( line).ok_or_else( || key_file_error( file, line_no, "missing ':'"))?;
            let (name, id) = block_ref( file, line_no, values)?;
            let name = name.split_whitespace().next().unwrap_or("Block");
            debug!("  {}", name);
            blocks.push( Block::new( id, name));
            continue;
        }

        let Some(block) = blocks.last_mut() else { continue };

        if line.contains("Radiometric balancing offset") {
            block.offset = coefficients( file, line_no, line)?;

        } else if line.contains("Radiometric balancing scale") {
            block.scale = coefficients( file, line_no, line)?;

        } else if line.contains("Geometric balancing parameters") {
            block.geometric = coefficients( file, line_no, line)?;

        } else {
            ties.accept( file, line_no, line)?;
        }
    }

    if let Some(block) = blocks.last_mut() {
        block.edge_ties = ties.finish( file, &block.name);
    }

    Ok(blocks)
}

pub fn load_blocks (path: impl AsRef<Path>)->Result<Vec<Block>> {
    let path = path.as_ref();
    debug!("reading {:?}", path);
    let text = filepath_contents_as_string( &path)?;
    parse_blocks( &path.to_string_lossy(), &text)
}

/* #endregion blocks */

/// load FRAMES.KEY and BLOCKS.KEY from the configured index dir and build the cross-linked model
pub fn load_calibration (config: &TileSigConfig)->Result<CalibrationModel> {
    let frames = load_frames( config.frames_key_path())?;
    let blocks = load_blocks( config.blocks_key_path())?;
    info!("loaded {} frames and {} blocks", frames.len(), blocks.len());

    CalibrationModel::new( frames, blocks)
}
