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

//! output mosaic layout and writers. Subtiles map to disjoint pixel rectangles of the sample and
//! index mosaics, which is what allows writing them concurrently

use std::{fs::{File,OpenOptions}, io::{BufWriter,Seek,SeekFrom,Write}, path::{Path,PathBuf}, sync::Mutex};
use tracing::{debug, info};
use rams_common::{MapExtent, Raster, fs::{ensure_writable_parent_dir, with_appended_extension}, io_error};

use crate::{
    errors::{Result, config_error, invalid_buffer},
    tile::{Subtile, TileGeometry},
};

/// a rectangle in mosaic pixel space (x: column, y: row of upper left corner)
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub fn new (x: usize, y: usize, width: usize, height: usize)->Self {
        PixelRect { x, y, width, height }
    }

    #[inline] pub fn right (&self)->usize { self.x + self.width }
    #[inline] pub fn bottom (&self)->usize { self.y + self.height }

    pub fn fits_into (&self, width: usize, height: usize)->bool {
        self.right() <= width && self.bottom() <= height
    }
}

/// where a subtile goes in the sample and index mosaics
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SubtilePlacement {
    pub image_rect: PixelRect,
    pub index_rect: PixelRect,
}

// pixel offsets are derived from map coordinate differences, round to absorb representation errors
fn pixels (d: f64, res: f64)->usize {
    (d / res).round().max(0.0) as usize
}

/// extent and dimensions of the output mosaics plus the placement of each subtile
#[derive(Debug,Clone)]
pub struct MosaicLayout {
    pub extent: MapExtent,
    pub width: usize,
    pub height: usize,
    pub index_width: usize,
    pub index_height: usize,
    pub placements: Vec<SubtilePlacement>,
}

impl MosaicLayout {
    pub fn new (subtiles: &[Subtile], geometry: &TileGeometry)->Result<Self> {
        let extent = MapExtent::union_all( subtiles.iter().map(|s| &s.extent))
            .ok_or_else( || config_error("no subtiles"))?;

        let width = pixels( extent.width(), geometry.image_res);
        let height = pixels( extent.height(), geometry.image_res);
        let index_width = pixels( extent.width(), geometry.index_res);
        let index_height = pixels( extent.height(), geometry.index_res);

        let placements: Vec<SubtilePlacement> = subtiles.iter().map( |s| {
            let dx = s.extent.min_x - extent.min_x;
            let dy = extent.max_y - s.extent.max_y;
            SubtilePlacement {
                image_rect: PixelRect::new( pixels(dx, geometry.image_res), pixels(dy, geometry.image_res), geometry.image_size, geometry.image_size),
                index_rect: PixelRect::new( pixels(dx, geometry.index_res), pixels(dy, geometry.index_res), geometry.index_size, geometry.index_size),
            }
        }).collect();

        debug!("output extent {:.0} to {:.0} easting, {:.0} to {:.0} northing", extent.min_x, extent.max_x, extent.min_y, extent.max_y);
        debug!("mosaic size {}x{}, index mosaic size {}x{}", width, height, index_width, index_height);

        Ok( MosaicLayout { extent, width, height, index_width, index_height, placements } )
    }
}

/// the capability to place finished subtile buffers into the output mosaics
pub trait MosaicWriter: Send + Sync {
    fn write_samples (&self, rect: &PixelRect, samples: &Raster<i16>)->Result<()>;

    /// writers without index mosaic ignore index buffers
    fn write_indices (&self, rect: &PixelRect, indices: &Raster<u8>)->Result<()>;
}

fn check_rect<T: Copy> (rect: &PixelRect, data: &Raster<T>, width: usize, height: usize)->Result<()> {
    if data.dimensions() != (rect.width, rect.height) {
        Err( invalid_buffer( format!("buffer {:?} does not match rectangle {:?}", data.dimensions(), rect)))
    } else if !rect.fits_into( width, height) {
        Err( invalid_buffer( format!("rectangle {:?} outside of mosaic {}x{}", rect, width, height)))
    } else {
        Ok(())
    }
}

/* #region file mosaic ***********************************************************************************/

/// a raw (headerless, big endian) single band image file
struct MosaicFile {
    path: PathBuf,
    file: Mutex<File>,
    width: usize,
    height: usize,
    sample_size: usize,
}

impl MosaicFile {
    /// create (or truncate) the file and fill it with `fill_row`
    fn create (path: &Path, width: usize, height: usize, fill_row: &[u8])->Result<Self> {
        ensure_writable_parent_dir( path)?;
        let file = OpenOptions::new().read(true).write(true).create(true).truncate(true).open( path)?;
        let sample_size = if width > 0 { fill_row.len() / width } else { 1 };

        {
            let mut w = BufWriter::new( &file);
            for _ in 0..height {
                w.write_all( fill_row)?;
            }
            w.flush()?;
        }

        Ok( MosaicFile { path: path.to_path_buf(), file: Mutex::new(file), width, height, sample_size } )
    }

    fn write_rows<I> (&self, rect: &PixelRect, rows: I)->Result<()> where I: Iterator<Item=Vec<u8>> {
        let mut file = self.file.lock().map_err( |_| io_error!(std::io::ErrorKind::Other, "mosaic file lock poisoned: {:?}", self.path))?;
        for (i,row) in rows.enumerate() {
            let offset = ((rect.y + i) * self.width + rect.x) * self.sample_size;
            file.seek( SeekFrom::Start( offset as u64))?;
            file.write_all( &row)?;
        }
        Ok(())
    }

    fn sync (&self)->Result<()> {
        let file = self.file.lock().map_err( |_| io_error!(std::io::ErrorKind::Other, "mosaic file lock poisoned: {:?}", self.path))?;
        Ok( file.sync_all()? )
    }
}

/// writes sample (16 bit, big endian) and optional index (8 bit) mosaics as raw image files
pub struct FileMosaic {
    samples: MosaicFile,
    indices: Option<MosaicFile>,
}

impl FileMosaic {
    /// create the output files, initialized with `out_null` samples and `index_null` indices
    pub fn create (layout: &MosaicLayout, out_path: impl AsRef<Path>, index_path: Option<&Path>, out_null: i16, index_null: u8)->Result<Self> {
        let out_path = out_path.as_ref();
        info!("preparing output image {:?} ({}x{})", out_path, layout.width, layout.height);

        let fill_row: Vec<u8> = std::iter::repeat_n( out_null.to_be_bytes(), layout.width).flatten().collect();
        let samples = MosaicFile::create( out_path, layout.width, layout.height, &fill_row)?;

        let indices = match index_path {
            Some(path) => {
                info!("preparing index image {:?} ({}x{})", path, layout.index_width, layout.index_height);
                let fill_row = vec![ index_null; layout.index_width];
                Some( MosaicFile::create( path, layout.index_width, layout.index_height, &fill_row)? )
            }
            None => None
        };

        Ok( FileMosaic { samples, indices } )
    }

    pub fn has_index (&self)->bool { self.indices.is_some() }

    /// flush all data to disk
    pub fn finish (&self)->Result<()> {
        self.samples.sync()?;
        if let Some(indices) = &self.indices { indices.sync()?; }
        Ok(())
    }
}

impl MosaicWriter for FileMosaic {
    fn write_samples (&self, rect: &PixelRect, samples: &Raster<i16>)->Result<()> {
        let f = &self.samples;
        check_rect( rect, samples, f.width, f.height)?;
        f.write_rows( rect, samples.rows().map( |row| row.iter().flat_map( |v| v.to_be_bytes()).collect()))
    }

    fn write_indices (&self, rect: &PixelRect, indices: &Raster<u8>)->Result<()> {
        if let Some(f) = &self.indices {
            check_rect( rect, indices, f.width, f.height)?;
            f.write_rows( rect, indices.rows().map( |row| row.to_vec()))
        } else {
            Ok(())
        }
    }
}

/// write the `<path>.h` image header for a raw mosaic file
pub fn write_image_header (path: &Path, width: usize, height: usize, data_type: &str)->Result<()> {
    let hdr_path = with_appended_extension( path, "h");
    let mut w = BufWriter::new( File::create( &hdr_path)?);

    writeln!( w, "#       generated by tilesig")?;
    writeln!( w, "#")?;
    writeln!( w, "Vexcel Image Header")?;
    writeln!( w, "lines   {}", height)?;
    writeln!( w, "pixels  {}", width)?;
    writeln!( w, "banding BIL")?;
    writeln!( w, "bands   1")?;
    writeln!( w, "data    {}", data_type)?;
    writeln!( w, "endian  BIG")?;
    writeln!( w, "file    '{}'", path.display())?;
    w.flush()?;

    Ok(())
}

/// write the `<path>.corners` map extent file for a mosaic
pub fn write_corners (path: &Path, extent: &MapExtent)->Result<()> {
    let corners_path = with_appended_extension( path, "corners");
    let mut w = BufWriter::new( File::create( &corners_path)?);

    writeln!( w, "#       generated by tilesig")?;
    writeln!( w, "#")?;
    writeln!( w, "Vexcel Rectangular XY coordinates")?;
    writeln!( w, "max_x   {:.6}", extent.max_x as f32)?;
    writeln!( w, "max_y   {:.6}", extent.max_y as f32)?;
    writeln!( w, "min_x   {:.6}", extent.min_x as f32)?;
    writeln!( w, "min_y   {:.6}", extent.min_y as f32)?;
    w.flush()?;

    Ok(())
}

/// header and corner files for the sample mosaic and (if any) the index mosaic header
pub fn write_headers (layout: &MosaicLayout, out_path: &Path, index_path: Option<&Path>)->Result<()> {
    write_image_header( out_path, layout.width, layout.height, "short")?;
    write_corners( out_path, &layout.extent)?;

    if let Some(index_path) = index_path {
        write_image_header( index_path, layout.index_width, layout.index_height, "byte")?;
    }
    Ok(())
}

/* #endregion file mosaic */

/* #region memory mosaic *********************************************************************************/

/// an in-memory mosaic, mostly for diagnostics and tests
pub struct MemMosaic {
    pub samples: Mutex<Raster<i16>>,
    pub indices: Mutex<Raster<u8>>,
}

impl MemMosaic {
    pub fn new (layout: &MosaicLayout, out_null: i16, index_null: u8)->Self {
        MemMosaic {
            samples: Mutex::new( Raster::new( layout.width, layout.height, out_null)),
            indices: Mutex::new( Raster::new( layout.index_width, layout.index_height, index_null)),
        }
    }

    pub fn into_rasters (self)->(Raster<i16>,Raster<u8>) {
        let samples = self.samples.into_inner().unwrap_or_else( |e| e.into_inner());
        let indices = self.indices.into_inner().unwrap_or_else( |e| e.into_inner());
        (samples, indices)
    }
}

fn copy_rect<T: Copy> (tgt: &mut Raster<T>, rect: &PixelRect, src: &Raster<T>)->Result<()> {
    check_rect( rect, src, tgt.width(), tgt.height())?;
    for (i,row) in src.rows().enumerate() {
        tgt.row_mut( rect.y + i)[rect.x..rect.right()].copy_from_slice( row);
    }
    Ok(())
}

impl MosaicWriter for MemMosaic {
    fn write_samples (&self, rect: &PixelRect, samples: &Raster<i16>)->Result<()> {
        let mut tgt = self.samples.lock().map_err( |_| invalid_buffer("sample mosaic lock poisoned"))?;
        copy_rect( &mut *tgt, rect, samples)
    }

    fn write_indices (&self, rect: &PixelRect, indices: &Raster<u8>)->Result<()> {
        let mut tgt = self.indices.lock().map_err( |_| invalid_buffer("index mosaic lock poisoned"))?;
        copy_rect( &mut *tgt, rect, indices)
    }
}

/* #endregion memory mosaic */
