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
#![allow(unused)]

use std::path::Path;
use rams_tilesig::{ByteOrder, ScaleOrder, TileSigConfig, TileSigError};

#[test]
fn test_defaults() {
    let config = TileSigConfig::default();
    assert_eq!( config.master_file, Path::new("MASTER.TXT"));
    assert_eq!( config.no_data, -9999);
    assert_eq!( config.out_null, -32767);
    assert_eq!( config.quantization.data_scale, 1638.35);
    assert_eq!( config.scale_order, ScaleOrder::OffsetThenScale);

    let rooted = config.with_root("/data/T01");
    assert_eq!( rooted.frames_key_path(), Path::new("/data/T01/IMGINDEX.DIR/FRAMES.KEY"));
    assert_eq!( rooted.blocks_key_path(), Path::new("/data/T01/IMGINDEX.DIR/BLOCKS.KEY"));
    assert_eq!( rooted.images_dir, Path::new("/data/T01/IMAGES.DIR"));
}

#[test]
fn test_partial_ron() {
    let config = TileSigConfig::from_ron_str( r#"(
        no_data: -1,
        scale_order: ScaleThenOffset,
        input_byte_order: Little,
        quantization: ( data_scale: 1000.0 ),
    )"#).unwrap();
    println!("{config:#?}");

    assert_eq!( config.no_data, -1);
    assert_eq!( config.scale_order, ScaleOrder::ScaleThenOffset);
    assert_eq!( config.input_byte_order, ByteOrder::Little);
    assert_eq!( config.quantization.data_scale, 1000.0);
    assert_eq!( config.quantization.offset, 30.0);
    assert_eq!( config.out_null, -32767);
    assert_eq!( config.images_dir, Path::new("IMAGES.DIR"));
}

#[test]
fn test_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tilesig.ron");
    std::fs::write( &path, "( min_sigma0: -25.0, max_sigma0: 5.0 )").unwrap();

    let config = TileSigConfig::load( &path).unwrap();
    assert_eq!( (config.min_sigma0, config.max_sigma0), (-25.0, 5.0));

    std::fs::write( &path, "( min_sigma0: \"low\" )").unwrap();
    assert!( matches!( TileSigConfig::load( &path), Err(TileSigError::RonError(_))));
    assert!( matches!( TileSigConfig::load( dir.path().join("nope.ron")), Err(TileSigError::IOError(_))));
}

#[test]
fn test_byte_order() {
    let bytes = [0x01u8, 0x02, 0xff, 0xfe];
    assert_eq!( ByteOrder::Big.decode_i16( &bytes), vec![0x0102, -2]);
    assert_eq!( ByteOrder::Little.decode_i16( &bytes), vec![0x0201, -257]);
}
