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

use std::fs;
use rams_common::MapExtent;
use rams_tilesig::{TileSigConfig, TileSigError, keyfile::*};

const MASTER: &str = "\
Tile T01 master file
Image pixel spacing: 10.0
Index tile pixel spacing: 20.0 m
Subtile size: 40.0
Number of sub-tiles: 2
Subtile 0: A 1000.0 2000.0 1040.0 2040.0
Subtile 1: B 1040.0 2000.0 1080.0 2040.0
";

const FRAMES: &str = "\
RAMS frame key
Frame Index 0: Block 1 Frame 17
Conversion parameters: 1.0 0.0
Radiometric balancing offset: 0.5
Radiometric balancing scale: 0.0
Edge tie number: 0
Frame Index 1: Block 2 Frame 3
Conversion parameters: 10.0 -2.5
Radiometric balancing offset: 1.0 2.0 3.0
Radiometric balancing scale: 0.0 0.0 0.1
Edge tie number: 3
Edge tie spacing: 50.0
Edge ties
1060.0 2020.0 1.5

1050.0 2010.0 2.0 0.5
";

const BLOCKS: &str = "\
Block Index 0: Block1
Radiometric balancing offset: 0.0
Radiometric balancing scale: 0.0
Geometric balancing parameters: 0.0 0.0 1.0 0.0
Block Index 1: Block 2
Geometric balancing parameters: 10.0 -5.0 1.0 0.0
Edge tie number: 1
Edge tie spacing: 20
Edge ties
1000 2000 3
";

#[test]
fn test_parse_master() {
    let master = parse_master( "MASTER.TXT", MASTER).unwrap();
    println!("{master:#?}");

    assert_eq!( (master.image_res, master.index_res, master.tile_size), (10.0, 20.0, 40.0));
    assert_eq!( master.subtiles.len(), 2);
    assert_eq!( master.subtiles[1].name, "B");
    assert_eq!( master.subtiles[1].extent, MapExtent::new( 1040.0, 2000.0, 1080.0, 2040.0));

    let g = master.geometry().unwrap();
    assert_eq!( (g.image_size, g.index_size, g.ratio), (4, 2, 2));
}

#[test]
fn test_master_errors() {
    let no_subs = MASTER.replace("Number of sub-tiles: 2", "Number of sub-tiles: 0");
    assert!( matches!( parse_master( "MASTER.TXT", &no_subs), Err(TileSigError::ConfigurationError(_))));

    let no_count = MASTER.replace("Number of sub-tiles: 2\n", "");
    assert!( matches!( parse_master( "MASTER.TXT", &no_count), Err(TileSigError::ConfigurationError(_))));

    let no_spacing = MASTER.replace("Image pixel spacing: 10.0\n", "");
    assert!( matches!( parse_master( "MASTER.TXT", &no_spacing), Err(TileSigError::ConfigurationError(_))));

    let bad_number = MASTER.replace("Subtile size: 40.0", "Subtile size: forty");
    match parse_master( "MASTER.TXT", &bad_number) {
        Err(TileSigError::KeyFileError(msg)) => {
            println!("{msg}");
            assert!( msg.starts_with("MASTER.TXT:4:"));
        }
        other => panic!("unexpected result {other:?}")
    }

    let short_subtile = MASTER.replace("A 1000.0 2000.0 1040.0 2040.0", "A 1000.0 2000.0");
    assert!( matches!( parse_master( "MASTER.TXT", &short_subtile), Err(TileSigError::KeyFileError(_))));

    // count mismatch is only a warning
    let extra = MASTER.replace("Number of sub-tiles: 2", "Number of sub-tiles: 3");
    assert_eq!( parse_master( "MASTER.TXT", &extra).unwrap().subtiles.len(), 2);
}

#[test]
fn test_parse_frames() {
    let frames = parse_frames( "FRAMES.KEY", FRAMES).unwrap();
    println!("{frames:#?}");
    assert_eq!( frames.len(), 2);

    let f0 = &frames[0];
    assert_eq!( (f0.index, f0.block_id), (0, 1));
    assert_eq!( f0.name, "Block 1 Frame 17");
    assert_eq!( (f0.cnvt_scale, f0.min_pwr), (1.0, 0.0));
    assert_eq!( f0.offset.values(), &[0.5]);
    assert!( f0.edge_ties.is_empty());

    let f1 = &frames[1];
    assert_eq!( (f1.index, f1.block_id), (1, 2));
    assert_eq!( (f1.cnvt_scale, f1.min_pwr), (10.0, -2.5));
    assert_eq!( f1.offset.order(), Some(1));
    assert_eq!( f1.scale.values(), &[0.0, 0.0, 0.1]);

    // declared 3, listed 2: the listed ties win, sorted by x
    assert_eq!( f1.edge_ties.len(), 2);
    assert_eq!( f1.edge_ties.spacing(), 50.0);
    let t = f1.edge_ties.ties()[0];
    assert_eq!( (t.x, t.y, t.target, t.avg), (1050.0, 2010.0, 2.0, 0.5));
    let t = f1.edge_ties.ties()[1];
    assert_eq!( (t.x, t.y, t.target, t.avg), (1060.0, 2020.0, 1.5, 0.0));
}

#[test]
fn test_frame_errors() {
    let no_block = FRAMES.replace("Frame Index 1: Block 2 Frame 3", "Frame Index 1: Frame 3");
    assert!( matches!( parse_frames( "FRAMES.KEY", &no_block), Err(TileSigError::KeyFileError(_))));

    let bad_tie = FRAMES.replace("1060.0 2020.0 1.5", "1060.0 2020.0");
    match parse_frames( "FRAMES.KEY", &bad_tie) {
        Err(TileSigError::KeyFileError(msg)) => assert!( msg.starts_with("FRAMES.KEY:14:")),
        other => panic!("unexpected result {other:?}")
    }

    let bad_conversion = FRAMES.replace("Conversion parameters: 1.0 0.0", "Conversion parameters: 1.0");
    assert!( matches!( parse_frames( "FRAMES.KEY", &bad_conversion), Err(TileSigError::KeyFileError(_))));
}

#[test]
fn test_parse_blocks() {
    let blocks = parse_blocks( "BLOCKS.KEY", BLOCKS).unwrap();
    println!("{blocks:#?}");
    assert_eq!( blocks.len(), 2);

    assert_eq!( (blocks[0].id, blocks[0].name.as_str()), (1, "Block1"));
    assert!( blocks[0].has_radiometric());
    assert_eq!( blocks[0].geometric.values(), &[0.0, 0.0, 1.0, 0.0]);

    assert_eq!( (blocks[1].id, blocks[1].name.as_str()), (2, "Block"));
    assert!( !blocks[1].has_radiometric());
    assert_eq!( blocks[1].geometric.values(), &[10.0, -5.0, 1.0, 0.0]);

    let t = blocks[1].edge_ties.ties()[0];
    assert_eq!( (t.x, t.y, t.target), (1000.0, 2000.0, 3.0));
    assert_eq!( blocks[1].edge_ties.spacing(), 20.0);

    let no_colon = BLOCKS.replace("Block Index 1: Block 2", "Block Index 1 Block 2");
    assert!( matches!( parse_blocks( "BLOCKS.KEY", &no_colon), Err(TileSigError::KeyFileError(_))));
}

#[test]
fn test_load_calibration() {
    let dir = tempfile::tempdir().unwrap();
    let config = TileSigConfig::default().with_root( dir.path());
    fs::create_dir_all( &config.index_dir).unwrap();
    fs::write( config.frames_key_path(), FRAMES).unwrap();
    fs::write( config.blocks_key_path(), BLOCKS).unwrap();
    fs::write( &config.master_file, MASTER).unwrap();

    let model = load_calibration( &config).unwrap();
    assert_eq!( (model.n_frames(), model.n_blocks()), (2, 2));

    let (frame, block) = model.resolve(1).unwrap();
    assert_eq!( frame.name, "Block 2 Frame 3");
    assert_eq!( block.id, 2);

    assert_eq!( load_master( &config.master_file).unwrap().subtiles.len(), 2);

    // a frame referencing a block that does not exist
    fs::write( config.frames_key_path(), FRAMES.replace("Block 2 Frame 3", "Block 9 Frame 3")).unwrap();
    assert!( matches!( load_calibration( &config), Err(TileSigError::ConfigurationError(_))));

    fs::remove_file( config.blocks_key_path()).unwrap();
    assert!( matches!( load_calibration( &config), Err(TileSigError::IOError(_))));
}
