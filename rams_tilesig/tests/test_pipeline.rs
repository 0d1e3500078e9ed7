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

use rams_tilesig::{
    Block, Frame, CalibrationModel, CoefficientList, EdgeTie, EdgeTieTable, GeometricAdjustment,
    ReversalPipeline, ScaleOrder, TileSigError
};

const EPS: f64 = 1e-9;

fn identity_block (id: i32)->Block {
    let mut block = Block::new( id, format!("Block{id}"));
    block.geometric = GeometricAdjustment::identity().to_coefficients();
    block
}

fn single_frame_model (block: Block, frame: Frame)->CalibrationModel {
    CalibrationModel::new( vec![frame], vec![block]).unwrap()
}

fn db (amplitude: f64)->f64 { 10.0 * (amplitude * amplitude).log10() }

#[test]
fn test_block_offset_scenario() {
    let mut block = identity_block(1);
    block.offset = CoefficientList::new( vec![5.0]);
    block.scale = CoefficientList::new( vec![0.0]);
    let model = single_frame_model( block, Frame::new( 0, "Block 1 Frame 0", 1));

    let s0 = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 512000.0, 4100000.0).unwrap();
    println!("sigma0: {s0}");
    assert!( (s0 - db(95.0)).abs() < EPS);
    assert!( (s0 - 39.5545).abs() < 1e-4);
}

#[test]
fn test_identity_round_trip() {
    let mut block = identity_block(1);
    block.offset = CoefficientList::new( vec![0.0]);
    block.scale = CoefficientList::new( vec![0.0]);
    let mut frame = Frame::new( 0, "Block 1", 1);
    frame.offset = CoefficientList::new( vec![0.0, 0.0, 0.0]);
    frame.scale = CoefficientList::new( vec![0.0, 0.0, 0.0]);
    let model = single_frame_model( block, frame);
    let pipeline = ReversalPipeline::new( &model, ScaleOrder::OffsetThenScale);

    for raw in [1.0, 17.0, 100.0, 2500.0, 32767.0] {
        let s0 = pipeline.sigma0( raw, 0, 1000.0, 2000.0).unwrap();
        assert!( (s0 - db(raw)).abs() < EPS, "raw {raw}");
    }
}

#[test]
fn test_scale_orders() {
    let mut frame = Frame::new( 0, "Block 1", 1);
    frame.min_pwr = 10.0;
    frame.cnvt_scale = 2.0;
    let model = single_frame_model( identity_block(1), frame);

    let s0 = ReversalPipeline::new( &model, ScaleOrder::OffsetThenScale).sigma0( 100.0, 0, 0.0, 0.0).unwrap();
    assert!( (s0 - db(45.0)).abs() < EPS);

    let s0 = ReversalPipeline::new( &model, ScaleOrder::ScaleThenOffset).sigma0( 100.0, 0, 0.0, 0.0).unwrap();
    assert!( (s0 - db(40.0)).abs() < EPS);
}

#[test]
fn test_radiometric_scale_is_log10() {
    let mut frame = Frame::new( 0, "Block 1", 1);
    frame.offset = CoefficientList::new( vec![0.0]);
    frame.scale = CoefficientList::new( vec![1.0]);
    let model = single_frame_model( identity_block(1), frame);

    let sample = ReversalPipeline::new( &model, ScaleOrder::default()).reverse( 100.0, 0, 0.0, 0.0).unwrap();
    assert!( (sample.sigma0 - 20.0).abs() < EPS);
}

#[test]
fn test_block_edge_ties_clamp() {
    let mut block = identity_block(1);
    block.edge_ties = EdgeTieTable::new( vec![ EdgeTie::new( 1000.0, 2000.0, 0.0, 3.0)], 10.0);
    let model = single_frame_model( block.clone(), Frame::new( 0, "Block 1", 1));
    let pipeline = ReversalPipeline::new( &model, ScaleOrder::default());

    let s0 = pipeline.sigma0( 100.0, 0, 1000.0, 2000.0).unwrap();
    assert!( (s0 - db(97.0)).abs() < EPS);

    // out of range of the tie
    let s0 = pipeline.sigma0( 100.0, 0, 1100.0, 2000.0).unwrap();
    assert!( (s0 - db(100.0)).abs() < EPS);

    // the edge tie result is clamped to the valid raw range, 0 gives -inf
    block.edge_ties = EdgeTieTable::new( vec![ EdgeTie::new( 1000.0, 2000.0, 0.0, 200.0)], 10.0);
    let model = single_frame_model( block, Frame::new( 0, "Block 1", 1));
    let s0 = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 1000.0, 2000.0).unwrap();
    println!("clamped: {s0}");
    assert!( s0.is_infinite() && s0 < 0.0);
}

#[test]
fn test_frame_ties_use_geo_coordinates() {
    // x' = 1000 + x, so pixel x 2000 is geo x 1000
    let mut block = Block::new( 1, "Block1");
    block.geometric = CoefficientList::new( vec![1000.0, 0.0, 1.0, 0.0]);
    let mut frame = Frame::new( 0, "Block 1", 1);
    frame.edge_ties = EdgeTieTable::new( vec![ EdgeTie::new( 1000.0, 500.0, 1.0, 5.0)], 10.0);
    let model = single_frame_model( block, frame);

    let sample = ReversalPipeline::new( &model, ScaleOrder::default()).reverse( 100.0, 0, 2000.0, 500.0).unwrap();
    println!("{sample:?}");
    assert_eq!( (sample.geo_x, sample.geo_y), (1000.0, 500.0));
    assert!( (sample.sigma0 - db(96.0)).abs() < EPS);
}

#[test]
fn test_index_out_of_range() {
    let model = single_frame_model( identity_block(1), Frame::new( 0, "Block 1", 1));
    let pipeline = ReversalPipeline::new( &model, ScaleOrder::default());

    let res = pipeline.sigma0( 100.0, 1, 0.0, 0.0);
    println!("{res:?}");
    assert!( matches!( res, Err(TileSigError::IndexOutOfRange(1,1))));
    assert!( matches!( pipeline.sigma0( 100.0, 255, 0.0, 0.0), Err(TileSigError::IndexOutOfRange(255,1))));
}

#[test]
fn test_scale_without_offset_is_skipped() {
    let mut block = identity_block(1);
    block.scale = CoefficientList::new( vec![0.5]);
    let mut frame = Frame::new( 0, "Block 1", 1);
    frame.scale = CoefficientList::new( vec![1.0, 2.0, 3.0]);
    assert!( !block.has_radiometric());
    assert!( !frame.has_radiometric());

    let model = single_frame_model( block, frame);
    let s0 = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 0.0, 0.0).unwrap();
    assert!( (s0 - 40.0).abs() < EPS);
}

#[test]
fn test_invalid_block_coefficients() {
    // no geometric adjustment
    let model = single_frame_model( Block::new( 1, "Block1"), Frame::new( 0, "Block 1", 1));
    let res = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 0.0, 0.0);
    assert!( matches!( res, Err(TileSigError::InvalidCoefficients(_))));

    // offset without scale
    let mut block = identity_block(1);
    block.offset = CoefficientList::new( vec![5.0]);
    let model = single_frame_model( block, Frame::new( 0, "Block 1", 1));
    let res = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 0.0, 0.0);
    assert!( matches!( res, Err(TileSigError::InvalidCoefficients(_))));

    // incomplete polynomial
    let mut block = identity_block(1);
    block.offset = CoefficientList::new( vec![0.0, 0.0]);
    block.scale = CoefficientList::new( vec![0.0]);
    let model = single_frame_model( block, Frame::new( 0, "Block 1", 1));
    let res = ReversalPipeline::new( &model, ScaleOrder::default()).sigma0( 100.0, 0, 0.0, 0.0);
    assert!( matches!( res, Err(TileSigError::InvalidCoefficients(_))));
}

#[test]
fn test_model_resolution() {
    let frames = vec![ Frame::new( 0, "Block 2 Frame 0", 2), Frame::new( 1, "Block 1 Frame 1", 1)];
    let mut dup = identity_block(2);
    dup.name = "duplicate".to_string();
    let blocks = vec![ identity_block(1), identity_block(2), dup];

    let model = CalibrationModel::new( frames, blocks).unwrap();
    assert_eq!( model.n_frames(), 2);
    assert_eq!( model.n_blocks(), 3);

    let (frame, block) = model.resolve(0).unwrap();
    assert_eq!( frame.name, "Block 2 Frame 0");
    assert_eq!( block.name, "Block2"); // first definition wins
    assert_eq!( model.resolve(1).unwrap().1.id, 1);
    assert_eq!( model.block_by_id(2).unwrap().name, "Block2");

    let res = CalibrationModel::new( vec![ Frame::new( 0, "Block 7", 7)], vec![ identity_block(1)]);
    assert!( matches!( res, Err(TileSigError::ConfigurationError(_))));

    let res = CalibrationModel::new( vec![ Frame::new( 3, "Block 1", 1)], vec![ identity_block(1)]);
    assert!( matches!( res, Err(TileSigError::ConfigurationError(_))));
}
