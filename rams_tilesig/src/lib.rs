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

/// recovery of original sigma nought values from radiometrically and geometrically balanced RAMS tile
/// mosaics, by reversing the per-block and per-frame calibration steps for each pixel

mod errors;
pub use errors::{Result, TileSigError};

pub mod coeffs;
pub use coeffs::CoefficientList;

pub mod edge_ties;
pub use edge_ties::{EdgeTie, EdgeTieTable};

pub mod geometry;
pub use geometry::GeometricAdjustment;

pub mod calibration;
pub use calibration::{Block, Frame, CalibrationModel};

pub mod pipeline;
pub use pipeline::{ReversalPipeline, ScaleOrder, PixelSample};

pub mod config;
pub use config::{TileSigConfig, ByteOrder, Quantization};

pub mod tile;
pub use tile::{Subtile, TileGeometry};

pub mod subtile;
pub use subtile::{SampleEncoding, SubtileOutput, SubtileProcessor};

pub mod keyfile;
pub mod mosaic;
pub mod source;

mod run;
pub use run::{TileRun, PointSample};
