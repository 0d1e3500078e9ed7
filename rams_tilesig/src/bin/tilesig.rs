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

use std::path::PathBuf;
use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use rams_tilesig::{TileRun, TileSigConfig, mosaic::{FileMosaic, write_headers}, source::DirSubtileSource};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "generate original sigma nought values for an entire tile, optionally with a corresponding index mosaic")]
pub struct Args {
    /// output sample mosaic (required unless --point is given)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// optional source-index output mosaic
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// only compute and print sigma nought at the given map point
    #[arg(long, num_args = 2, value_names = ["X","Y"], allow_hyphen_values = true)]
    pub point: Option<Vec<f64>>,

    /// RON config file (relative paths resolve against --root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// tile root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// only check that all dependencies can be loaded
    #[arg(long)]
    pub depend: bool,

    /// increase log level (RUST_LOG takes precedence)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn init_tracing (verbose: u8) {
    let level = match verbose { 0 => "info", 1 => "debug", _ => "trace" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new( level));
    tracing_subscriber::fmt().with_env_filter( filter).init();
}

fn main()->Result<()> {
    let args = Args::parse();
    init_tracing( args.verbose);

    let config = match &args.config {
        Some(path) => TileSigConfig::load( path)?,
        None => TileSigConfig::default()
    }.with_root( &args.root);

    let run = TileRun::load( config)?;
    if args.depend {
        info!("dependencies complete: {}", run.summary());
        return Ok(())
    }

    let source = DirSubtileSource::new( &run.config, &run.geometry);

    if let Some(point) = &args.point {
        let ps = run.sample_point( point[0], point[1], &source)?;
        match ps.sigma0 {
            Some(s0) => println!("sigma0 at {} {}: {:.4} dB (sample {})", ps.x, ps.y, s0, ps.quantized),
            None => println!("no data at {} {}", ps.x, ps.y),
        }
        return Ok(())
    }

    let Some(out) = &args.out else { bail!("no output file specified (--out)") };
    let index = args.index.as_deref();

    let mosaic = FileMosaic::create( &run.layout, out, index, run.encoding.out_null, run.config.index_null)?;
    run.process_all( &source, &mosaic)?;
    mosaic.finish()?;
    write_headers( &run.layout, out, index)?;

    info!("output written to {:?}", out);
    Ok(())
}
