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

//! edge tie tables and the windowed offset interpolation that smoothes radiometric seams

use rams_common::{abs, pow2, sqrt};

/// a calibration reference point with observed (avg) and target magnitude
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct EdgeTie {
    pub x: f64,
    pub y: f64,
    pub avg: f64,
    pub target: f64,
}

impl EdgeTie {
    pub fn new (x: f64, y: f64, avg: f64, target: f64)->Self {
        EdgeTie { x, y, avg, target }
    }

    #[inline] pub fn delta (&self)->f64 { self.target - self.avg }
}

/// edge ties of a block or frame, kept sorted by ascending x so that offset lookup can bracket
/// the influence window with a binary search
#[derive(Debug,Clone,PartialEq,Default)]
pub struct EdgeTieTable {
    ties: Vec<EdgeTie>,
    spacing: f64,
}

impl EdgeTieTable {
    pub fn new (mut ties: Vec<EdgeTie>, spacing: f64)->Self {
        ties.sort_by( |a,b| a.x.total_cmp(&b.x));
        EdgeTieTable { ties, spacing }
    }

    pub fn empty ()->Self { EdgeTieTable::default() }

    #[inline] pub fn is_empty (&self)->bool { self.ties.is_empty() }
    #[inline] pub fn len (&self)->usize { self.ties.len() }
    #[inline] pub fn spacing (&self)->f64 { self.spacing }
    #[inline] pub fn ties (&self)->&[EdgeTie] { self.ties.as_slice() }

    /// the interpolated tie offset at map coordinate (x,y)
    pub fn offset_at (&self, x: f64, y: f64)->f64 {
        find_offset_at( x, y, &self.ties, self.spacing)
    }
}

/// compute the offset at (x,y) from all ties closer than `spacing`, each weighted linearly by
/// `(spacing - dist) / spacing`. Ties have to be sorted by x. Returns 0 if no tie is in range
pub fn find_offset_at (x: f64, y: f64, ties: &[EdgeTie], spacing: f64)->f64 {
    let mut offset = 0.0;

    // lowest index that can be within the x window
    let x_min = x - spacing;
    let i0 = ties.partition_point( |t| t.x < x_min);

    for tie in &ties[i0..] {
        let dx = tie.x - x;
        if dx > spacing { break } // past the window

        let dy = abs( tie.y - y);
        if dy > spacing { continue }

        let dist = sqrt( pow2(dx) + pow2(dy));
        if dist < spacing {
            offset += tie.delta() * ((spacing - dist) / spacing);
        }
    }

    offset
}
