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

use std::fmt::Debug;

/// a row-major 2D sample matrix, used as container for subtile image and index buffers
#[derive(Debug,Clone,PartialEq)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    data: Vec<T>
}

impl<T> Raster<T> where T: Copy {

    /// create a raster with all samples set to `fill`
    pub fn new (width: usize, height: usize, fill: T)->Self {
        let data = vec![ fill; width*height ];
        Raster{width,height,data}
    }

    /// wrap an existing row-major sample vector. Returns the vector back if its length does not match
    pub fn from_vec (width: usize, height: usize, data: Vec<T>)->Result<Self,Vec<T>> {
        if data.len() == width*height {
            Ok( Raster{width,height,data} )
        } else {
            Err(data)
        }
    }

    pub fn dimensions(&self)->(usize,usize) {
        (self.width, self.height)
    }

    pub fn width(&self)->usize { self.width }
    pub fn height(&self)->usize { self.height }
    pub fn len(&self)->usize { self.data.len() }
    pub fn is_empty(&self)->bool { self.data.is_empty() }

    #[inline(always)]
    pub fn get(&self, x:usize, y: usize)->T { self.data[ y*self.width + x] }

    #[inline(always)]
    pub fn get_checked(&self, x:usize, y: usize)->Option<T> {
        if x < self.width && y < self.height { Some( self.data[ y*self.width + x]) } else { None }
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, v: T) { self.data[ y*self.width + x] = v; }

    pub fn row(&self, y: usize)->&[T] {
        let i0 = y*self.width;
        &self.data[i0..i0+self.width]
    }

    pub fn row_mut(&mut self, y: usize)->&mut [T] {
        let i0 = y*self.width;
        &mut self.data[i0..i0+self.width]
    }

    pub fn rows(&self)->std::slice::Chunks<'_,T> {
        self.data.chunks( self.width.max(1))
    }

    pub fn as_slice(&self)->&[T] { self.data.as_slice() }

    pub fn into_vec(self)->Vec<T> { self.data }
}
