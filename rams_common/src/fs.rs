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

use std::fs::{self,File};
use std::io::{self,Read,ErrorKind};
use std::path::{Path,PathBuf};
use io::ErrorKind::*;

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

/// the pathname `<path>.<ext>`, e.g. to name header files that accompany a raw image
pub fn with_appended_extension (path: impl AsRef<Path>, ext: &str)->PathBuf {
    let mut os = path.as_ref().as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

/// check if the parent dir of a file pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_parent_dir (path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().parent() {
        Some(dir) if !dir.as_os_str().is_empty() => ensure_writable_dir(dir),
        _ => Ok(())
    }
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_contents_as_string (file: &mut File) -> Result<String> {
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    file_contents_as_string( &mut file)
}

/// read exactly `len` bytes from the start of the file at `path`. Shorter files are an `UnexpectedEof` error,
/// trailing bytes are ignored
pub fn filepath_contents_exact <P: AsRef<Path>> (path: &P, len: usize) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut contents = vec![0u8; len];
    file.read_exact( &mut contents).map_err( |e| {
        if e.kind() == UnexpectedEof {
            io_error!(UnexpectedEof, "file {:?} shorter than {} bytes", path.as_ref(), len)
        } else { e }
    })?;
    Ok(contents)
}
