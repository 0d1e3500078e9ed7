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

use rams_common::define_error;

pub type Result<T> = std::result::Result<T, TileSigError>;

define_error!{ pub TileSigError =
    InvalidCoefficients(String) : "invalid coefficients: {0}",
    IndexOutOfRange(usize,usize) : "source index {0} exceeds frame range {1}",
    ConfigurationError(String) : "configuration error: {0}",
    KeyFileError(String) : "key file error: {0}",
    InvalidBuffer(String) : "invalid buffer: {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "config deserialization error: {0}"
}

pub fn invalid_coefficients<S: ToString> (msg: S)->TileSigError {
    TileSigError::InvalidCoefficients(msg.to_string())
}

pub fn config_error<S: ToString> (msg: S)->TileSigError {
    TileSigError::ConfigurationError(msg.to_string())
}

pub fn invalid_buffer<S: ToString> (msg: S)->TileSigError {
    TileSigError::InvalidBuffer(msg.to_string())
}

pub fn key_file_error<S: AsRef<str>> (file: &str, line: usize, msg: S)->TileSigError {
    TileSigError::KeyFileError( format!("{}:{}: {}", file, line, msg.as_ref()))
}
