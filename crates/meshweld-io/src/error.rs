// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the error type returned by model loading.

use meshweld_core::ResourceError;
use std::path::PathBuf;
use thiserror::Error;

/// An error that aborts loading a model. Loading is all-or-nothing, so no
/// partially filled buffers are ever exposed alongside one of these.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The parser could not read the model or found it structurally invalid.
    #[error("Failed to parse model '{}': {message}", .path.display())]
    Parse {
        /// The model file that failed to parse.
        path: PathBuf,
        /// The parser's diagnostic text.
        message: String,
    },
    /// A face references data that does not exist, such as an attribute index
    /// past the end of the shared pool or an unknown material.
    #[error("Corrupt model data in shape {shape}, face {face}: {reason}")]
    CorruptModel {
        /// Index of the offending shape.
        shape: usize,
        /// Index of the offending face within the shape.
        face: usize,
        /// What was wrong with the face.
        reason: String,
    },
    /// A shape has more distinct vertices than a `u32` index buffer can address.
    #[error("Shape {shape} has {count} distinct vertices, more than 32-bit indices can address")]
    IndexOverflow {
        /// Index of the offending shape.
        shape: usize,
        /// Number of distinct vertices found in the shape.
        count: usize,
    },
    /// A buffer slot was addressed outside its allocated size.
    #[error("Buffer fill failed: {0}")]
    Resource(#[from] ResourceError),
    /// Load settings could not be read or decoded.
    #[error("Invalid model load settings: {0}")]
    Settings(String),
    /// A file other than the model itself could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl ModelError {
    pub(crate) fn corrupt(shape: usize, face: usize, reason: impl Into<String>) -> Self {
        ModelError::CorruptModel {
            shape,
            face,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn parse_error_display_carries_parser_message() {
        let err = ModelError::Parse {
            path: PathBuf::from("models/house.obj"),
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to parse model 'models/house.obj': unexpected token"
        );
    }

    #[test]
    fn corrupt_model_display_carries_context() {
        let err = ModelError::corrupt(2, 5, "position index 99 is out of range");
        assert_eq!(
            format!("{err}"),
            "Corrupt model data in shape 2, face 5: position index 99 is out of range"
        );
    }

    #[test]
    fn resource_error_is_wrapped_as_source() {
        let err: ModelError = ResourceError::OutOfBounds { index: 4, len: 4 }.into();
        assert!(matches!(err, ModelError::Resource(_)));
        assert!(err.source().is_some());
    }
}
