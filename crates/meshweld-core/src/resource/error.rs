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

//! Defines the error type for typed buffer access.

use std::fmt;

/// An error related to addressing an element of a [`TypedBuffer`](super::TypedBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    /// An attempt was made to access an element outside the buffer's allocated size.
    OutOfBounds {
        /// The linear index that was requested.
        index: usize,
        /// The number of elements in the buffer.
        len: usize,
    },
    /// A 2D coordinate whose linear offset `y * stride + x` does not fit in a `usize`.
    OffsetOverflow {
        /// The requested column.
        x: usize,
        /// The requested row.
        y: usize,
        /// The row width of the buffer.
        stride: usize,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::OutOfBounds { index, len } => {
                write!(
                    f,
                    "Resource access out of bounds: index {index} in a buffer of {len} elements."
                )
            }
            ResourceError::OffsetOverflow { x, y, stride } => {
                write!(
                    f,
                    "Resource offset overflow: ({x}, {y}) with a row stride of {stride}."
                )
            }
        }
    }
}

impl std::error::Error for ResourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_display() {
        let err = ResourceError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(
            format!("{err}"),
            "Resource access out of bounds: index 7 in a buffer of 3 elements."
        );
    }
}
