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

//! Defines the fixed-size, element-typed [`TypedBuffer`].

use super::ResourceError;

/// A contiguous buffer of `T` whose size is fixed at construction.
///
/// The same storage can be addressed linearly with [`item`](Self::item) or as a
/// row-major 2D grid with [`item_2d`](Self::item_2d), where `stride` is the row
/// width. A 1D buffer has `stride == element_count`.
///
/// There is no way to grow or shrink a `TypedBuffer` once it has been created, so
/// producers must know the final element count before allocating.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer<T> {
    data: Vec<T>,
    stride: usize,
}

impl<T: Default + Clone> TypedBuffer<T> {
    /// Allocates a 1D buffer of `size` default-initialized elements.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![T::default(); size],
            stride: size,
        }
    }

    /// Allocates a 2D buffer of `x_size * y_size` default-initialized elements,
    /// with a row stride of `x_size`.
    ///
    /// # Panics
    /// Panics if `x_size * y_size` overflows `usize`, like `vec!` does for a
    /// capacity it cannot allocate.
    pub fn new_2d(x_size: usize, y_size: usize) -> Self {
        let size = x_size.checked_mul(y_size).unwrap_or_else(|| {
            panic!("2D buffer extent {x_size} x {y_size} overflows usize")
        });
        Self {
            data: vec![T::default(); size],
            stride: x_size,
        }
    }
}

impl<T> TypedBuffer<T> {
    /// Returns a mutable reference to the element at linear index `index`.
    ///
    /// # Errors
    /// Returns [`ResourceError::OutOfBounds`] if `index >= element_count()`.
    pub fn item(&mut self, index: usize) -> Result<&mut T, ResourceError> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(ResourceError::OutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at column `x`, row `y`.
    ///
    /// Only the combined offset `y * stride + x` is checked, so an `x` wider than
    /// the stride silently addresses the next row.
    ///
    /// # Errors
    /// Returns [`ResourceError::OutOfBounds`] if the combined offset is out of range,
    /// or [`ResourceError::OffsetOverflow`] if it does not fit in a `usize`.
    pub fn item_2d(&mut self, x: usize, y: usize) -> Result<&mut T, ResourceError> {
        let index = self.linear_index(x, y)?;
        self.item(index)
    }

    /// Returns a shared reference to the element at linear index `index`.
    ///
    /// # Errors
    /// Returns [`ResourceError::OutOfBounds`] if `index >= element_count()`.
    pub fn get(&self, index: usize) -> Result<&T, ResourceError> {
        self.data.get(index).ok_or(ResourceError::OutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    /// Returns a shared reference to the element at column `x`, row `y`.
    ///
    /// # Errors
    /// Same as [`item_2d`](Self::item_2d).
    pub fn get_2d(&self, x: usize, y: usize) -> Result<&T, ResourceError> {
        let index = self.linear_index(x, y)?;
        self.get(index)
    }

    /// The contiguous backing storage.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Total size of the backing storage in bytes.
    pub fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<T>() * self.data.len()
    }

    /// Number of elements in the buffer.
    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// Row width used by 2D addressing.
    pub fn stride(&self) -> usize {
        self.stride
    }

    fn linear_index(&self, x: usize, y: usize) -> Result<usize, ResourceError> {
        y.checked_mul(self.stride)
            .and_then(|row| row.checked_add(x))
            .ok_or(ResourceError::OffsetOverflow {
                x,
                y,
                stride: self.stride,
            })
    }
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Views the storage as raw bytes, ready for a zero-copy GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_1d_has_stride_equal_to_size() {
        let buffer = TypedBuffer::<u32>::new(5);
        assert_eq!(buffer.element_count(), 5);
        assert_eq!(buffer.stride(), 5);
        assert_eq!(buffer.size_in_bytes(), 20);
        assert!(buffer.data().iter().all(|v| *v == 0));
    }

    #[test]
    fn new_2d_allocates_product_of_extents() {
        let buffer = TypedBuffer::<f32>::new_2d(4, 3);
        assert_eq!(buffer.element_count(), 12);
        assert_eq!(buffer.stride(), 4);
        assert_eq!(buffer.size_in_bytes(), 48);
    }

    #[test]
    fn item_writes_are_visible_in_data() {
        let mut buffer = TypedBuffer::<u32>::new(3);
        *buffer.item(0).unwrap() = 10;
        *buffer.item(2).unwrap() = 30;
        assert_eq!(buffer.data(), &[10, 0, 30]);
    }

    #[test]
    fn item_out_of_range_fails() {
        let mut buffer = TypedBuffer::<u32>::new(3);
        assert_eq!(
            buffer.item(3),
            Err(ResourceError::OutOfBounds { index: 3, len: 3 })
        );
        assert!(buffer.get(100).is_err());
    }

    #[test]
    fn item_2d_is_row_major() {
        let mut buffer = TypedBuffer::<u32>::new_2d(3, 2);
        *buffer.item_2d(1, 1).unwrap() = 7;
        assert_eq!(buffer.data()[4], 7);
        assert_eq!(*buffer.get_2d(1, 1).unwrap(), 7);
    }

    #[test]
    fn item_2d_checks_only_the_combined_offset() {
        let mut buffer = TypedBuffer::<u32>::new_2d(3, 2);
        // x = 4 is wider than the stride but lands on row 1, column 1.
        *buffer.item_2d(4, 0).unwrap() = 9;
        assert_eq!(*buffer.get_2d(1, 1).unwrap(), 9);
        assert_eq!(
            buffer.item_2d(0, 2),
            Err(ResourceError::OutOfBounds { index: 6, len: 6 })
        );
    }

    #[test]
    fn overflowing_2d_offset_reports_the_coordinates() {
        let buffer = TypedBuffer::<u8>::new_2d(4, 1);
        assert_eq!(
            buffer.get_2d(0, usize::MAX),
            Err(ResourceError::OffsetOverflow {
                x: 0,
                y: usize::MAX,
                stride: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn new_2d_rejects_overflowing_extent() {
        let _ = TypedBuffer::<u8>::new_2d(usize::MAX, 2);
    }

    #[test]
    fn as_bytes_covers_the_whole_storage() {
        let mut buffer = TypedBuffer::<u32>::new(2);
        *buffer.item(1).unwrap() = 0x0102_0304;
        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len(), buffer.size_in_bytes());
        assert_eq!(&bytes[4..8], &0x0102_0304u32.to_ne_bytes());
    }
}
