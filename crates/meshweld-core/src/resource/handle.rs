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

use super::TypedBuffer;
use std::{ops::Deref, sync::Arc};

/// A thread-safe, reference-counted, read-only handle to a filled [`TypedBuffer`].
///
/// Cloning a handle is cheap, as it only increments the reference count
/// and does not duplicate the underlying buffer. Once a buffer is wrapped in a
/// handle it can no longer be mutated, so every holder sees the same contents.
///
/// The buffer is automatically deallocated when the last handle is dropped.
#[derive(Debug)]
pub struct BufferHandle<T>(Arc<TypedBuffer<T>>);

impl<T> BufferHandle<T> {
    /// Creates a new `BufferHandle` that takes ownership of the buffer.
    pub fn new(buffer: TypedBuffer<T>) -> Self {
        Self(Arc::new(buffer))
    }

    /// Returns `true` if both handles point at the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for BufferHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for BufferHandle<T> {
    type Target = TypedBuffer<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_buffer() {
        let mut buffer = TypedBuffer::<u32>::new(2);
        *buffer.item(0).unwrap() = 42;
        let handle = BufferHandle::new(buffer);
        let other = handle.clone();
        assert!(handle.ptr_eq(&other));
        assert_eq!(other.data(), &[42, 0]);
    }
}
