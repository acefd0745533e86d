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

//! Defines the interleaved vertex record produced by mesh ingestion.

use crate::math::{Color, Vec2, Vec3};

/// One interleaved vertex, laid out as 17 consecutive `f32` values:
/// position (3), normal (3), texture coordinate (2), then the ambient, diffuse
/// and emissive colors (3 each) of the material the vertex was baked from.
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub position: Vec3,
    /// Vertex normal, either from the source or computed from the face.
    pub normal: Vec3,
    /// Texture coordinate, `(0, 0)` when the source has none.
    pub tex_coord: Vec2,
    /// Material ambient color.
    pub ambient: Color,
    /// Material diffuse color.
    pub diffuse: Color,
    /// Material emissive color.
    pub emissive: Color,
}

impl Vertex {
    /// Number of `f32` values in one vertex.
    pub const FLOAT_COUNT: usize = 17;
    /// Size of one vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn layout_is_seventeen_packed_floats() {
        assert_eq!(Vertex::SIZE, Vertex::FLOAT_COUNT * std::mem::size_of::<f32>());
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, normal), 12);
        assert_eq!(offset_of!(Vertex, tex_coord), 24);
        assert_eq!(offset_of!(Vertex, ambient), 32);
        assert_eq!(offset_of!(Vertex, diffuse), 44);
        assert_eq!(offset_of!(Vertex, emissive), 56);
    }

    #[test]
    fn floats_appear_in_declaration_order() {
        let vertex = Vertex {
            position: Vec3::new(1.0, 2.0, 3.0),
            normal: Vec3::new(4.0, 5.0, 6.0),
            tex_coord: Vec2::new(7.0, 8.0),
            ambient: Color::rgb(9.0, 10.0, 11.0),
            diffuse: Color::rgb(12.0, 13.0, 14.0),
            emissive: Color::rgb(15.0, 16.0, 17.0),
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        let expected: Vec<f32> = (1..=17).map(|v| v as f32).collect();
        assert_eq!(floats, expected.as_slice());
    }
}
