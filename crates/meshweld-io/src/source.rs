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

//! Defines the parsed, face-indexed model handed over by a [`ModelParser`].
//!
//! This is the boundary between file-format parsing and vertex welding: a
//! parser produces one shared [`AttributePool`], an ordered list of
//! [`SourceShape`]s whose faces index into that pool, and the material list
//! the faces refer to.

use crate::ModelError;
use meshweld_core::math::{Color, Vec2, Vec3};
use std::path::Path;

/// A trait for types that can parse a model file into a [`SourceModel`].
///
/// Implementors own everything format-specific, including locating companion
/// files such as material libraries. Faces must be triangulated (or at least
/// have three or more vertices each) by the time they reach the loader.
pub trait ModelParser {
    /// Parses the model stored at `path`.
    ///
    /// # Errors
    /// Returns [`ModelError::Parse`] if the file cannot be read or is malformed.
    fn parse(&self, path: &Path) -> Result<SourceModel, ModelError>;
}

/// The flat attribute arrays shared by every shape of a model.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributePool {
    /// Positions as consecutive `x, y, z` triples.
    pub positions: Vec<f32>,
    /// Normals as consecutive `x, y, z` triples.
    pub normals: Vec<f32>,
    /// Texture coordinates as consecutive `u, v` pairs.
    pub tex_coords: Vec<f32>,
}

impl AttributePool {
    /// Returns the position at `index`, or `None` if it lies outside the pool.
    pub fn position(&self, index: u32) -> Option<Vec3> {
        triple(&self.positions, index)
    }

    /// Returns the normal at `index`, or `None` if it lies outside the pool.
    pub fn normal(&self, index: u32) -> Option<Vec3> {
        triple(&self.normals, index)
    }

    /// Returns the texture coordinate at `index`, or `None` if it lies outside the pool.
    pub fn tex_coord(&self, index: u32) -> Option<Vec2> {
        let start = (index as usize).checked_mul(2)?;
        let uv = self.tex_coords.get(start..start.checked_add(2)?)?;
        Some(Vec2::new(uv[0], uv[1]))
    }

    /// Number of complete positions in the pool.
    pub fn position_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of complete normals in the pool.
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    /// Number of complete texture coordinates in the pool.
    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len() / 2
    }
}

fn triple(values: &[f32], index: u32) -> Option<Vec3> {
    let start = (index as usize).checked_mul(3)?;
    let xyz = values.get(start..start.checked_add(3)?)?;
    Some(Vec3::new(xyz[0], xyz[1], xyz[2]))
}

/// One corner of a face, referencing the attribute pool.
///
/// `normal` and `tex_coord` are `None` when the source supplies no index for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVertex {
    /// Index of the position in [`AttributePool::positions`].
    pub position: u32,
    /// Index of the normal in [`AttributePool::normals`], if any.
    pub normal: Option<u32>,
    /// Index of the texture coordinate in [`AttributePool::tex_coords`], if any.
    pub tex_coord: Option<u32>,
}

impl FaceVertex {
    /// Creates a face-vertex that references all three attributes.
    pub const fn new(position: u32, normal: u32, tex_coord: u32) -> Self {
        Self {
            position,
            normal: Some(normal),
            tex_coord: Some(tex_coord),
        }
    }

    /// Creates a face-vertex that only references a position.
    pub const fn position_only(position: u32) -> Self {
        Self {
            position,
            normal: None,
            tex_coord: None,
        }
    }
}

/// A named group of faces, mapped to one vertex/index buffer pair.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceShape {
    /// Shape name as written in the source file.
    pub name: String,
    /// Face-vertices of all faces, face after face.
    pub face_vertices: Vec<FaceVertex>,
    /// Number of face-vertices in each face.
    pub face_arities: Vec<u32>,
    /// Material of each face, as an index into [`SourceModel::materials`].
    pub material_ids: Vec<Option<usize>>,
}

impl SourceShape {
    /// Number of faces in the shape.
    pub fn face_count(&self) -> usize {
        self.face_arities.len()
    }
}

/// The subset of a material that gets baked into vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMaterial {
    /// Material name as written in the material library.
    pub name: String,
    /// Ambient color (`Ka`).
    pub ambient: Color,
    /// Diffuse color (`Kd`).
    pub diffuse: Color,
    /// Emissive color (`Ke`).
    pub emissive: Color,
    /// Diffuse texture file name (`map_Kd`), relative to the model's folder.
    pub diffuse_texture: Option<String>,
}

impl SourceMaterial {
    /// The material used by faces that have none: all colors black, no texture.
    pub const DEFAULT: Self = Self {
        name: String::new(),
        ambient: Color::BLACK,
        diffuse: Color::BLACK,
        emissive: Color::BLACK,
        diffuse_texture: None,
    };

    /// The diffuse texture name, if present and non-empty.
    pub fn diffuse_texture_name(&self) -> Option<&str> {
        self.diffuse_texture
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

impl Default for SourceMaterial {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A fully parsed model: shared attributes, ordered shapes, and materials.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceModel {
    /// Attribute arrays shared by every shape.
    pub attributes: AttributePool,
    /// Shapes in file order.
    pub shapes: Vec<SourceShape>,
    /// Materials referenced by face material ids.
    pub materials: Vec<SourceMaterial>,
}
