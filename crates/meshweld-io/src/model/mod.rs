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

//! Defines the [`ModelLoader`] and the read-only [`Model`] it produces.
//!
//! Loading runs two passes per shape. The sizing pass counts distinct
//! `(position, normal, texcoord)` index triples and face-vertices so both
//! buffers can be allocated at their final size; the filling pass then walks
//! the faces again in the same order, writing each new triple into the next
//! vertex slot and appending a slot index for every face-vertex.

mod faces;
mod fill;
mod layout;

use crate::{
    settings::base_folder, ModelError, ModelLoadSettings, ModelParser, ObjParser, SourceModel,
};
use meshweld_core::{math::Mat4, BufferHandle, Vertex};
use std::path::{Path, PathBuf};

/// Per-shape vertex buffers, index buffers and texture paths of a loaded model.
///
/// All per-shape sequences are parallel and indexed by shape position. A
/// `Model` is immutable once built; buffers are handed out as shared
/// [`BufferHandle`]s.
#[derive(Debug, Default, Clone)]
pub struct Model {
    vertex_buffers: Vec<BufferHandle<Vertex>>,
    index_buffers: Vec<BufferHandle<u32>>,
    textures: Vec<Option<PathBuf>>,
    shape_names: Vec<String>,
}

impl Model {
    /// Welds an already parsed model.
    ///
    /// `base_folder` is the folder texture names are resolved against, normally
    /// the folder containing the model file.
    ///
    /// # Errors
    /// Returns [`ModelError::CorruptModel`] if a face references attributes or
    /// materials that do not exist, and [`ModelError::IndexOverflow`] if a shape
    /// has more distinct vertices than `u32` indices can address.
    pub fn from_source(source: &SourceModel, base_folder: &Path) -> Result<Self, ModelError> {
        let shape_count = source.shapes.len();
        let mut model = Model {
            vertex_buffers: Vec::with_capacity(shape_count),
            index_buffers: Vec::with_capacity(shape_count),
            textures: Vec::with_capacity(shape_count),
            shape_names: Vec::with_capacity(shape_count),
        };

        for (shape_index, shape) in source.shapes.iter().enumerate() {
            let layout = layout::measure_shape(shape_index, shape)?;
            let filled = fill::fill_shape(shape_index, shape, source, &layout, base_folder)?;

            log::debug!(
                "Shape {shape_index} '{}': {} vertices, {} indices, texture {:?}",
                shape.name,
                layout.vertex_count,
                layout.index_count,
                filled.texture
            );

            model.vertex_buffers.push(BufferHandle::new(filled.vertices));
            model.index_buffers.push(BufferHandle::new(filled.indices));
            model.textures.push(filled.texture);
            model.shape_names.push(shape.name.clone());
        }

        Ok(model)
    }

    /// One vertex buffer per shape.
    pub fn vertex_buffers(&self) -> &[BufferHandle<Vertex>] {
        &self.vertex_buffers
    }

    /// One index buffer per shape; each entry is a slot in the same shape's vertex buffer.
    pub fn index_buffers(&self) -> &[BufferHandle<u32>] {
        &self.index_buffers
    }

    /// One diffuse texture path per shape, `None` when the shape has none.
    pub fn textures(&self) -> &[Option<PathBuf>] {
        &self.textures
    }

    /// One name per shape, as written in the source file.
    pub fn shape_names(&self) -> &[String] {
        &self.shape_names
    }

    /// Number of shapes in the model.
    pub fn shape_count(&self) -> usize {
        self.vertex_buffers.len()
    }

    /// Returns `true` if the model has no shapes.
    pub fn is_empty(&self) -> bool {
        self.vertex_buffers.is_empty()
    }

    /// The model's world transform. No scene hierarchy is modeled, so this is
    /// always the identity.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// Loads model files into [`Model`]s through a [`ModelParser`].
#[derive(Debug, Clone)]
pub struct ModelLoader<P = ObjParser> {
    parser: P,
}

impl ModelLoader<ObjParser> {
    /// Creates a loader that reads OBJ files with the given settings.
    pub fn new(settings: ModelLoadSettings) -> Self {
        Self::with_parser(ObjParser::new(settings))
    }
}

impl Default for ModelLoader<ObjParser> {
    fn default() -> Self {
        Self::new(ModelLoadSettings::default())
    }
}

impl<P: ModelParser> ModelLoader<P> {
    /// Creates a loader around a custom parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// The parser used by this loader.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parses and welds the model at `model_path`.
    ///
    /// Texture names are resolved relative to the model file's folder. Loading is
    /// all-or-nothing: on error no buffers are returned.
    pub fn load(&self, model_path: impl AsRef<Path>) -> Result<Model, ModelError> {
        let model_path = model_path.as_ref();
        let source = self.parser.parse(model_path)?;
        let model = Model::from_source(&source, &base_folder(model_path))?;

        log::info!(
            "Loaded '{}': {} shapes, {} materials",
            model_path.display(),
            model.shape_count(),
            source.materials.len()
        );
        Ok(model)
    }
}
