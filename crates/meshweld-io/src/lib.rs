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

//! # Meshweld IO
//!
//! Turns face-indexed OBJ/MTL models into per-shape, welded vertex and index
//! buffers ready for upload.
//!
//! Parsing is delegated to a [`ModelParser`] (the default [`ObjParser`] reads
//! OBJ geometry with `obj` and material libraries with `tobj`), which yields a [`SourceModel`]. The [`ModelLoader`] then sizes and
//! fills one vertex buffer and one index buffer per shape, bakes material
//! colors into every vertex, and resolves each shape's diffuse texture path.

#![warn(missing_docs)]

mod error;
mod model;
mod obj_parser;
mod settings;
mod source;

pub use error::*;
pub use model::*;
pub use obj_parser::*;
pub use settings::*;
pub use source::*;
