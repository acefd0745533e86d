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

//! Face traversal and the welding key shared by both loader passes.
//!
//! Both the sizing pass and the filling pass walk a shape through
//! [`walk_faces`], so slot numbers assigned in one pass always match the other.

use crate::{FaceVertex, ModelError, SourceShape};

/// Identifies a distinct vertex within a shape by its source attribute indices.
///
/// Two face-vertices weld into one slot only when all three indices match;
/// numerically equal attributes stored at different indices stay separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct VertexKey {
    position: u32,
    normal: Option<u32>,
    tex_coord: Option<u32>,
}

impl From<&FaceVertex> for VertexKey {
    fn from(fv: &FaceVertex) -> Self {
        Self {
            position: fv.position,
            normal: fv.normal,
            tex_coord: fv.tex_coord,
        }
    }
}

/// One face of a shape, as yielded by [`walk_faces`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Face<'a> {
    /// Position of the face within its shape.
    pub index: usize,
    /// The face's corners, in winding order.
    pub vertices: &'a [FaceVertex],
    /// The face's material id.
    pub material_id: Option<usize>,
}

/// Iterates the faces of a shape in source order.
///
/// Yields an error, then stops, if the face arities do not exactly cover the
/// shape's face-vertices or a face has no material id entry.
pub(crate) struct FaceWalker<'a> {
    shape_index: usize,
    shape: &'a SourceShape,
    face: usize,
    offset: usize,
    done: bool,
}

pub(crate) fn walk_faces(shape_index: usize, shape: &SourceShape) -> FaceWalker<'_> {
    FaceWalker {
        shape_index,
        shape,
        face: 0,
        offset: 0,
        done: false,
    }
}

impl<'a> FaceWalker<'a> {
    fn fail(&mut self, reason: String) -> Option<Result<Face<'a>, ModelError>> {
        self.done = true;
        Some(Err(ModelError::corrupt(self.shape_index, self.face, reason)))
    }
}

impl<'a> Iterator for FaceWalker<'a> {
    type Item = Result<Face<'a>, ModelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let shape = self.shape;
        let Some(&arity) = shape.face_arities.get(self.face) else {
            self.done = true;
            let leftover = shape.face_vertices.len() - self.offset;
            if leftover > 0 {
                return self.fail(format!("{leftover} face-vertices belong to no face"));
            }
            return None;
        };

        let end = self.offset + arity as usize;
        let Some(vertices) = shape.face_vertices.get(self.offset..end) else {
            let remaining = shape.face_vertices.len() - self.offset;
            return self.fail(format!(
                "face declares {arity} vertices but only {remaining} remain"
            ));
        };
        let Some(&material_id) = shape.material_ids.get(self.face) else {
            return self.fail("face has no material id".to_string());
        };

        let face = Face {
            index: self.face,
            vertices,
            material_id,
        };
        self.face += 1;
        self.offset = end;
        Some(Ok(face))
    }
}
