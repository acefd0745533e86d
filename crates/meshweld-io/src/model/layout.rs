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

//! Sizing pass: counts how large a shape's buffers must be before any are allocated.

use super::faces::{walk_faces, VertexKey};
use crate::{ModelError, SourceShape};
use ahash::AHashSet;

/// Final buffer sizes of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShapeLayout {
    /// Number of distinct welding keys, i.e. vertex buffer length.
    pub vertex_count: usize,
    /// Number of face-vertices, i.e. index buffer length.
    pub index_count: usize,
}

pub(crate) fn measure_shape(
    shape_index: usize,
    shape: &SourceShape,
) -> Result<ShapeLayout, ModelError> {
    let mut seen = AHashSet::with_capacity(shape.face_vertices.len());
    let mut index_count = 0;

    for face in walk_faces(shape_index, shape) {
        for fv in face?.vertices {
            seen.insert(VertexKey::from(fv));
            index_count += 1;
        }
    }

    let vertex_count = seen.len();
    if u32::try_from(vertex_count).is_err() {
        return Err(ModelError::IndexOverflow {
            shape: shape_index,
            count: vertex_count,
        });
    }

    Ok(ShapeLayout {
        vertex_count,
        index_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaceVertex;

    #[test]
    fn counts_distinct_keys_and_all_corners() {
        let shape = SourceShape {
            name: "quad".to_string(),
            face_vertices: vec![
                FaceVertex::new(0, 0, 0),
                FaceVertex::new(1, 0, 1),
                FaceVertex::new(2, 0, 2),
                FaceVertex::new(0, 0, 0),
                FaceVertex::new(2, 0, 2),
                FaceVertex::new(3, 0, 3),
            ],
            face_arities: vec![3, 3],
            material_ids: vec![None, None],
        };
        let layout = measure_shape(0, &shape).unwrap();
        assert_eq!(
            layout,
            ShapeLayout {
                vertex_count: 4,
                index_count: 6
            }
        );
    }

    #[test]
    fn same_position_with_other_normal_is_distinct() {
        let shape = SourceShape {
            name: String::new(),
            face_vertices: vec![
                FaceVertex::new(0, 0, 0),
                FaceVertex::new(1, 0, 0),
                FaceVertex::new(2, 0, 0),
                FaceVertex::new(0, 1, 0),
                FaceVertex::new(1, 1, 0),
                FaceVertex::new(2, 1, 0),
            ],
            face_arities: vec![3, 3],
            material_ids: vec![None, None],
        };
        assert_eq!(measure_shape(0, &shape).unwrap().vertex_count, 6);
    }

    #[test]
    fn empty_shape_has_empty_layout() {
        let layout = measure_shape(0, &SourceShape::default()).unwrap();
        assert_eq!(layout.vertex_count, 0);
        assert_eq!(layout.index_count, 0);
    }
}
