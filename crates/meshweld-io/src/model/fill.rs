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

//! Filling pass: writes welded vertices and the triangle-list indices of a shape.

use super::faces::{walk_faces, VertexKey};
use super::layout::ShapeLayout;
use crate::{AttributePool, FaceVertex, ModelError, SourceMaterial, SourceModel, SourceShape};
use ahash::AHashMap;
use meshweld_core::{
    math::{Vec2, Vec3},
    TypedBuffer, Vertex,
};
use std::path::{Path, PathBuf};

static DEFAULT_MATERIAL: SourceMaterial = SourceMaterial::DEFAULT;

/// Everything produced for one shape.
#[derive(Debug)]
pub(crate) struct FilledShape {
    pub vertices: TypedBuffer<Vertex>,
    pub indices: TypedBuffer<u32>,
    pub texture: Option<PathBuf>,
}

/// Fills buffers sized by `layout`, walking faces in the same order as the sizing pass.
pub(crate) fn fill_shape(
    shape_index: usize,
    shape: &SourceShape,
    source: &SourceModel,
    layout: &ShapeLayout,
    base_folder: &Path,
) -> Result<FilledShape, ModelError> {
    let mut vertices = TypedBuffer::<Vertex>::new(layout.vertex_count);
    let mut indices = TypedBuffer::<u32>::new(layout.index_count);
    let mut slots: AHashMap<VertexKey, u32> = AHashMap::with_capacity(layout.vertex_count);
    let mut next_index = 0;
    let mut first_material = None;

    for face in walk_faces(shape_index, shape) {
        let face = face?;
        let corrupt = |reason: String| ModelError::corrupt(shape_index, face.index, reason);

        let material = material_for(&source.materials, face.material_id).map_err(corrupt)?;
        if face.index == 0 {
            first_material = Some(material);
        }

        // Corners with their own normal ignore this; the rest share it.
        let face_normal = match face.vertices.first() {
            Some(first) if first.normal.is_none() => {
                compute_face_normal(&source.attributes, face.vertices).map_err(corrupt)?
            }
            _ => Vec3::ZERO,
        };

        for fv in face.vertices {
            let key = VertexKey::from(fv);
            let slot = match slots.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = slots.len() as u32;
                    *vertices.item(slot as usize)? =
                        bake_vertex(&source.attributes, fv, face_normal, material)
                            .map_err(corrupt)?;
                    slots.insert(key, slot);
                    slot
                }
            };
            *indices.item(next_index)? = slot;
            next_index += 1;
        }
    }

    debug_assert_eq!(slots.len(), layout.vertex_count);
    debug_assert_eq!(next_index, layout.index_count);

    let texture = first_material
        .and_then(SourceMaterial::diffuse_texture_name)
        .map(|name| base_folder.join(name));

    Ok(FilledShape {
        vertices,
        indices,
        texture,
    })
}

/// Looks up a face's material; faces without one use [`SourceMaterial::DEFAULT`].
fn material_for(
    materials: &[SourceMaterial],
    material_id: Option<usize>,
) -> Result<&SourceMaterial, String> {
    match material_id {
        None => Ok(&DEFAULT_MATERIAL),
        Some(id) => materials.get(id).ok_or_else(|| {
            format!(
                "material id {id} is out of range ({} materials)",
                materials.len()
            )
        }),
    }
}

/// Computes `normalize(cross(b - a, c - a))` from the face's first three corners.
///
/// A degenerate face yields [`Vec3::ZERO`].
pub(crate) fn compute_face_normal(
    attributes: &AttributePool,
    corners: &[FaceVertex],
) -> Result<Vec3, String> {
    let [a, b, c, ..] = corners else {
        return Err(format!(
            "cannot compute a normal for a face with {} vertices",
            corners.len()
        ));
    };
    let a = position(attributes, a)?;
    let b = position(attributes, b)?;
    let c = position(attributes, c)?;
    Ok((b - a).cross(c - a).normalize())
}

fn position(attributes: &AttributePool, fv: &FaceVertex) -> Result<Vec3, String> {
    attributes.position(fv.position).ok_or_else(|| {
        format!(
            "position index {} is out of range ({} positions)",
            fv.position,
            attributes.position_count()
        )
    })
}

fn bake_vertex(
    attributes: &AttributePool,
    fv: &FaceVertex,
    face_normal: Vec3,
    material: &SourceMaterial,
) -> Result<Vertex, String> {
    let normal = match fv.normal {
        None => face_normal,
        Some(index) => attributes.normal(index).ok_or_else(|| {
            format!(
                "normal index {index} is out of range ({} normals)",
                attributes.normal_count()
            )
        })?,
    };
    let tex_coord = match fv.tex_coord {
        None => Vec2::ZERO,
        Some(index) => attributes.tex_coord(index).ok_or_else(|| {
            format!(
                "texture coordinate index {index} is out of range ({} texture coordinates)",
                attributes.tex_coord_count()
            )
        })?,
    };

    Ok(Vertex {
        position: position(attributes, fv)?,
        normal,
        tex_coord,
        ambient: material.ambient,
        diffuse: material.diffuse,
        emissive: material.emissive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::layout::measure_shape;
    use meshweld_core::math::{approx_eq, Color};

    fn triangle_pool() -> AttributePool {
        AttributePool {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 1.0, 0.0],
            tex_coords: vec![0.5, 0.5],
        }
    }

    fn fill(source: &SourceModel) -> Result<FilledShape, ModelError> {
        let shape = &source.shapes[0];
        let layout = measure_shape(0, shape)?;
        fill_shape(0, shape, source, &layout, Path::new("/models"))
    }

    #[test]
    fn face_normal_is_unit_cross_product() {
        let corners = [
            FaceVertex::position_only(0),
            FaceVertex::position_only(1),
            FaceVertex::position_only(2),
        ];
        let normal = compute_face_normal(&triangle_pool(), &corners).unwrap();
        assert_eq!(normal, Vec3::Z);
    }

    #[test]
    fn degenerate_face_normal_is_zero() {
        let corners = [
            FaceVertex::position_only(0),
            FaceVertex::position_only(0),
            FaceVertex::position_only(1),
        ];
        assert_eq!(
            compute_face_normal(&triangle_pool(), &corners).unwrap(),
            Vec3::ZERO
        );
    }

    #[test]
    fn face_normal_needs_three_corners() {
        let corners = [FaceVertex::position_only(0), FaceVertex::position_only(1)];
        assert!(compute_face_normal(&triangle_pool(), &corners).is_err());
    }

    #[test]
    fn corners_with_their_own_normal_keep_it() {
        // First corner lacks a normal, so the face normal is computed; the
        // second corner carries an explicit normal and must keep it.
        let source = SourceModel {
            attributes: triangle_pool(),
            shapes: vec![SourceShape {
                name: "mixed".to_string(),
                face_vertices: vec![
                    FaceVertex::position_only(0),
                    FaceVertex {
                        position: 1,
                        normal: Some(0),
                        tex_coord: None,
                    },
                    FaceVertex::position_only(2),
                ],
                face_arities: vec![3],
                material_ids: vec![None],
            }],
            materials: vec![],
        };
        let filled = fill(&source).unwrap();
        let data = filled.vertices.data();
        assert_eq!(data[0].normal, Vec3::Z);
        assert_eq!(data[1].normal, Vec3::Y);
        assert_eq!(data[2].normal, Vec3::Z);
        assert!(approx_eq(data[0].normal.length(), 1.0));
    }

    #[test]
    fn missing_first_normal_only_decides_the_fallback() {
        // First corner has a normal, so no face normal is computed and a later
        // corner without one gets a zero normal.
        let source = SourceModel {
            attributes: triangle_pool(),
            shapes: vec![SourceShape {
                name: String::new(),
                face_vertices: vec![
                    FaceVertex {
                        position: 0,
                        normal: Some(0),
                        tex_coord: None,
                    },
                    FaceVertex::position_only(1),
                    FaceVertex::position_only(2),
                ],
                face_arities: vec![3],
                material_ids: vec![None],
            }],
            materials: vec![],
        };
        let filled = fill(&source).unwrap();
        assert_eq!(filled.vertices.data()[1].normal, Vec3::ZERO);
    }

    #[test]
    fn faces_without_material_bake_black_and_have_no_texture() {
        let source = SourceModel {
            attributes: triangle_pool(),
            shapes: vec![SourceShape {
                name: String::new(),
                face_vertices: (0..3).map(FaceVertex::position_only).collect(),
                face_arities: vec![3],
                material_ids: vec![None],
            }],
            materials: vec![],
        };
        let filled = fill(&source).unwrap();
        assert!(filled
            .vertices
            .data()
            .iter()
            .all(|v| v.diffuse == Color::BLACK && v.tex_coord == Vec2::ZERO));
        assert_eq!(filled.texture, None);
    }

    #[test]
    fn out_of_range_material_is_corrupt() {
        let source = SourceModel {
            attributes: triangle_pool(),
            shapes: vec![SourceShape {
                name: String::new(),
                face_vertices: (0..3).map(FaceVertex::position_only).collect(),
                face_arities: vec![3],
                material_ids: vec![Some(3)],
            }],
            materials: vec![],
        };
        assert!(matches!(
            fill(&source),
            Err(ModelError::CorruptModel { shape: 0, face: 0, .. })
        ));
    }

    #[test]
    fn out_of_range_tex_coord_is_corrupt() {
        let source = SourceModel {
            attributes: triangle_pool(),
            shapes: vec![SourceShape {
                name: String::new(),
                face_vertices: vec![
                    FaceVertex::new(0, 0, 0),
                    FaceVertex::new(1, 0, 7),
                    FaceVertex::new(2, 0, 0),
                ],
                face_arities: vec![3],
                material_ids: vec![None],
            }],
            materials: vec![],
        };
        let err = fill(&source).unwrap_err();
        assert!(err.to_string().contains("texture coordinate index 7"));
    }
}
