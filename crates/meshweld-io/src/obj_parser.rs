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

//! Defines the parser for Wavefront OBJ/MTL files.
//!
//! Geometry is read with the `obj` crate, which keeps every face corner's
//! texture and normal index optional and shares one attribute pool across all
//! objects. Material libraries are read with `tobj`.

use crate::{
    AttributePool, FaceVertex, ModelError, ModelLoadSettings, ModelParser, SourceMaterial,
    SourceModel, SourceShape,
};
use ahash::AHashMap;
use meshweld_core::math::Color;
use obj::{IndexTuple, Mtl, ObjData, ObjMaterial, Object};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Parses Wavefront OBJ files, resolving `mtllib` statements against the
/// configured material folder.
///
/// Each OBJ object becomes one shape. Polygons are fan-triangulated, and every
/// triangle keeps the material of the `usemtl` group it was declared in.
#[derive(Debug, Clone, Default)]
pub struct ObjParser {
    settings: ModelLoadSettings,
}

impl ObjParser {
    /// Creates a parser with the given settings.
    pub fn new(settings: ModelLoadSettings) -> Self {
        Self { settings }
    }

    /// The settings this parser was created with.
    pub fn settings(&self) -> &ModelLoadSettings {
        &self.settings
    }

    fn convert_object(
        &self,
        path: &Path,
        object: &Object,
        material_ids: &AHashMap<String, usize>,
    ) -> Result<SourceShape, ModelError> {
        let mut shape = SourceShape {
            name: object.name.clone(),
            ..Default::default()
        };

        for group in &object.groups {
            let material_id = group
                .material
                .as_ref()
                .and_then(|material| resolve_material(material, material_ids, &object.name));

            for polygon in &group.polys {
                let corners = polygon
                    .0
                    .iter()
                    .map(face_vertex)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|message| parse_error(path, message))?;

                if corners.len() < 3 {
                    self.check_primitive(path, &object.name, corners.len())?;
                    continue;
                }
                push_polygon(&mut shape, &corners, material_id);
            }
        }
        Ok(shape)
    }

    /// Decides what happens to a point or line primitive.
    fn check_primitive(&self, path: &Path, object: &str, arity: usize) -> Result<(), ModelError> {
        let ignored = match arity {
            0 => true,
            1 => self.settings.ignore_points,
            _ => self.settings.ignore_lines,
        };
        if ignored {
            return Ok(());
        }
        Err(parse_error(
            path,
            format!("object '{object}' has a {arity}-vertex primitive, which is not a triangle"),
        ))
    }
}

impl ModelParser for ObjParser {
    fn parse(&self, path: &Path) -> Result<SourceModel, ModelError> {
        let file = File::open(path).map_err(|e| parse_error(path, e.to_string()))?;
        let data = ObjData::load_buf(BufReader::new(file))
            .map_err(|e| parse_error(path, e.to_string()))?;

        let material_folder = self.settings.material_folder(path);
        let materials = load_materials(&data.material_libs, &material_folder);
        let material_ids: AHashMap<String, usize> = materials
            .iter()
            .enumerate()
            .map(|(i, material)| (material.name.clone(), i))
            .collect();

        let mut shapes = Vec::with_capacity(data.objects.len());
        for object in &data.objects {
            let shape = self.convert_object(path, object, &material_ids)?;
            if shape.face_count() == 0 {
                log::debug!("Skipping object '{}' without faces", object.name);
                continue;
            }
            shapes.push(shape);
        }

        Ok(SourceModel {
            attributes: attribute_pool(&data),
            shapes,
            materials,
        })
    }
}

fn parse_error(path: &Path, message: String) -> ModelError {
    ModelError::Parse {
        path: path.to_path_buf(),
        message,
    }
}

fn attribute_pool(data: &ObjData) -> AttributePool {
    AttributePool {
        positions: data.position.iter().flatten().copied().collect(),
        normals: data.normal.iter().flatten().copied().collect(),
        tex_coords: data.texture.iter().flatten().copied().collect(),
    }
}

/// Loads every `mtllib` in declaration order.
///
/// A missing or broken library is not fatal; faces that name one of its
/// materials fall back to the default material.
fn load_materials(libraries: &[Mtl], folder: &Path) -> Vec<SourceMaterial> {
    let mut materials = Vec::new();
    for library in libraries {
        let mtl_path: PathBuf = folder.join(&library.filename);
        match tobj::load_mtl(&mtl_path) {
            Ok((loaded, _)) => materials.extend(loaded.into_iter().map(convert_material)),
            Err(e) => log::warn!(
                "Failed to load material library '{}': {e}",
                mtl_path.display()
            ),
        }
    }
    materials
}

fn resolve_material(
    material: &ObjMaterial,
    material_ids: &AHashMap<String, usize>,
    object: &str,
) -> Option<usize> {
    let name = match material {
        ObjMaterial::Ref(name) => name.as_str(),
        ObjMaterial::Mtl(material) => material.name.as_str(),
    };
    let id = material_ids.get(name).copied();
    if id.is_none() {
        log::warn!("Object '{object}' uses unknown material '{name}'");
    }
    id
}

fn to_u32(index: usize, kind: &str) -> Result<u32, String> {
    u32::try_from(index).map_err(|_| format!("{kind} index {index} does not fit in 32 bits"))
}

/// Converts one corner, keeping absent texture and normal indices as `None`.
fn face_vertex(corner: &IndexTuple) -> Result<FaceVertex, String> {
    let &IndexTuple(position, tex_coord, normal) = corner;
    Ok(FaceVertex {
        position: to_u32(position, "position")?,
        normal: normal.map(|i| to_u32(i, "normal")).transpose()?,
        tex_coord: tex_coord.map(|i| to_u32(i, "texture coordinate")).transpose()?,
    })
}

/// Appends a polygon as a fan of triangles around its first corner.
fn push_polygon(shape: &mut SourceShape, corners: &[FaceVertex], material_id: Option<usize>) {
    let Some((first, rest)) = corners.split_first() else {
        return;
    };
    for pair in rest.windows(2) {
        shape.face_vertices.extend([*first, pair[0], pair[1]]);
        shape.face_arities.push(3);
        shape.material_ids.push(material_id);
    }
}

fn convert_material(material: tobj::Material) -> SourceMaterial {
    let emissive = material
        .unknown_param
        .get("Ke")
        .and_then(|value| parse_float3(value))
        .map(Color::from)
        .unwrap_or(Color::BLACK);

    SourceMaterial {
        name: material.name,
        ambient: material.ambient.map(Color::from).unwrap_or(Color::BLACK),
        diffuse: material.diffuse.map(Color::from).unwrap_or(Color::BLACK),
        emissive,
        diffuse_texture: material.diffuse_texture.filter(|name| !name.is_empty()),
    }
}

/// Parses an MTL color statement body such as `"0.1 0.2 0.3"`.
fn parse_float3(value: &str) -> Option<[f32; 3]> {
    let mut parts = value.split_whitespace().map(str::parse::<f32>);
    let color = [parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?];
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float3_reads_three_components() {
        assert_eq!(parse_float3("0.1 0.2 0.3"), Some([0.1, 0.2, 0.3]));
        assert_eq!(parse_float3("  1   0 0.5 "), Some([1.0, 0.0, 0.5]));
        assert_eq!(parse_float3("1 2"), None);
        assert_eq!(parse_float3("1 x 2"), None);
    }

    #[test]
    fn absent_corner_indices_stay_absent() {
        let corner = face_vertex(&IndexTuple(4, None, Some(2))).unwrap();
        assert_eq!(
            corner,
            FaceVertex {
                position: 4,
                normal: Some(2),
                tex_coord: None,
            }
        );
        let bare = face_vertex(&IndexTuple(1, None, None)).unwrap();
        assert_eq!(bare, FaceVertex::position_only(1));
    }

    #[test]
    fn polygons_are_fanned_around_the_first_corner() {
        let mut shape = SourceShape::default();
        let corners: Vec<_> = (0..5).map(FaceVertex::position_only).collect();
        push_polygon(&mut shape, &corners, Some(2));

        assert_eq!(shape.face_count(), 3);
        assert_eq!(shape.face_arities, vec![3, 3, 3]);
        assert_eq!(shape.material_ids, vec![Some(2); 3]);
        let positions: Vec<u32> = shape.face_vertices.iter().map(|fv| fv.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn points_and_lines_follow_the_settings() {
        let path = Path::new("m.obj");
        let lenient = ObjParser::default();
        assert!(lenient.check_primitive(path, "o", 1).is_ok());
        assert!(lenient.check_primitive(path, "o", 2).is_ok());

        let strict = ObjParser::new(ModelLoadSettings {
            ignore_points: false,
            ignore_lines: false,
            ..Default::default()
        });
        assert!(strict.check_primitive(path, "o", 0).is_ok());
        assert!(matches!(
            strict.check_primitive(path, "o", 2),
            Err(ModelError::Parse { .. })
        ));
        assert!(!strict.settings().ignore_points);
    }

    #[test]
    fn unknown_material_names_resolve_to_none() {
        let mut ids = AHashMap::new();
        ids.insert("wood".to_string(), 0);
        assert_eq!(
            resolve_material(&ObjMaterial::Ref("wood".to_string()), &ids, "o"),
            Some(0)
        );
        assert_eq!(
            resolve_material(&ObjMaterial::Ref("steel".to_string()), &ids, "o"),
            None
        );
    }

    #[test]
    fn material_fields_are_converted() {
        let mut material = tobj::Material {
            name: "wood".to_string(),
            ambient: Some([0.1, 0.1, 0.1]),
            diffuse: Some([0.8, 0.6, 0.4]),
            diffuse_texture: Some("wood.png".to_string()),
            ..Default::default()
        };
        material
            .unknown_param
            .insert("Ke".to_string(), "0.5 0.25 0".to_string());

        let converted = convert_material(material);
        assert_eq!(converted.name, "wood");
        assert_eq!(converted.ambient, Color::rgb(0.1, 0.1, 0.1));
        assert_eq!(converted.diffuse, Color::rgb(0.8, 0.6, 0.4));
        assert_eq!(converted.emissive, Color::rgb(0.5, 0.25, 0.0));
        assert_eq!(converted.diffuse_texture_name(), Some("wood.png"));
    }

    #[test]
    fn missing_material_colors_default_to_black() {
        let converted = convert_material(tobj::Material::default());
        assert_eq!(converted.ambient, Color::BLACK);
        assert_eq!(converted.diffuse, Color::BLACK);
        assert_eq!(converted.emissive, Color::BLACK);
        assert_eq!(converted.diffuse_texture, None);
    }
}
