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

// Meshweld Sandbox
// Loads a model and reports what the loader produced for each shape

use std::path::PathBuf;

use anyhow::{Context, Result};
use meshweld_core::{math::UnsignedColor, Vertex};
use meshweld_io::{ModelLoadSettings, ModelLoader};

fn usage() -> String {
    "usage: sandbox <model.obj> [settings.ron]".to_string()
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let model_path = PathBuf::from(args.next().with_context(usage)?);
    let settings = match args.next() {
        Some(path) => ModelLoadSettings::from_ron_file(PathBuf::from(path))?,
        None => ModelLoadSettings::default(),
    };
    let loader = ModelLoader::new(settings);
    log::debug!("Settings: {:?}", loader.parser().settings());

    let model = loader
        .load(&model_path)
        .with_context(|| format!("loading '{}'", model_path.display()))?;

    let mut total_bytes = 0;
    for (i, name) in model.shape_names().iter().enumerate() {
        let vertices = &model.vertex_buffers()[i];
        let indices = &model.index_buffers()[i];
        total_bytes += vertices.size_in_bytes() + indices.size_in_bytes();

        let tint = vertices
            .data()
            .first()
            .map(|v: &Vertex| UnsignedColor::from(v.diffuse));
        log::info!(
            "Shape {i} '{name}': {} vertices, {} triangles, diffuse {:?}, texture {:?}",
            vertices.element_count(),
            indices.element_count() / 3,
            tint,
            model.textures()[i]
        );
    }
    log::info!(
        "{} shapes, {} bytes of vertex and index data, {} floats per vertex",
        model.shape_count(),
        total_bytes,
        Vertex::FLOAT_COUNT
    );
    Ok(())
}
