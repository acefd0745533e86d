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

//! Settings that control how model files are read.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A collection of settings for reading OBJ models and their companion files.
///
/// Missing fields fall back to [`ModelLoadSettings::default`] when decoded from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelLoadSettings {
    /// Folder searched for `mtllib` files. When `None`, the model file's own
    /// folder is used.
    pub material_search_path: Option<PathBuf>,
    /// If `true`, point primitives (`p`) are dropped by the parser.
    pub ignore_points: bool,
    /// If `true`, line primitives (`l`) are dropped by the parser.
    pub ignore_lines: bool,
}

impl Default for ModelLoadSettings {
    fn default() -> Self {
        Self {
            material_search_path: None,
            ignore_points: true,
            ignore_lines: true,
        }
    }
}

impl ModelLoadSettings {
    /// Decodes settings from a RON string.
    pub fn from_ron_str(source: &str) -> Result<Self, ModelError> {
        ron::from_str(source).map_err(|e| ModelError::Settings(e.to_string()))
    }

    /// Reads and decodes settings from a RON file.
    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Encodes the settings as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ModelError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ModelError::Settings(e.to_string()))
    }

    /// The folder material libraries are resolved against for `model_path`.
    pub fn material_folder(&self, model_path: &Path) -> PathBuf {
        match &self.material_search_path {
            Some(folder) => folder.clone(),
            None => base_folder(model_path),
        }
    }
}

/// The folder containing `model_path`, against which texture names are resolved.
///
/// A bare file name yields an empty path, so joined names stay relative to the
/// working directory.
pub fn base_folder(model_path: &Path) -> PathBuf {
    model_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
