use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    assets::catalog::normalize_rel_path,
    foundation::core::{Geometry, de_text},
    foundation::error::{LayerfxError, LayerfxResult},
    layer::model::TextStyle,
    layer::registry::{LayerRef, LayerRegistry},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A primary input plus the edit layers to apply, as read from JSON.
pub struct EditProject {
    /// Source of the primary media.
    pub input: String,
    /// Name to stage the input under; defaults to the input's file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Layer additions, replayed in order.
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One registry `add_*` call.
pub enum LayerSpec {
    /// See [`LayerRegistry::add_image`].
    Image {
        /// Where to fetch the image.
        source: String,
        /// Staged name; defaults to the source's file name.
        #[serde(default)]
        staged_name: Option<String>,
        /// Scale and position.
        geometry: Geometry,
    },
    /// See [`LayerRegistry::add_text`].
    Text {
        /// Horizontal start.
        #[serde(deserialize_with = "de_text")]
        x: String,
        /// Vertical start.
        #[serde(deserialize_with = "de_text")]
        y: String,
        /// Text to draw.
        text: String,
        /// Styling; missing fields take the defaults.
        #[serde(default)]
        style: TextStyle,
    },
    /// See [`LayerRegistry::add_sticker`].
    Sticker {
        /// Sticker catalogue index.
        sticker_index: usize,
        /// Scale and position.
        geometry: Geometry,
    },
    /// See [`LayerRegistry::add_filter`].
    Filter {
        /// Filter catalogue index.
        filter_index: usize,
    },
    /// See [`LayerRegistry::add_crop`].
    Crop {
        /// Crop size and origin.
        geometry: Geometry,
    },
    /// See [`LayerRegistry::add_trim`].
    Trim {
        /// Start position.
        #[serde(deserialize_with = "de_text")]
        start: String,
        /// End position.
        #[serde(deserialize_with = "de_text")]
        end: String,
    },
}

impl LayerSpec {
    /// Apply this addition to `registry`.
    pub fn apply(&self, registry: &mut LayerRegistry) -> LayerfxResult<LayerRef> {
        match self {
            Self::Image {
                source,
                staged_name,
                geometry,
            } => {
                let staged = match staged_name {
                    Some(name) => name.clone(),
                    None => file_name_of(source)?,
                };
                Ok(registry.add_image(source.clone(), staged, geometry.clone()))
            }
            Self::Text { x, y, text, style } => {
                Ok(registry.add_text(x, y, text.clone(), style.clone()))
            }
            Self::Sticker {
                sticker_index,
                geometry,
            } => Ok(registry.add_sticker(*sticker_index, geometry.clone())),
            Self::Filter { filter_index } => registry.add_filter(*filter_index),
            Self::Crop { geometry } => registry.add_crop(geometry.clone()),
            Self::Trim { start, end } => registry.add_trim(start.clone(), end.clone()),
        }
    }
}

impl EditProject {
    /// Load a JSON project file.
    pub fn from_json_file(path: &Path) -> LayerfxResult<Self> {
        let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LayerfxError::serde(format!("parse project '{}': {e}", path.display())))
    }

    /// Normalized name the primary input is staged under.
    pub fn staged_input_name(&self) -> LayerfxResult<String> {
        let raw = match &self.file_name {
            Some(name) => name.clone(),
            None => file_name_of(&self.input)?,
        };
        normalize_rel_path(&raw)
    }

    /// Replay every layer spec into a fresh registry.
    ///
    /// A rejected duplicate singleton is logged and skipped; the first one stays.
    pub fn build_registry(&self) -> LayerfxResult<LayerRegistry> {
        let mut registry = LayerRegistry::new();
        for (i, spec) in self.layers.iter().enumerate() {
            match spec.apply(&mut registry) {
                Ok(_) => {}
                Err(LayerfxError::DuplicateLayerKind { kind }) => {
                    tracing::warn!(spec = i, %kind, "skipping duplicate layer");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(registry)
    }
}

fn file_name_of(source: &str) -> LayerfxResult<String> {
    Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| LayerfxError::validation(format!("'{source}' has no file name")))
}

#[cfg(test)]
#[path = "../tests/unit/project.rs"]
mod tests;
