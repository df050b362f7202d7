use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    assets::catalog::{AssetCatalog, normalize_rel_path},
    foundation::error::{LayerfxError, LayerfxResult},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Editor configuration: asset catalogues, output name and logging.
pub struct EditorConfig {
    /// Font, sticker and filter catalogues.
    #[serde(flatten)]
    pub catalog: AssetCatalog,
    /// Name the engine writes its output under.
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Forward engine log lines to the progress callback.
    #[serde(default)]
    pub log: bool,
}

fn default_output_file() -> String {
    "test.mp4".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog: AssetCatalog::default(),
            output_file: default_output_file(),
            log: false,
        }
    }
}

impl EditorConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> LayerfxResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LayerfxError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the output file name.
    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Check the output name and catalogue paths.
    pub fn validate(&self) -> LayerfxResult<()> {
        normalize_rel_path(&self.output_file)
            .map_err(|e| LayerfxError::validation(format!("output_file: {e}")))?;
        self.catalog.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
