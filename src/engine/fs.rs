use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    assets::catalog::normalize_rel_path,
    foundation::error::{LayerfxError, LayerfxResult},
};

/// Named byte storage the engine reads inputs from and writes output to.
///
/// Names are relative paths; implementations normalize them with
/// [`normalize_rel_path`] so `a\b.png`, `./a/b.png` and `/a/b.png` address the same file.
pub trait VirtualFs: Send {
    /// Store `bytes` under `name`, replacing any previous content.
    fn write(&mut self, name: &str, bytes: &[u8]) -> LayerfxResult<()>;
    /// Read the bytes stored under `name`.
    fn read(&self, name: &str) -> LayerfxResult<Vec<u8>>;
    /// Whether `name` is present.
    fn exists(&self, name: &str) -> bool;
}

/// In-memory filesystem for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemFs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemFs {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl VirtualFs for MemFs {
    fn write(&mut self, name: &str, bytes: &[u8]) -> LayerfxResult<()> {
        self.files.insert(normalize_rel_path(name)?, bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> LayerfxResult<Vec<u8>> {
        let key = normalize_rel_path(name)?;
        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| LayerfxError::asset(format!("'{key}' is not staged")))
    }

    fn exists(&self, name: &str) -> bool {
        normalize_rel_path(name)
            .map(|key| self.files.contains_key(&key))
            .unwrap_or(false)
    }
}

/// Staging directory on disk; the engine runs with it as working directory.
#[derive(Clone, Debug)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Use `root` as staging directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> LayerfxResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create staging directory '{}'", root.display()))?;
        Ok(Self { root })
    }

    /// Create a fresh, uniquely named staging directory under the system temp dir.
    pub fn temp(prefix: &str) -> LayerfxResult<Self> {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::new(std::env::temp_dir().join(format!(
            "{prefix}_{}_{nanos}",
            std::process::id()
        )))
    }

    /// Staging directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> LayerfxResult<PathBuf> {
        Ok(self.root.join(normalize_rel_path(name)?))
    }
}

impl VirtualFs for DirFs {
    fn write(&mut self, name: &str, bytes: &[u8]) -> LayerfxResult<()> {
        let path = self.path_for(name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory '{}'", parent.display()))?;
        }
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }

    fn read(&self, name: &str) -> LayerfxResult<Vec<u8>> {
        let path = self.path_for(name)?;
        std::fs::read(&path)
            .with_context(|| format!("read '{}'", path.display()))
            .map_err(LayerfxError::from)
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/fs.rs"]
mod tests;
