use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::AssetError;

/// Read-only, name-keyed resource lookup.
pub trait AssetSource: fmt::Debug {
    /// Returns the full contents of resource `name`.
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Resources stored as files under a root directory.
///
/// Names are relative paths; anything that would resolve outside `root`
/// (absolute paths, `..`) is reported as not found.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let rel = Path::new(name);
        let contained = !name.is_empty()
            && rel.components().all(|c| matches!(c, Component::Normal(_)));
        contained.then(|| self.root.join(rel))
    }
}

impl AssetSource for DirAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let not_found = || AssetError::NotFound {
            name: name.to_string(),
        };

        let path = self.resolve(name).ok_or_else(not_found)?;
        log::debug!("loading asset {}", path.display());

        std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => not_found(),
            _ => AssetError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

/// Resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) resource `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })
    }
}
