//! Asset manifest: the declarative table of artifacts to publish.
//!
//! A manifest is a TOML document with one `[[asset]]` table per artifact:
//!
//! ```toml
//! [[asset]]
//! name = "linux-x86_64-path0.so"
//! path = "path0-cross/x86_64-linux/path0.so"
//! ```
//!
//! `path` is relative to the artifacts directory of the run and `name` is the
//! asset name on the release. Entry order is kept for logging and reporting.

use crate::error::{ManifestError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Manifest compiled into the binary, mirroring `release-assets.toml`
const BUILTIN_MANIFEST: &str = include_str!("../../release-assets.toml");

/// One artifact to publish
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetEntry {
    /// Remote asset name on the release
    pub name: String,
    /// Local artifact path
    pub path: PathBuf,
}

/// Ordered, validated list of assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    entries: Vec<AssetEntry>,
}

#[derive(Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetEntry>,
}

impl AssetManifest {
    /// Build a manifest from entries, validating them
    pub fn new(entries: Vec<AssetEntry>) -> std::result::Result<Self, ManifestError> {
        if entries.is_empty() {
            return Err(ManifestError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(ManifestError::EmptyField {
                    index,
                    field: "name",
                });
            }
            if entry.path.as_os_str().is_empty() {
                return Err(ManifestError::EmptyField {
                    index,
                    field: "path",
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ManifestError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Parse a manifest from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ManifestError> {
        let file: ManifestFile = toml::from_str(content)?;
        Self::new(file.assets)
    }

    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded manifest from {}", path.display());
        Ok(Self::from_toml_str(&content)?)
    }

    /// The built-in path0 release manifest
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_toml_str(BUILTIN_MANIFEST)?)
    }

    /// Entries in manifest order
    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated manifest
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
