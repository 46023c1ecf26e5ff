//! Shared helper functions for command execution.

use crate::cli::{AssetArgs, RuntimeConfig};
use crate::error::Result;
use crate::manifest::AssetManifest;

/// Load the manifest named on the command line, or the built-in one
pub(super) fn load_manifest(assets: &AssetArgs, config: &RuntimeConfig) -> Result<AssetManifest> {
    let manifest = match &assets.manifest {
        Some(path) => {
            config.verbose_println(&format!("Using manifest {}", path.display()));
            AssetManifest::load(path)?
        }
        None => {
            config.verbose_println("Using built-in manifest");
            AssetManifest::builtin()?
        }
    };

    config.verbose_println(&format!(
        "{} asset(s), artifacts under {}",
        manifest.len(),
        assets.artifacts_dir.display()
    ));
    Ok(manifest)
}
