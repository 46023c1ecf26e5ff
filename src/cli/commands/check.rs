//! `check`: offline preflight of a manifest against the artifacts directory.

use super::helpers::load_manifest;
use super::{EXIT_ASSET_FAILURES, EXIT_SUCCESS};
use crate::cli::{CheckArgs, RuntimeConfig};
use crate::error::Result;
use crate::publish::resolve_artifact_path;
use crate::version::VersionTag;

pub(super) async fn execute_check(args: &CheckArgs, config: &RuntimeConfig) -> Result<i32> {
    if let Some(tag_ref) = &args.tag_ref {
        let tag = VersionTag::from_ref(tag_ref)?;
        config.info_println(&format!("Version tag: {}", tag));
    }

    let manifest = load_manifest(&args.assets, config)?;

    config.section("Artifacts");
    let mut missing = 0usize;
    for entry in manifest.entries() {
        let path = resolve_artifact_path(&args.assets.artifacts_dir, &entry.path);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => config.success_println(&format!(
                "{} ← {} ({} bytes)",
                entry.name,
                path.display(),
                meta.len()
            )),
            Ok(_) => {
                missing += 1;
                config.error_println(&format!("{} ← {}: not a file", entry.name, path.display()));
            }
            Err(e) => {
                missing += 1;
                config.error_println(&format!("{} ← {}: {}", entry.name, path.display(), e));
            }
        }
    }

    if missing == 0 {
        config.success_println(&format!("All {} artifact(s) present", manifest.len()));
        Ok(EXIT_SUCCESS)
    } else {
        config.warning_println(&format!(
            "{} of {} artifact(s) missing",
            missing,
            manifest.len()
        ));
        Ok(EXIT_ASSET_FAILURES)
    }
}
