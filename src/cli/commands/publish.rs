//! `publish`: upload manifest artifacts to the release for a tag.

use super::helpers::load_manifest;
use super::{EXIT_ASSET_FAILURES, EXIT_SUCCESS};
use crate::cli::{PublishArgs, RuntimeConfig};
use crate::error::Result;
use crate::github::{GitHubReleaseConfig, GitHubReleaseManager};
use crate::publish::Publisher;
use crate::source::RepositoryIdentity;
use crate::version::VersionTag;

pub(super) async fn execute_publish(args: &PublishArgs, config: &RuntimeConfig) -> Result<i32> {
    // Tag and manifest problems surface before credentials are required.
    let tag = VersionTag::from_ref(&args.tag_ref)?;
    let repo = RepositoryIdentity::parse(&args.repository)?;
    let manifest = load_manifest(&args.assets, config)?;

    let manager = GitHubReleaseManager::new(GitHubReleaseConfig {
        api_url: args.api_url.clone(),
        token: args.token.clone(),
    })?;

    config.section(&format!("Publishing {} to {}", tag, repo));
    for entry in manifest.entries() {
        config.indent(&format!("{} ← {}", entry.name, entry.path.display()));
    }

    let publisher = Publisher::new(manager, &args.assets.artifacts_dir);
    let report = publisher.publish(&args.tag_ref, &repo, &manifest).await?;

    config.info_println(&format!(
        "Release {} ({})",
        report.release.id, report.release.html_url
    ));
    for upload in &report.uploads {
        match &upload.result {
            Ok(asset) => {
                config.success_println(&format!("{} ({} bytes)", upload.name, asset.size));
                if !asset.browser_download_url.is_empty() {
                    config.verbose_println(&asset.browser_download_url);
                }
            }
            Err(e) => config.error_println(&e.to_string()),
        }
    }

    let failed = report.failed().count();
    if failed == 0 {
        config.success_println(&format!(
            "Uploaded {} asset(s) to {}",
            report.uploads.len(),
            report.tag
        ));
        Ok(EXIT_SUCCESS)
    } else {
        config.error_println(&format!(
            "{} of {} asset(s) failed to upload to {}",
            failed,
            report.uploads.len(),
            report.tag
        ));
        Ok(EXIT_ASSET_FAILURES)
    }
}
