//! Release asset publication.
//!
//! [`Publisher::publish`] resolves the release for a tag reference and uploads
//! every manifest entry to it. Uploads run concurrently and settle
//! independently: a missing artifact or a rejected upload is recorded in the
//! [`PublishReport`] and never stops the other entries. Only tag and release
//! resolution failures abort the run, and they do so before any upload.

use crate::error::{AssetError, ReleaseError, Result};
use crate::github::{Release, ReleaseService, UploadedAsset};
use crate::manifest::{AssetEntry, AssetManifest};
use crate::source::RepositoryIdentity;
use crate::version::VersionTag;
use bytes::Bytes;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// Outcome of a single manifest entry
#[derive(Debug)]
pub struct AssetUpload {
    /// Remote asset name
    pub name: String,
    /// Resolved local artifact path
    pub path: PathBuf,
    /// Uploaded asset, or why it was not uploaded
    pub result: std::result::Result<UploadedAsset, AssetError>,
}

impl AssetUpload {
    /// Whether the asset was attached to the release
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a publish run that reached the upload stage
#[derive(Debug)]
pub struct PublishReport {
    /// Version tag the release was resolved from
    pub tag: VersionTag,
    /// Resolved release
    pub release: Release,
    /// One entry per manifest asset, in manifest order
    pub uploads: Vec<AssetUpload>,
}

impl PublishReport {
    /// Uploads that succeeded
    pub fn succeeded(&self) -> impl Iterator<Item = &AssetUpload> {
        self.uploads.iter().filter(|u| u.is_success())
    }

    /// Uploads that failed
    pub fn failed(&self) -> impl Iterator<Item = &AssetUpload> {
        self.uploads.iter().filter(|u| !u.is_success())
    }

    /// True when every asset was uploaded
    pub fn is_success(&self) -> bool {
        self.uploads.iter().all(AssetUpload::is_success)
    }
}

/// Publishes manifest assets to a release through a [`ReleaseService`]
pub struct Publisher<S> {
    service: S,
    artifacts_dir: PathBuf,
}

impl<S: ReleaseService> Publisher<S> {
    /// Create a publisher resolving relative artifact paths against `artifacts_dir`
    pub fn new(service: S, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// The underlying release service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Upload every manifest asset to the release tagged by `tag_ref`.
    ///
    /// Fails only when the tag reference is malformed or no release exists
    /// for it; per-asset failures are reported in the returned report.
    pub async fn publish(
        &self,
        tag_ref: &str,
        repo: &RepositoryIdentity,
        manifest: &AssetManifest,
    ) -> Result<PublishReport> {
        let tag = VersionTag::from_ref(tag_ref)?;
        log::info!("Resolving release {} in {}", tag, repo);

        let release = self
            .service
            .find_release_by_tag(repo, &tag)
            .await?
            .ok_or_else(|| ReleaseError::ReleaseNotFound {
                repository: repo.to_string(),
                tag: tag.to_string(),
            })?;
        log::info!("Found release {} for tag {}", release.id, tag);

        let uploads = join_all(
            manifest
                .entries()
                .iter()
                .map(|entry| self.upload_entry(repo, &release, entry)),
        )
        .await;

        Ok(PublishReport {
            tag,
            release,
            uploads,
        })
    }

    async fn upload_entry(
        &self,
        repo: &RepositoryIdentity,
        release: &Release,
        entry: &AssetEntry,
    ) -> AssetUpload {
        let path = self.artifact_path(&entry.path);
        let result = self.read_and_upload(repo, release, &entry.name, &path).await;

        match &result {
            Ok(asset) => log::debug!("Uploaded {} ({} bytes)", asset.name, asset.size),
            Err(e) => log::debug!("{}", e),
        }

        AssetUpload {
            name: entry.name.clone(),
            path,
            result,
        }
    }

    async fn read_and_upload(
        &self,
        repo: &RepositoryIdentity,
        release: &Release,
        name: &str,
        path: &Path,
    ) -> std::result::Result<UploadedAsset, AssetError> {
        log::info!("Uploading {} at {}", name, path.display());

        let content = tokio::fs::read(path).await.map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.service
            .upload_asset(repo, release, name, Bytes::from(content))
            .await
            .map_err(|e| AssetError::Upload {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    fn artifact_path(&self, path: &Path) -> PathBuf {
        resolve_artifact_path(&self.artifacts_dir, path)
    }
}

/// Resolve a manifest path against the artifacts directory; absolute paths are kept
pub fn resolve_artifact_path(artifacts_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        artifacts_dir.join(path)
    }
}
