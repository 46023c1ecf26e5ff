//! GitHub integration for release asset publication

mod release_manager;

pub use release_manager::{GitHubReleaseConfig, GitHubReleaseManager, DEFAULT_API_URL};

use crate::error::Result;
use crate::source::RepositoryIdentity;
use crate::version::VersionTag;
use bytes::Bytes;
use serde::Deserialize;

/// A release on the hosting service. Does not contain all fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Release page URL
    #[serde(default)]
    pub html_url: String,
    /// Upload endpoint, possibly with a URI template suffix like `{?name,label}`
    pub upload_url: String,
}

/// An asset attached to a release. Does not contain all fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedAsset {
    /// Asset ID
    pub id: u64,
    /// Asset name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Public download URL
    #[serde(default)]
    pub browser_download_url: String,
}

/// Release-hosting service operations used by the publisher
///
/// Implemented by [`GitHubReleaseManager`]; other hosts or test doubles can
/// stand in for it.
#[allow(async_fn_in_trait)]
pub trait ReleaseService {
    /// Find the release for a tag, `Ok(None)` if there is none
    async fn find_release_by_tag(
        &self,
        repo: &RepositoryIdentity,
        tag: &VersionTag,
    ) -> Result<Option<Release>>;

    /// Attach `content` to `release` as a new asset called `name`
    async fn upload_asset(
        &self,
        repo: &RepositoryIdentity,
        release: &Release,
        name: &str,
        content: Bytes,
    ) -> Result<UploadedAsset>;
}
