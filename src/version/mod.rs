//! Version tag derivation from tag-triggered references.
//!
//! A release run is triggered by a git reference such as `refs/tags/v1.2.3`.
//! The version tag used for release lookup is that reference with the
//! `refs/tags/` prefix removed exactly once and nothing else changed.

use crate::error::{ReleaseError, Result};
use std::fmt;

/// Prefix every tag-triggered reference carries
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Version tag identifying a release, e.g. `v1.2.3`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    /// Derive the version tag from a full tag reference.
    ///
    /// Fails when the prefix is absent or nothing follows it; a best-effort
    /// trim would look up the wrong release.
    pub fn from_ref(tag_ref: &str) -> Result<Self> {
        let version = tag_ref
            .strip_prefix(TAG_REF_PREFIX)
            .ok_or_else(|| ReleaseError::TagFormat {
                tag_ref: tag_ref.to_string(),
                reason: format!("expected a reference starting with '{}'", TAG_REF_PREFIX),
            })?;

        if version.is_empty() {
            return Err(ReleaseError::TagFormat {
                tag_ref: tag_ref.to_string(),
                reason: "no tag name after the prefix".to_string(),
            });
        }

        Ok(Self(version.to_string()))
    }

    /// Tag name as used by the release-hosting service
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
