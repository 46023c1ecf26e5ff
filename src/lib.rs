//! # path0 release
//!
//! Publishes per-platform builds of the path0 SQLite extension to the GitHub
//! release created for a tag.
//!
//! The asset table is declarative configuration (see [`manifest`]). A run
//! resolves the release for the triggering tag, then uploads every artifact
//! concurrently. Missing or rejected artifacts are reported per asset; only a
//! malformed tag reference or a missing release aborts the run.
//!
//! ## Usage
//!
//! ```bash
//! path0_release publish                               # inside a tag-triggered workflow
//! path0_release publish --manifest deno-assets.toml   # Deno build matrix
//! path0_release check --artifacts-dir dist            # offline preflight
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod github;
pub mod manifest;
pub mod publish;
pub mod source;
pub mod version;

pub use cli::Args;
pub use error::{AssetError, CliError, ManifestError, ReleaseError, Result};
pub use github::{GitHubReleaseConfig, GitHubReleaseManager, Release, ReleaseService, UploadedAsset};
pub use manifest::{AssetEntry, AssetManifest};
pub use publish::{AssetUpload, PublishReport, Publisher};
pub use source::RepositoryIdentity;
pub use version::VersionTag;
