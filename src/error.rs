//! Error types for path0_release operations.
//!
//! Fatal errors abort a run and surface as [`ReleaseError`]. Failures scoped to
//! a single asset are [`AssetError`]s and are collected into the publish report
//! instead of being propagated.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for path0_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all fatal path0_release failures
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Tag reference does not have the expected `refs/tags/<version>` shape
    #[error("Invalid tag reference '{tag_ref}': {reason}")]
    TagFormat {
        /// Tag reference as supplied
        tag_ref: String,
        /// Reason for the error
        reason: String,
    },

    /// No release exists for the version tag
    #[error("No release found for tag '{tag}' in {repository}")]
    ReleaseNotFound {
        /// Repository in `owner/name` form
        repository: String,
        /// Version tag that was looked up
        tag: String,
    },

    /// Asset manifest errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// GitHub operation errors
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Asset manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Failed to read manifest at {path}: {source}")]
    ReadFailed {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid TOML or has the wrong shape
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Manifest has no entries
    #[error("Manifest contains no assets")]
    Empty,

    /// An entry has an empty field
    #[error("Asset entry #{index} has an empty '{field}'")]
    EmptyField {
        /// Zero-based entry index
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// Two entries share a remote asset name
    #[error("Duplicate asset name '{name}'")]
    DuplicateName {
        /// Remote asset name
        name: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// Failure of a single asset upload
///
/// Recorded per asset; never aborts sibling uploads.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Local artifact missing or unreadable
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Artifact path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Remote service rejected or failed the upload
    #[error("Upload of '{name}' failed: {reason}")]
    Upload {
        /// Remote asset name
        name: String,
        /// Reason reported by the service
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::TagFormat { .. } => vec![
                "Run from a tag-triggered workflow so GITHUB_REF is refs/tags/<version>".to_string(),
                "Or pass --tag-ref refs/tags/<version> explicitly".to_string(),
            ],
            ReleaseError::ReleaseNotFound { tag, .. } => vec![
                format!("Create the release for '{}' before uploading assets", tag),
                "Check that the release is not still being created by an earlier job".to_string(),
            ],
            ReleaseError::Manifest(ManifestError::DuplicateName { name }) => vec![format!(
                "Give every asset a unique name; '{}' appears more than once",
                name
            )],
            ReleaseError::Cli(CliError::MissingArgument { argument }) => {
                vec![format!("Provide {} on the command line or via its environment variable", argument)]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
