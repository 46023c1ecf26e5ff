//! Repository identity (`owner/name`) of the repository hosting the release

use crate::error::{CliError, ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryIdentity {
    /// Create identity from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name` notation, as found in `GITHUB_REPOSITORY`
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: format!("Invalid repository: '{}'. Expected: owner/name", input),
            })
        };

        let (owner, name) = input.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self::new(owner, name))
    }
}

impl FromStr for RepositoryIdentity {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
