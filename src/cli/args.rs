//! Command line argument parsing and validation.
//!
//! Every option that a tag-triggered GitHub Actions job already provides
//! falls back to the matching environment variable, so inside a workflow
//! `path0_release publish` needs no arguments at all.

use crate::github::DEFAULT_API_URL;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Publish path0 extension artifacts to a tagged GitHub release
#[derive(Parser, Debug)]
#[command(
    name = "path0_release",
    version,
    about = "Publish path0 extension artifacts to a tagged GitHub release",
    long_about = "Upload every artifact listed in an asset manifest to the GitHub release
matching the triggering tag. Uploads run concurrently; a missing or rejected
artifact is reported without stopping the others.

Usage:
  path0_release publish
  path0_release publish --tag-ref refs/tags/v0.2.0 --repository asg017/sqlite-path
  path0_release publish --manifest deno-assets.toml
  path0_release check --artifacts-dir dist"
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print extra detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload the manifest's artifacts to the release for a tag
    Publish(PublishArgs),

    /// Check locally that the manifest's artifacts exist, without contacting GitHub
    Check(CheckArgs),
}

/// Arguments for `publish`
#[derive(ClapArgs, Debug)]
pub struct PublishArgs {
    /// Tag reference that triggered the run, e.g. refs/tags/v1.2.3
    #[arg(long, env = "GITHUB_REF", value_name = "REF")]
    pub tag_ref: String,

    /// Repository hosting the release, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repository: String,

    /// GitHub token (GH_TOKEN is also accepted)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Manifest and artifacts location
    #[command(flatten)]
    pub assets: AssetArgs,
}

/// Arguments for `check`
#[derive(ClapArgs, Debug)]
pub struct CheckArgs {
    /// Tag reference to validate, e.g. refs/tags/v1.2.3 (GITHUB_REF is not read)
    #[arg(long, value_name = "REF")]
    pub tag_ref: Option<String>,

    /// Manifest and artifacts location
    #[command(flatten)]
    pub assets: AssetArgs,
}

/// Where the asset table and the artifacts come from
#[derive(ClapArgs, Debug, Clone)]
pub struct AssetArgs {
    /// Asset manifest (TOML); defaults to the built-in path0 manifest
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory that relative artifact paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub artifacts_dir: PathBuf,
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Publish(_) => "publish",
            Command::Check(_) => "check",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default `env_logger` filter; `RUST_LOG` overrides it
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "path0_release=error"
        } else if self.verbose {
            "path0_release=debug"
        } else {
            "path0_release=info"
        }
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Publish(publish) = &self.command {
            if publish.tag_ref.is_empty() {
                return Err("Tag reference is required (--tag-ref or GITHUB_REF)".to_string());
            }
            if publish.repository.is_empty() {
                return Err("Repository is required (--repository or GITHUB_REPOSITORY)".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print informational message
    pub fn info_println(&self, message: &str) {
        let _ = self.output.info(message);
    }

    /// Print verbose message (only with --verbose)
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish_with_flags() {
        let args = Args::try_parse_from([
            "path0_release",
            "publish",
            "--tag-ref",
            "refs/tags/v2.0.0",
            "--repository",
            "acme/path0",
            "--token",
            "tok",
            "--manifest",
            "deno-assets.toml",
            "--artifacts-dir",
            "dist",
        ])
        .unwrap();

        let Command::Publish(publish) = &args.command else {
            panic!("expected publish command");
        };
        assert_eq!(publish.tag_ref, "refs/tags/v2.0.0");
        assert_eq!(publish.repository, "acme/path0");
        assert_eq!(publish.token.as_deref(), Some("tok"));
        assert_eq!(publish.assets.manifest, Some(PathBuf::from("deno-assets.toml")));
        assert_eq!(publish.assets.artifacts_dir, PathBuf::from("dist"));
        assert_eq!(args.command.name(), "publish");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_tag_ref() {
        let args = Args::try_parse_from([
            "path0_release",
            "publish",
            "--tag-ref",
            "",
            "--repository",
            "acme/path0",
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_filter_follows_verbosity() {
        let quiet = Args::try_parse_from(["path0_release", "check", "-q"]).unwrap();
        assert_eq!(quiet.log_filter(), "path0_release=error");

        let verbose = Args::try_parse_from(["path0_release", "check", "-v"]).unwrap();
        assert_eq!(verbose.log_filter(), "path0_release=debug");

        let default = Args::try_parse_from(["path0_release", "check"]).unwrap();
        assert_eq!(default.log_filter(), "path0_release=info");
    }

    #[test]
    fn test_check_tag_ref_has_no_env_fallback() {
        let arg = <Args as clap::CommandFactory>::command()
            .find_subcommand("check")
            .and_then(|check| check.get_arguments().find(|a| a.get_id() == "tag_ref").cloned())
            .unwrap();
        assert!(arg.get_env().is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["path0_release", "check", "-q", "-v"]);
        assert!(result.is_err());
    }
}
