//! vsync - automatic semantic versioning for git repositories.
//!
//! # Overview
//!
//! vsync classifies the commits since the latest tag by their subject
//! prefixes, bumps the version accordingly, prepends the release to
//! CHANGELOG.md, optionally commits it and cuts the next tag.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod release;
pub mod version;

// Re-export commonly used types
pub use config::Config;
pub use error::{
    ChangelogError, ConfigError, GitError, GuardError, ReleaseError, StageError, VersionError,
};
pub use git::{GitCli, VcsGateway};
pub use release::{Orchestrator, RunReport, Stage, StageOutcome};
pub use version::{BumpLevel, BumpPolicy, Triggers};
