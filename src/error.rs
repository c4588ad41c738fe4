//! Error types for vsync modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::version::BumpLevel;

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] toml::ser::Error),

    #[error("Autocommit message can't be empty")]
    EmptyAutoCommitMessage,

    #[error("Autocommit can't be used without the changelog or tags option")]
    AutoCommitWithoutStages,

    #[error(
        "Autocommit message '{message}' triggers a {level} bump, \
         the tag would not match the changelog"
    )]
    AutoCommitMessageBumps { message: String, level: BumpLevel },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git repository not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("git executable not found in PATH: {0}")]
    ToolNotFound(#[source] which::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors from version calculation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    #[error("Nothing to bump: no commit matches a trigger")]
    NothingToBump,

    #[error("Invalid semantic version: '{0}'")]
    InvalidSemVer(String),

    #[error("Can't bump '{version}' by {level}: component is already at its maximum")]
    Overflow { version: String, level: BumpLevel },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to open changelog {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read changelog {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write changelog {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Working tree checks that refuse to mutate the repository.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    #[error("Working tree has uncommitted changes: {}", .0.join(", "))]
    UncommittedChanges(Vec<String>),

    #[error("Nothing to commit (working tree is clean)")]
    NothingToCommit,

    #[error("Changelog {} was not updated", .0.display())]
    ChangeLogNotUpdated(PathBuf),

    #[error("Only the changelog may be autocommitted, found: {}", .0.join(", "))]
    MultipleChanges(Vec<String>),
}

/// Why a single pipeline stage failed.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error(transparent)]
    Guard(#[from] GuardError),
}

/// Errors that abort a run before any stage executes.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),
}
