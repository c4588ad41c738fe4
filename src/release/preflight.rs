//! Guards checked before a run and before each mutating stage.

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{GuardError, ReleaseError};
use crate::git::VcsGateway;

/// Checks that must pass before any stage runs.
///
/// 1. Repository exists and `git` is available
/// 2. Stage combination and autocommit message are valid
pub fn run_checks<G: VcsGateway>(config: &Config, vcs: &G) -> Result<(), ReleaseError> {
    vcs.verify()?;
    config.validate()?;

    debug!("Preflight checks passed");
    Ok(())
}

/// Require a work tree without pending modifications.
pub fn check_clean_tree(changes: &[String]) -> Result<(), GuardError> {
    if changes.is_empty() {
        Ok(())
    } else {
        Err(GuardError::UncommittedChanges(changes.to_vec()))
    }
}

/// Require the pending modifications to be exactly the changelog.
///
/// A missing changelog is reported before extra files, so an unrelated
/// edit never masks a changelog that was not written.
pub fn check_autocommit(changes: &[String], changelog: &Path) -> Result<(), GuardError> {
    if changes.is_empty() {
        return Err(GuardError::NothingToCommit);
    }

    if !changes.iter().any(|change| is_changelog(change, changelog)) {
        return Err(GuardError::ChangeLogNotUpdated(changelog.to_path_buf()));
    }

    if changes.len() > 1 {
        return Err(GuardError::MultipleChanges(changes.to_vec()));
    }

    Ok(())
}

/// Whether a work-tree-relative path from git names the changelog.
///
/// The changelog may be configured relative to the current directory or as
/// an absolute path, so the comparison is on trailing path components.
fn is_changelog(change: &str, changelog: &Path) -> bool {
    let change = Path::new(change);
    let change = change.strip_prefix("./").unwrap_or(change);
    changelog.ends_with(change)
}
