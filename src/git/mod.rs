//! Git operations behind the [`VcsGateway`] trait.
//!
//! [`GitCli`] shells out to the system `git` binary, inheriting the user's
//! git config. Pipeline tests substitute the generated `MockVcsGateway`.

pub mod cli;
pub mod status;

pub use cli::GitCli;
pub use status::parse_porcelain;

use crate::error::GitError;

/// The fixed set of version-control queries and mutations a release needs.
///
/// Every call is blocking. Implementations wrap the tool's diagnostic output
/// into [`GitError`] instead of swallowing failures.
#[cfg_attr(test, mockall::automock)]
pub trait VcsGateway {
    /// Check that the repository path exists and `git` can be found.
    fn verify(&self) -> Result<(), GitError>;

    /// The most recent tag reachable from HEAD, `None` for an untagged repository.
    fn latest_tag(&self) -> Result<Option<String>, GitError>;

    /// Subjects of the commits since [`latest_tag`](Self::latest_tag), newest first.
    fn unreleased_changes(&self) -> Result<Vec<String>, GitError>;

    /// Work tree paths with staged, unstaged or untracked modifications.
    fn uncommitted_changes(&self) -> Result<Vec<String>, GitError>;

    /// Create a lightweight tag at HEAD.
    fn new_tag(&self, name: &str) -> Result<(), GitError>;

    /// Stage all pending changes and commit them.
    fn commit(&self, message: &str) -> Result<(), GitError>;
}
