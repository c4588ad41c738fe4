//! [`VcsGateway`] implementation backed by the system `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::VcsGateway;
use super::status::parse_porcelain;

/// Messages `git describe` prints when no tag is reachable.
const NO_TAG_MARKERS: [&str; 2] = ["No names found", "No tags can describe"];

/// Runs git commands against one repository.
#[derive(Debug, Clone)]
pub struct GitCli {
    repository: PathBuf,
    work_tree: PathBuf,
}

impl GitCli {
    /// Bind to a repository.
    ///
    /// `repository` is either a `.git` directory, in which case commands run in
    /// its parent, or a work tree directory.
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        let repository = repository.into();
        let work_tree = work_tree_of(&repository);
        Self {
            repository,
            work_tree,
        }
    }

    /// The directory git commands run in.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Run git and return its stdout, or a descriptive error with stderr attached.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!(?args, dir = %self.work_tree.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_tree)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn work_tree_of(repository: &Path) -> PathBuf {
    if repository.file_name().is_some_and(|name| name == ".git") {
        match repository.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        repository.to_path_buf()
    }
}

impl VcsGateway for GitCli {
    fn verify(&self) -> Result<(), GitError> {
        if !self.repository.exists() {
            return Err(GitError::RepositoryNotFound(self.repository.clone()));
        }

        which::which("git").map_err(GitError::ToolNotFound)?;

        Ok(())
    }

    fn latest_tag(&self) -> Result<Option<String>, GitError> {
        match self.run_git(&["describe", "--tags", "--abbrev=0"], "describe") {
            Ok(stdout) => {
                let tag = stdout.trim();
                Ok((!tag.is_empty()).then(|| tag.to_string()))
            }
            Err(GitError::CommandFailed { stderr, .. })
                if NO_TAG_MARKERS.iter().any(|marker| stderr.contains(marker)) =>
            {
                debug!("No tags found, treating repository as unreleased");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn unreleased_changes(&self) -> Result<Vec<String>, GitError> {
        let range = match self.latest_tag()? {
            Some(tag) => format!("{}..HEAD", tag),
            None => "HEAD".to_string(),
        };

        let stdout = self.run_git(&["log", "--pretty=format:%s", &range], "log")?;

        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(String::from)
            .collect())
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.run_git(
            &["status", "--porcelain", "-z", "--untracked-files=all"],
            "status",
        )?;
        Ok(parse_porcelain(&stdout))
    }

    fn new_tag(&self, name: &str) -> Result<(), GitError> {
        self.run_git(&["tag", name], "tag")?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["add", "--all"], "add")?;
        self.run_git(&["commit", "-m", message], "commit")?;
        Ok(())
    }
}
