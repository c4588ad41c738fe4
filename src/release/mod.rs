//! Release pipeline: changelog update, autocommit and tag creation.
//!
//! Stages run in a fixed order and each one is attempted even if an earlier
//! one failed. Every stage re-reads repository state through the
//! [`VcsGateway`] rather than trusting what a previous stage computed.

pub mod preflight;
pub mod stage;

pub use stage::{RunReport, Stage, StageOutcome, StageResult};

use tracing::{error, info};

use crate::changelog;
use crate::config::Config;
use crate::error::{ReleaseError, StageError};
use crate::git::VcsGateway;
use crate::version::next_tag;

/// Runs the configured stages against one repository.
pub struct Orchestrator<G: VcsGateway> {
    config: Config,
    vcs: G,
}

impl<G: VcsGateway> Orchestrator<G> {
    pub fn new(config: Config, vcs: G) -> Self {
        Self { config, vcs }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stages enabled for this run, in execution order.
    pub fn stages(&self) -> Vec<Stage> {
        Stage::enabled(&self.config.generator)
    }

    /// Validate, then attempt every enabled stage.
    ///
    /// A preflight failure aborts before anything is touched. Stage failures
    /// are recorded in the report and do not stop later stages.
    pub fn run(&self) -> Result<RunReport, ReleaseError> {
        preflight::run_checks(&self.config, &self.vcs)?;

        let mut report = RunReport::default();
        for stage in self.stages() {
            let outcome = self.execute(stage);
            match &outcome {
                Ok(done) => info!(stage = %stage, "{}", done),
                Err(e) => error!(stage = %stage, error = %e, "Stage failed"),
            }
            report.record(stage, outcome);
        }

        Ok(report)
    }

    /// Run a single stage.
    pub fn execute(&self, stage: Stage) -> Result<StageOutcome, StageError> {
        match stage {
            Stage::UpdateChangelog => self.update_changelog(),
            Stage::AutoCommit => self.autocommit(),
            Stage::NewTag => self.new_tag(),
        }
    }

    /// Compute the tag for the next release from the current repository state.
    pub fn next_tag(&self) -> Result<String, StageError> {
        let latest = self.vcs.latest_tag()?;
        let commits = self.vcs.unreleased_changes()?;
        self.tag_for(latest.as_deref(), &commits)
    }

    /// The next tag for one snapshot of the latest tag and its unreleased commits.
    fn tag_for(&self, latest: Option<&str>, commits: &[String]) -> Result<String, StageError> {
        let tag = next_tag(
            latest,
            &self.config.tag_prefix,
            commits,
            &self.config.triggers,
            self.config.bump_policy,
        )?;

        info!(
            latest = latest.unwrap_or("(none)"),
            next = %tag,
            commits = commits.len(),
            "Computed next version"
        );
        Ok(tag)
    }

    fn update_changelog(&self) -> Result<StageOutcome, StageError> {
        preflight::check_clean_tree(&self.vcs.uncommitted_changes()?)?;

        let latest = self.vcs.latest_tag()?;
        let changes = self.vcs.unreleased_changes()?;
        let tag = self.tag_for(latest.as_deref(), &changes)?;

        let section = changelog::render(&tag, &changes);
        changelog::prepend(&self.config.changelog_path, &section)?;

        Ok(StageOutcome::ChangelogUpdated {
            tag,
            path: self.config.changelog_path.clone(),
            entries: changes.len(),
        })
    }

    fn autocommit(&self) -> Result<StageOutcome, StageError> {
        let changes = self.vcs.uncommitted_changes()?;
        preflight::check_autocommit(&changes, &self.config.changelog_path)?;

        let message = &self.config.generator.autocommit_message;
        self.vcs.commit(message)?;

        Ok(StageOutcome::Committed {
            message: message.clone(),
        })
    }

    fn new_tag(&self) -> Result<StageOutcome, StageError> {
        preflight::check_clean_tree(&self.vcs.uncommitted_changes()?)?;

        let tag = self.next_tag()?;
        self.vcs.new_tag(&tag)?;

        Ok(StageOutcome::Tagged { tag })
    }
}
