//! Pipeline stages and the per-run report.

use std::fmt;
use std::path::PathBuf;

use crate::config::Generator;
use crate::error::StageError;

/// One unit of the release pipeline.
///
/// Variants are declared in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    UpdateChangelog,
    AutoCommit,
    NewTag,
}

impl Stage {
    /// The stages switched on in `generator`, in execution order.
    pub fn enabled(generator: &Generator) -> Vec<Stage> {
        let mut stages = Vec::new();
        if generator.changelog {
            stages.push(Stage::UpdateChangelog);
        }
        if generator.autocommit {
            stages.push(Stage::AutoCommit);
        }
        if generator.tags {
            stages.push(Stage::NewTag);
        }
        stages
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateChangelog => "update-changelog",
            Self::AutoCommit => "autocommit",
            Self::NewTag => "new-tag",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful stage did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    ChangelogUpdated {
        tag: String,
        path: PathBuf,
        entries: usize,
    },
    Committed {
        message: String,
    },
    Tagged {
        tag: String,
    },
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangelogUpdated { tag, path, entries } => {
                let entry_word = if *entries == 1 { "entry" } else { "entries" };
                write!(
                    f,
                    "Added {} with {} {} to {}",
                    tag,
                    entries,
                    entry_word,
                    path.display()
                )
            }
            Self::Committed { message } => write!(f, "Created commit: {}", message),
            Self::Tagged { tag } => write!(f, "Created tag: {}", tag),
        }
    }
}

/// Result of one attempted stage.
#[derive(Debug)]
pub struct StageResult {
    pub stage: Stage,
    pub outcome: Result<StageOutcome, StageError>,
}

/// Every stage attempted in a run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub results: Vec<StageResult>,
}

impl RunReport {
    pub fn record(&mut self, stage: Stage, outcome: Result<StageOutcome, StageError>) {
        self.results.push(StageResult { stage, outcome });
    }

    /// Stages that failed, with their causes.
    pub fn failures(&self) -> impl Iterator<Item = (Stage, &StageError)> {
        self.results
            .iter()
            .filter_map(|result| result.outcome.as_ref().err().map(|e| (result.stage, e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
