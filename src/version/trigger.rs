//! Commit subject classification by trigger prefix.

use serde::{Deserialize, Serialize};

use super::bump::BumpLevel;

/// Commit subject prefixes that trigger each kind of bump.
///
/// Lists may overlap. When a subject matches several lists the
/// highest level wins (major > minor > patch). Lists missing from a
/// config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triggers {
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Vec<String>,
}

impl Default for Triggers {
    fn default() -> Self {
        Self {
            major: to_strings(&["break", "major"]),
            minor: to_strings(&["feat", "feature", "minor"]),
            patch: to_strings(&["fix", "perf", "ref", "docs", "style", "chore", "tests"]),
        }
    }
}

impl Triggers {
    /// The highest level a single subject triggers.
    pub fn level_of(&self, subject: &str) -> BumpLevel {
        if has_prefix(subject, &self.major) {
            BumpLevel::Major
        } else if has_prefix(subject, &self.minor) {
            BumpLevel::Minor
        } else if has_prefix(subject, &self.patch) {
            BumpLevel::Patch
        } else {
            BumpLevel::None
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn has_prefix(subject: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| subject.starts_with(prefix.as_str()))
}

/// Classify a set of commit subjects into the bump level for the whole release.
///
/// One matching commit is enough to set the level; commits that match no
/// trigger are ignored. Returns [`BumpLevel::None`] when nothing matches.
pub fn classify<S: AsRef<str>>(commits: &[S], triggers: &Triggers) -> BumpLevel {
    commits
        .iter()
        .map(|commit| triggers.level_of(commit.as_ref()))
        .max()
        .unwrap_or(BumpLevel::None)
}
