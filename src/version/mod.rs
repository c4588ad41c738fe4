//! Version management and semver bumping.

pub mod bump;
pub mod trigger;

pub use bump::{BumpLevel, BumpPolicy, bump, bump_with_policy, parse_version};
pub use trigger::{Triggers, classify};

use crate::error::VersionError;

/// Derive the next release tag from the latest tag and unreleased commits.
///
/// `prefix` is stripped from `latest_tag` before parsing and prepended to the
/// bumped version. A missing tag starts from `0.0.0`.
pub fn next_tag<S: AsRef<str>>(
    latest_tag: Option<&str>,
    prefix: &str,
    commits: &[S],
    triggers: &Triggers,
    policy: BumpPolicy,
) -> Result<String, VersionError> {
    let latest = latest_tag.unwrap_or_default();
    let current = latest.strip_prefix(prefix).unwrap_or(latest);

    let level = classify(commits, triggers);
    let next = bump_with_policy(current, level, policy)?;

    Ok(format!("{prefix}{next}"))
}
