//! Semver arithmetic for a classified release.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// How a version must change for the next release.
///
/// Ordered by priority so the highest level of a commit set is its `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        f.write_str(name)
    }
}

/// Whether lower-order components are reset when a higher one is bumped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpPolicy {
    /// Increment only the addressed component (`1.2.3` + minor = `1.3.3`).
    ///
    /// Matches tags already published by earlier releases of this tool.
    #[default]
    Increment,
    /// Conventional semver (`1.2.3` + minor = `1.3.0`).
    Reset,
}

/// Parse a strict `MAJOR.MINOR.PATCH` version.
///
/// An empty string is a project without releases and parses as `0.0.0`.
/// Anything other than exactly three all-digit components is rejected,
/// including pre-release and build suffixes.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    let version = version.trim();
    if version.is_empty() {
        return Ok(Version::new(0, 0, 0));
    }

    let invalid = || VersionError::InvalidSemVer(version.to_string());

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }

    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Bump `version` by `level`, incrementing only the addressed component.
pub fn bump(version: &str, level: BumpLevel) -> Result<Version, VersionError> {
    bump_with_policy(version, level, BumpPolicy::Increment)
}

/// Bump `version` by `level` under the given policy.
pub fn bump_with_policy(
    version: &str,
    level: BumpLevel,
    policy: BumpPolicy,
) -> Result<Version, VersionError> {
    if level == BumpLevel::None {
        return Err(VersionError::NothingToBump);
    }

    let base = parse_version(version)?;
    apply_bump(&base, level, policy).ok_or_else(|| VersionError::Overflow {
        version: version.trim().to_string(),
        level,
    })
}

/// `None` when the addressed component is already `u64::MAX`.
fn apply_bump(base: &Version, level: BumpLevel, policy: BumpPolicy) -> Option<Version> {
    let (major, minor, patch) = (base.major, base.minor, base.patch);
    let next = match (level, policy) {
        (BumpLevel::Major, BumpPolicy::Increment) => {
            Version::new(major.checked_add(1)?, minor, patch)
        }
        (BumpLevel::Major, BumpPolicy::Reset) => Version::new(major.checked_add(1)?, 0, 0),
        (BumpLevel::Minor, BumpPolicy::Increment) => {
            Version::new(major, minor.checked_add(1)?, patch)
        }
        (BumpLevel::Minor, BumpPolicy::Reset) => Version::new(major, minor.checked_add(1)?, 0),
        (BumpLevel::Patch, _) => Version::new(major, minor, patch.checked_add(1)?),
        (BumpLevel::None, _) => base.clone(),
    };
    Some(next)
}
