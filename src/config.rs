//! Run configuration, loaded from `vsync.toml` and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::version::{BumpLevel, BumpPolicy, Triggers};

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_PATH: &str = "vsync.toml";

/// Default message for the changelog autocommit.
pub const DEFAULT_AUTOCOMMIT_MESSAGE: &str = "chore[VSync]: changelog updated";

/// Everything one release run needs.
///
/// Built once at startup and handed to the orchestrator by value; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_changelog_path")]
    pub changelog_path: PathBuf,

    #[serde(default = "default_repository_path")]
    pub repository_path: PathBuf,

    #[serde(default)]
    pub bump_policy: BumpPolicy,

    #[serde(default)]
    pub triggers: Triggers,

    #[serde(default)]
    pub generator: Generator,
}

/// Which stages run and how the autocommit is worded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator {
    #[serde(default = "default_true")]
    pub tags: bool,

    #[serde(default = "default_true")]
    pub changelog: bool,

    #[serde(default)]
    pub autocommit: bool,

    #[serde(default = "default_autocommit_message")]
    pub autocommit_message: String,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".git")
}

fn default_true() -> bool {
    true
}

fn default_autocommit_message() -> String {
    DEFAULT_AUTOCOMMIT_MESSAGE.to_string()
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            tags: true,
            changelog: true,
            autocommit: false,
            autocommit_message: default_autocommit_message(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_prefix: default_tag_prefix(),
            changelog_path: default_changelog_path(),
            repository_path: default_repository_path(),
            bump_policy: BumpPolicy::default(),
            triggers: Triggers::default(),
            generator: Generator::default(),
        }
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub changelog_path: Option<PathBuf>,
    pub repository_path: Option<PathBuf>,
    pub tags: Option<bool>,
    pub changelog: Option<bool>,
    pub autocommit: Option<bool>,
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if it doesn't exist.
    ///
    /// A file that exists but can't be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using default values");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line overrides, consuming the loaded value.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.changelog_path {
            self.changelog_path = path;
        }
        if let Some(path) = overrides.repository_path {
            self.repository_path = path;
        }
        if let Some(tags) = overrides.tags {
            self.generator.tags = tags;
        }
        if let Some(changelog) = overrides.changelog {
            self.generator.changelog = changelog;
        }
        if let Some(autocommit) = overrides.autocommit {
            self.generator.autocommit = autocommit;
        }
        self
    }

    /// Reject stage combinations that can't produce a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if !generator.autocommit {
            return Ok(());
        }

        if generator.autocommit_message.trim().is_empty() {
            return Err(ConfigError::EmptyAutoCommitMessage);
        }

        if !generator.changelog && !generator.tags {
            return Err(ConfigError::AutoCommitWithoutStages);
        }

        // The tag is recomputed after the autocommit lands, so its message must
        // not raise the level the changelog section was written for.
        if generator.changelog && generator.tags {
            let level = self.triggers.level_of(&generator.autocommit_message);
            if level > BumpLevel::Patch {
                return Err(ConfigError::AutoCommitMessageBumps {
                    message: generator.autocommit_message.clone(),
                    level,
                });
            }
        }

        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::SerializeFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.changelog_path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.repository_path, PathBuf::from(".git"));
        assert_eq!(config.bump_policy, BumpPolicy::Increment);
        assert!(config.generator.tags);
        assert!(config.generator.changelog);
        assert!(!config.generator.autocommit);
        assert_eq!(config.generator.autocommit_message, DEFAULT_AUTOCOMMIT_MESSAGE);
        assert_eq!(config.triggers.major, vec!["break", "major"]);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
tag_prefix = "release-"

[triggers]
minor = ["feat"]

[generator]
autocommit = true
"#,
        )
        .unwrap();

        assert_eq!(config.tag_prefix, "release-");
        assert_eq!(config.triggers.minor, vec!["feat"]);
        assert_eq!(config.triggers.major, vec!["break", "major"]);
        assert!(config.generator.autocommit);
        assert!(config.generator.tags);
        assert_eq!(config.generator.autocommit_message, DEFAULT_AUTOCOMMIT_MESSAGE);
    }

    #[test]
    fn test_parse_bump_policy() {
        let config = Config::parse("bump_policy = \"reset\"\n").unwrap();
        assert_eq!(config.bump_policy, BumpPolicy::Reset);

        assert!(Config::parse("bump_policy = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("vsync.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vsync.toml");
        std::fs::write(&path, "[generator\ntags = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::default().with_overrides(Overrides {
            changelog_path: Some(PathBuf::from("docs/CHANGES.md")),
            repository_path: None,
            tags: Some(false),
            changelog: None,
            autocommit: Some(true),
        });

        assert_eq!(config.changelog_path, PathBuf::from("docs/CHANGES.md"));
        assert_eq!(config.repository_path, PathBuf::from(".git"));
        assert!(!config.generator.tags);
        assert!(config.generator.changelog);
        assert!(config.generator.autocommit);
    }

    #[test]
    fn test_validate_autocommit_requires_message() {
        let mut config = Config::default();
        config.generator.autocommit = true;
        config.generator.autocommit_message = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyAutoCommitMessage)
        ));
    }

    #[test]
    fn test_validate_autocommit_requires_another_stage() {
        let mut config = Config::default();
        config.generator.autocommit = true;
        config.generator.tags = false;
        config.generator.changelog = false;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::AutoCommitWithoutStages)
        ));

        config.generator.tags = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_autocommit_message_must_not_raise_level() {
        let mut config = Config::default();
        config.generator.autocommit = true;
        config.generator.autocommit_message = "feat: release notes".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::AutoCommitMessageBumps {
                level: BumpLevel::Minor,
                ..
            })
        ));

        config.generator.autocommit_message = "break: release notes".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AutoCommitMessageBumps {
                level: BumpLevel::Major,
                ..
            })
        ));

        // Without a tag stage nothing is recomputed afterwards.
        config.generator.tags = false;
        assert!(config.validate().is_ok());

        config.generator.tags = true;
        config.generator.autocommit_message = "docs: release notes".to_string();
        assert!(config.validate().is_ok());
        config.generator.autocommit_message = "release notes".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_message_is_fine_without_autocommit() {
        let mut config = Config::default();
        config.generator.autocommit_message = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("tag_prefix = \"v\""));
        assert_eq!(Config::parse(&rendered).unwrap(), config);
    }
}
