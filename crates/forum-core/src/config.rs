//! Configuration management for forum-insight

use crate::error::{ForumError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".forum-insight/config.toml";

/// Catalog entry the user list starts with; never a real user
pub const DEFAULT_PLACEHOLDER_USER: &str = "<Select a User>";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input validation settings
    pub validation: ValidationConfig,
    /// Engagement analytics settings
    pub engagement: EngagementConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ForumError::from(e).with_context(format!("Invalid config {}", path.display())))?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn check(&self) -> Result<()> {
        if self.engagement.placeholder_user.trim().is_empty() {
            return Err(ForumError::Config(
                "engagement.placeholder_user cannot be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validation-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Emit a warning log for every rejected input
    pub log_rejections: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            log_rejections: true,
        }
    }
}

/// What a batch run does when one user fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Stop at the first failure and return it
    #[default]
    Abort,
    /// Log the failure and continue with the next user
    Skip,
}

/// Engagement-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Catalog sentinel skipped during batch analysis
    pub placeholder_user: String,
    /// Failure handling for batch analysis
    pub batch_policy: BatchPolicy,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            placeholder_user: DEFAULT_PLACEHOLDER_USER.to_string(),
            batch_policy: BatchPolicy::Abort,
        }
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot file to read when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}
