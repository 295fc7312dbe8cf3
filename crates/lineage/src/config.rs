//! Configuration management for lineage.
//!
//! Configuration lives in an optional YAML file (`lineage.yaml` by default):
//!
//! ```yaml
//! dataset: data/lineage.json
//! layout:
//!   horizontal-spacing: 400
//!   vertical-spacing: 180
//!   min-vertical-gap: 140
//!   resolve-passes: 2
//! defaults:
//!   direction: both
//!   depth: 2
//!   max-depth: 5
//! ```
//!
//! Every field has a default, so a missing file or a partial file is fine.

use crate::domain::LineageDirection;
use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "lineage.yaml";

/// Default dataset path, relative to the working directory
pub const DEFAULT_DATASET_FILE: &str = "lineage.json";

/// Default traversal depth
pub const DEFAULT_DEPTH: u32 = 2;

/// Default upper bound offered for traversal depth
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Configuration file structure for lineage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LineageConfig {
    /// Path to the dataset file
    pub dataset: PathBuf,

    /// Layout spacing constants
    pub layout: LayoutConfig,

    /// Query defaults
    pub defaults: QueryDefaults,
}

/// Default query parameters section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct QueryDefaults {
    /// Direction used when none is given
    pub direction: LineageDirection,

    /// Depth used when none is given
    pub depth: u32,

    /// Largest depth accepted in strict mode
    pub max_depth: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            direction: LineageDirection::Both,
            depth: DEFAULT_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_FILE),
            layout: LayoutConfig::default(),
            defaults: QueryDefaults::default(),
        }
    }
}

impl LineageConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config`
    /// if it is not valid YAML or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the file exists.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            tracing::debug!(path = %path.display(), "No configuration file; using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on serialization failure and `Error::Io` if
    /// the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the configuration for unusable values
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;

        if self.defaults.max_depth == 0 {
            return Err(Error::Config(
                "defaults.max-depth must be at least 1".to_string(),
            ));
        }

        if self.defaults.depth == 0 || self.defaults.depth > self.defaults.max_depth {
            return Err(Error::Config(format!(
                "defaults.depth must be between 1 and {}, got {}",
                self.defaults.max_depth, self.defaults.depth
            )));
        }

        Ok(())
    }

    /// Resolve the dataset path against `base` when it is relative
    #[must_use]
    pub fn dataset_path(&self, base: &Path) -> PathBuf {
        if self.dataset.is_absolute() {
            self.dataset.clone()
        } else {
            base.join(&self.dataset)
        }
    }
}

/// Write a default configuration file at `path`.
///
/// `dataset` replaces the default dataset location when given. Returns the
/// configuration that was written.
///
/// # Errors
///
/// Returns `Error::Config` if a file already exists at `path`, and
/// `Error::Io` if it cannot be written.
pub async fn init(path: &Path, dataset: Option<&Path>) -> Result<LineageConfig> {
    if fs::try_exists(path).await? {
        return Err(Error::Config(format!(
            "Configuration already exists at {}",
            path.display()
        )));
    }

    let mut config = LineageConfig::default();
    if let Some(dataset) = dataset {
        config.dataset = dataset.to_path_buf();
    }
    config.save(path).await?;

    tracing::debug!(path = %path.display(), "Wrote default configuration");
    Ok(config)
}
