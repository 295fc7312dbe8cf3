//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that loads configuration and the
//! dataset, builds the graph index, and owns the lineage session the
//! commands compute views through.
//!
//! # Example
//!
//! ```no_run
//! use lineage::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."), None, None).await?;
//!     println!("{} components", app.index().component_count());
//!     Ok(())
//! }
//! ```

use crate::config::{CONFIG_FILE_NAME, LineageConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::graph::GraphIndex;
use crate::session::LineageSession;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    /// Loaded configuration
    config: LineageConfig,

    /// Resolved path of the dataset file
    dataset_path: PathBuf,

    /// Session holding the graph index and the current view
    session: LineageSession,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// The configuration file is `config_path` when given (relative paths
    /// resolve against `working_dir`), otherwise `lineage.yaml` in
    /// `working_dir` if it exists. The dataset is `dataset_override` when
    /// given, otherwise the configured dataset resolved against the
    /// directory holding the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly given configuration file cannot be read or is invalid
    /// - The dataset file cannot be read or parsed
    pub async fn from_directory(
        working_dir: &Path,
        config_path: Option<&Path>,
        dataset_override: Option<&Path>,
    ) -> Result<Self> {
        let (config, config_dir) = match config_path {
            Some(path) => {
                let path = working_dir.join(path);
                let config = LineageConfig::load(&path).await?;
                let dir = path.parent().map_or_else(|| working_dir.to_path_buf(), Path::to_path_buf);
                (config, dir)
            }
            None => {
                let config =
                    LineageConfig::load_or_default(&working_dir.join(CONFIG_FILE_NAME)).await?;
                (config, working_dir.to_path_buf())
            }
        };

        let dataset_path = match dataset_override {
            Some(path) => working_dir.join(path),
            None => config.dataset_path(&config_dir),
        };

        let index = Dataset::load(&dataset_path).await?.into_index();
        tracing::debug!(
            dataset = %dataset_path.display(),
            components = index.component_count(),
            edges = index.edge_count(),
            "Application context ready"
        );

        Ok(Self::new(config, dataset_path, index))
    }

    /// Create an App from already loaded parts.
    #[must_use]
    pub fn new(config: LineageConfig, dataset_path: PathBuf, index: GraphIndex) -> Self {
        let session = LineageSession::new(index, config.layout.clone());
        Self {
            config,
            dataset_path,
            session,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    /// Get the path of the dataset file.
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Get the graph index.
    pub fn index(&self) -> &GraphIndex {
        self.session.index()
    }

    /// Get a mutable reference to the lineage session.
    pub fn session_mut(&mut self) -> &mut LineageSession {
        &mut self.session
    }
}
