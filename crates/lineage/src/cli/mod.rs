//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for lineage using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `init`: Write a default `lineage.yaml`
//! - `show`: Compute and print the lineage of a component
//! - `list`: List components with optional filters
//! - `check`: Report dataset integrity problems
//! - `info`: Show dataset statistics
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Configuration file (default `lineage.yaml`, optional)
//! - `--dataset`: Dataset file, overriding the configured one
//!
//! # Example
//!
//! ```bash
//! lineage init --dataset data/prod.json
//! lineage list --search billing --type table
//! lineage show tbl_users --direction upstream --depth 3
//! lineage --json show tbl_users > view.json
//! lineage check
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CheckArgs, InfoArgs, InitArgs, ListArgs, ShowArgs};

pub use types::{ComponentTypeArg, DirectionArg, EnvironmentArg};

pub use validators::{validate_component_id, validate_search_text};

/// Lineage - upstream/downstream lineage for data-platform components
///
/// Loads a dataset of databases, tables, views, stored procedures, ETL
/// activities and dashboard visuals, and shows what feeds a component and
/// what it feeds, grouped by distance.
#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to lineage.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default configuration file
    ///
    /// Creates `lineage.yaml` (or the `--config` path) with every setting at
    /// its default. `--dataset` sets the dataset location written to it.
    Init(InitArgs),

    /// Show the lineage of a component
    ///
    /// Walks upstream and/or downstream from the root up to the given depth
    /// and prints the reachable components column by column.
    Show(ShowArgs),

    /// List components with optional filters
    ///
    /// Useful for finding the id of a component to pass to `show`.
    List(ListArgs),

    /// Check the dataset for integrity problems
    ///
    /// Reports dangling edges, duplicate ids and cycles. Exits with an
    /// error when any problem is found.
    Check(CheckArgs),

    /// Show dataset information
    ///
    /// Displays the dataset path and counts per component type and
    /// environment.
    Info(InfoArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Lineage explorer for data-platform components");
            println!("Use --help for more information");
            return Ok(());
        };

        match command {
            Commands::Init(args) => {
                execute::execute_init(
                    &std::env::current_dir()?,
                    self.config.as_deref(),
                    self.dataset.as_deref(),
                    args,
                )
                .await
            }
            Commands::Show(args) => {
                let mut app = self.app().await?;
                execute::execute_show(&mut app, args, output_mode)
            }
            Commands::List(args) => execute::execute_list(&self.app().await?, args, output_mode),
            Commands::Check(args) => execute::execute_check(&self.app().await?, args, output_mode),
            Commands::Info(args) => execute::execute_info(&self.app().await?, args, output_mode),
        }
    }

    /// Load configuration and dataset for the current directory
    async fn app(&self) -> Result<crate::app::App> {
        let app = crate::app::App::from_directory(
            &std::env::current_dir()?,
            self.config.as_deref(),
            self.dataset.as_deref(),
        )
        .await?;
        Ok(app)
    }
}
