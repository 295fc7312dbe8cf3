//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::types::{ComponentTypeArg, DirectionArg, EnvironmentArg};
use super::validators::{validate_component_id, validate_search_text};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Root component ID
    #[arg(value_parser = validate_component_id)]
    pub root: String,

    /// Which way to follow edges from the root (default from config)
    #[arg(short, long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Maximum number of hops from the root (default from config)
    ///
    /// Values below 1 are treated as 1 and reported as a warning, unless
    /// `--strict` is given.
    #[arg(short = 'n', long)]
    pub depth: Option<u32>,

    /// Reject depths outside 1..=max-depth instead of adjusting them
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive text matched against name, id, database, datatype and endpoint
    #[arg(short, long, value_parser = validate_search_text)]
    pub search: Option<String>,

    /// Filter by component type (repeatable or comma-separated)
    #[arg(short = 't', long = "type", value_enum, value_delimiter = ',')]
    pub types: Vec<ComponentTypeArg>,

    /// Filter by environment (repeatable or comma-separated)
    #[arg(short, long = "env", value_enum, value_delimiter = ',')]
    pub environments: Vec<EnvironmentArg>,

    /// Only show components whose last pipeline run failed
    #[arg(short, long)]
    pub failed: bool,

    /// Maximum number of components to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the `check` command
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Report problems without failing the command
    #[arg(long)]
    pub no_fail: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InfoArgs {}
