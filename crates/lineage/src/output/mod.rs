//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, type icons)

pub mod color;

use crate::domain::Component;
use crate::graph::{DatasetStats, IntegrityReport};
use crate::view::{LineageView, ViewNode, level_label};
use crate::warning::Warning;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::Path;

pub use color::{error, info, success, warning};

use color::{arrow, bold, colored_type_icon, colorize_environment, colorize_id, dimmed, failure_marker};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Configuration for output formatting.
///
/// Controls terminal width limits, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `LINEAGE_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `LINEAGE_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `LINEAGE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("LINEAGE_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "LINEAGE_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("LINEAGE_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "LINEAGE_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("LINEAGE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a lineage view in the specified format.
///
/// In text mode, warnings go to stderr so stdout stays a clean listing.
pub fn print_view(view: &LineageView, mode: OutputMode) -> io::Result<()> {
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                print_view_text(&mut handle, view, &config)?;
            }
            print_warnings(&view.warnings, &config)
        }
        OutputMode::Json => print_json(view),
    }
}

/// Print a list of components in the specified format
pub fn print_components(components: &[&Component], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_components_text(&mut handle, components, &config),
        OutputMode::Json => write_json(&mut handle, &components),
    }
}

/// Print a dataset integrity report
pub fn print_report(report: &IntegrityReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_report_text(&mut handle, report, &config),
        OutputMode::Json => write_json(&mut handle, report),
    }
}

/// Print dataset statistics
pub fn print_stats(dataset: &Path, stats: &DatasetStats, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_stats_text(&mut handle, dataset, stats, &config),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "dataset": dataset.display().to_string(),
                "stats": stats,
            }),
        ),
    }
}

/// Print warnings to stderr, one per line.
pub fn print_warnings(warnings: &[Warning], config: &OutputConfig) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_warnings(&mut handle, warnings, config)
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_view_text<W: Write>(w: &mut W, view: &LineageView, config: &OutputConfig) -> io::Result<()> {
    let Some(root) = view.root() else {
        writeln!(w, "No lineage to show.")?;
        return Ok(());
    };

    let content_width = get_terminal_width().min(config.max_width);

    writeln!(
        w,
        "Lineage of {} ({})  {} {}  {} {}",
        bold(&root.component.name, config),
        colorize_id(root.component.id.as_str(), true, config),
        dimmed("direction:", config),
        view.query.direction,
        dimmed("depth:", config),
        view.query.effective_depth()
    )?;

    for level in view.levels() {
        let nodes: Vec<&ViewNode> = view.nodes_at(level).collect();
        writeln!(w)?;
        writeln!(
            w,
            "{} ({})",
            bold(&level_label(level), config),
            nodes.len()
        )?;
        for node in nodes {
            print_view_node(w, node, content_width, config)?;
        }
    }

    if !view.edges.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Edges", config), view.edges.len())?;
        for edge in &view.edges {
            writeln!(
                w,
                "  {}  {} {} {}  {}",
                dimmed(edge.id.as_str(), config),
                colorize_id(edge.source.as_str(), false, config),
                dimmed(arrow(config), config),
                colorize_id(edge.target.as_str(), false, config),
                edge.label
            )?;
        }
    }

    Ok(())
}

fn print_view_node<W: Write>(
    w: &mut W,
    node: &ViewNode,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    let component = &node.component;
    let mut line = format!(
        "  {} {}  {}  {}",
        colored_type_icon(component.component_type, config),
        colorize_id(component.id.as_str(), node.is_root, config),
        component.name,
        dimmed(
            &format!("({:.0}, {:.0})", node.position.x, node.position.y),
            config
        )
    );
    if component.has_failed {
        line.push_str("  ");
        line.push_str(&failure_marker(config));
    }
    writeln!(w, "{line}")?;

    if let Some(details) = &component.failure_details {
        let text = format!(
            "Pipeline {} {} at {} ({} consecutive failure(s))",
            details.pipeline_name, details.status, details.failure_time, details.failure_count
        );
        for wrapped in wrap_text(&text, width.saturating_sub(6)) {
            writeln!(w, "      {}", dimmed(&wrapped, config))?;
        }
    }

    Ok(())
}

fn print_components_text<W: Write>(
    w: &mut W,
    components: &[&Component],
    config: &OutputConfig,
) -> io::Result<()> {
    if components.is_empty() {
        writeln!(w, "No components found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} component(s):", components.len())?;
    writeln!(w)?;

    for component in components {
        let mut line = format!(
            "{} {}  {}  {}  {}",
            colored_type_icon(component.component_type, config),
            colorize_id(component.id.as_str(), false, config),
            component.name,
            dimmed(&component.component_type.to_string(), config),
            colorize_environment(component.environment, config)
        );
        if component.has_failed {
            line.push_str("  ");
            line.push_str(&failure_marker(config));
        }
        writeln!(w, "{line}")?;
    }

    Ok(())
}

fn print_report_text<W: Write>(
    w: &mut W,
    report: &IntegrityReport,
    config: &OutputConfig,
) -> io::Result<()> {
    if report.is_clean() {
        writeln!(w, "{}", success("Dataset is clean: no integrity problems found.", config))?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        error(
            &format!("Found {} integrity problem(s):", report.problem_count()),
            config
        )
    )?;

    if !report.warnings.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Warnings", config), report.warnings.len())?;
        write_warnings(w, &report.warnings, config)?;
    }

    if !report.cycles.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Cycles", config), report.cycles.len())?;
        let separator = format!(" {} ", arrow(config));
        for cycle in &report.cycles {
            let ids: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
            writeln!(w, "  {}", error(&ids.join(&separator), config))?;
        }
    }

    Ok(())
}

fn print_stats_text<W: Write>(
    w: &mut W,
    dataset: &Path,
    stats: &DatasetStats,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "Lineage Dataset Information")?;
    writeln!(w, "===========================")?;
    writeln!(w)?;
    writeln!(w, "{}     {}", dimmed("Dataset:", config), dataset.display())?;
    writeln!(
        w,
        "{}  {} components, {} edges",
        dimmed("Contents:", config),
        stats.components,
        stats.edges
    )?;

    if !stats.by_type.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("By type:", config))?;
        for (component_type, count) in &stats.by_type {
            writeln!(
                w,
                "  {} {:<18} {}",
                colored_type_icon(*component_type, config),
                component_type.to_string(),
                count
            )?;
        }
    }

    if !stats.by_environment.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("By environment:", config))?;
        for (environment, count) in &stats.by_environment {
            writeln!(
                w,
                "  {:<20} {}",
                colorize_environment(*environment, config),
                count
            )?;
        }
    }

    writeln!(w)?;
    let failed = format!("{} failed component(s)", stats.failed);
    if stats.failed == 0 {
        writeln!(w, "{}", success(&failed, config))?;
    } else {
        writeln!(w, "{}", error(&failed, config))?;
    }

    Ok(())
}

fn write_warnings<W: Write>(w: &mut W, warnings: &[Warning], config: &OutputConfig) -> io::Result<()> {
    for item in warnings {
        writeln!(
            w,
            "  {} {}",
            warning(&format!("[{}]", item.kind()), config),
            item
        )?;
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ComponentId, ComponentType, Edge, EdgeId, EdgeType, Environment, FailureDetails,
        LineageDirection, LineageQuery,
    };
    use crate::graph::GraphIndex;
    use crate::layout::LayoutConfig;
    use crate::view::compute_view;
    use std::collections::HashMap;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_index() -> GraphIndex {
        let failed = Component::new("tbl_history", ComponentType::Table, Environment::Production)
            .with_name("BillingHistory")
            .with_failure(FailureDetails {
                pipeline_name: "Daily-Billing-ETL".to_string(),
                failure_time: "2024-01-15 08:30:00".to_string(),
                failure_count: 3,
                status: "Failed".to_string(),
            });
        GraphIndex::build(
            vec![
                Component::new("db", ComponentType::Database, Environment::Production)
                    .with_name("M365BillingSystem"),
                failed,
                Component::new("vw_summary", ComponentType::View, Environment::PreProduction),
            ],
            vec![
                Edge::new("e1", "db", "tbl_history", EdgeType::References),
                Edge::new("e2", "tbl_history", "vw_summary", EdgeType::Reads),
                Edge::new("e3", "vw_summary", "ghost", EdgeType::Writes),
            ],
        )
    }

    #[test]
    fn output_config_from_lookup() {
        let vars = HashMap::from([
            ("LINEAGE_MAX_WIDTH", "120"),
            ("LINEAGE_ASCII", "1"),
        ]);
        let config = OutputConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.max_width, 120);
        assert!(config.use_ascii);
        assert!(config.use_colors);

        let vars = HashMap::from([
            ("LINEAGE_MAX_WIDTH", "invalid"),
            ("LINEAGE_ASCII", "false"),
            ("NO_COLOR", "1"),
        ]);
        let config = OutputConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.max_width, DEFAULT_MAX_CONTENT_WIDTH);
        assert!(!config.use_ascii);
        assert!(!config.use_colors, "NO_COLOR should disable colors");

        let vars = HashMap::from([("LINEAGE_COLOR", "false")]);
        let config = OutputConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(!config.use_colors, "LINEAGE_COLOR=false should disable colors");

        let config = OutputConfig::from_lookup(|_| None);
        assert_eq!(config, OutputConfig::default());
    }

    #[test]
    fn view_text_groups_by_level() {
        let index = sample_index();
        let query = LineageQuery::new("tbl_history", LineageDirection::Both, 1);
        let view = compute_view(&index, &query, &LayoutConfig::default());

        let output = render(|w| print_view_text(w, &view, &plain()));

        assert!(output.starts_with("Lineage of BillingHistory (tbl_history)"));
        let upstream = output.find("upstream 1 (1)").unwrap();
        let root = output.find("root (1)").unwrap();
        let downstream = output.find("downstream 1 (1)").unwrap();
        assert!(upstream < root && root < downstream);
        assert!(output.contains("✗ failed"));
        assert!(output.contains("Pipeline"));
        assert!(output.contains("e2  tbl_history → vw_summary  reads"));
    }

    #[test]
    fn empty_view_text() {
        let index = sample_index();
        let view = compute_view(&index, &LineageQuery::empty(), &LayoutConfig::default());
        assert_eq!(
            render(|w| print_view_text(w, &view, &plain())),
            "No lineage to show.\n"
        );
    }

    #[test]
    fn components_text_lists_each_component() {
        let index = sample_index();
        let components: Vec<&Component> = index.components().iter().collect();
        let output = render(|w| print_components_text(w, &components, &plain()));

        assert!(output.contains("Found 3 component(s):"));
        assert!(output.contains("db  M365BillingSystem  database  production"));
        assert!(output.contains("vw_summary  vw_summary  view  pre-production"));
    }

    #[test]
    fn components_text_handles_empty_list() {
        assert_eq!(
            render(|w| print_components_text(w, &[], &plain())),
            "No components found.\n"
        );
    }

    #[test]
    fn report_text_lists_problems() {
        let report = IntegrityReport {
            warnings: vec![Warning::DanglingEdge {
                edge_id: EdgeId::new("e3"),
                missing: ComponentId::new("ghost"),
            }],
            cycles: vec![vec![ComponentId::new("a"), ComponentId::new("b")]],
        };
        let config = OutputConfig::new(80, true, false);
        let output = render(|w| print_report_text(w, &report, &config));

        assert!(output.contains("Found 2 integrity problem(s):"));
        assert!(output.contains("[dangling_edge]"));
        assert!(output.contains("ghost"));
        assert!(output.contains("a -> b"));
    }

    #[test]
    fn clean_report_text() {
        let output = render(|w| print_report_text(w, &IntegrityReport::default(), &plain()));
        assert!(output.contains("Dataset is clean"));
    }

    #[test]
    fn stats_text_shows_breakdown() {
        let stats = sample_index().stats();
        let output = render(|w| print_stats_text(w, Path::new("lineage.json"), &stats, &plain()));

        assert!(output.contains("lineage.json"));
        assert!(output.contains("3 components, 3 edges"));
        assert!(output.contains("By environment:"));
        assert!(output.contains("1 failed component(s)"));
    }

    #[test]
    fn json_output_is_parseable() {
        let index = sample_index();
        let view = compute_view(
            &index,
            &LineageQuery::new("db", LineageDirection::Downstream, 2),
            &LayoutConfig::default(),
        );
        let output = render(|w| write_json(w, &view));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["nodes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("Pipeline Daily-Billing-ETL Failed at 2024-01-15", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 20 || !l.contains(' ')));
    }

    #[test]
    fn wrap_text_preserves_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }
}
