//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (clean integrity check, production)
//!   - Warning:   yellow  (data-integrity warnings, pre-production)
//!   - Error:     red     (failed components, cycles)
//!   - Info:      cyan    (component ids, the root)
//!   - Muted:     dimmed  (field labels, coordinates, edge arrows)
//!   - Emphasis:  bold    (level headers)

use crate::domain::{ComponentType, Environment};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Colorize a component id (cyan, bold for the root).
pub(crate) fn colorize_id(id: &str, is_root: bool, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    if is_root {
        id.cyan().bold().to_string()
    } else {
        id.cyan().to_string()
    }
}

/// Apply color to an environment name.
pub(crate) fn colorize_environment(environment: Environment, config: &OutputConfig) -> String {
    let text = environment.to_string();
    if !config.use_colors {
        return text;
    }
    match environment {
        Environment::Production => text.green().to_string(),
        Environment::PreProduction => text.yellow().to_string(),
    }
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Arrow drawn between an edge's source and target.
pub(crate) fn arrow(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "->" } else { "→" }
}

/// Marker printed next to components whose last pipeline run failed.
pub(crate) fn failure_marker(config: &OutputConfig) -> String {
    let icon = if config.use_ascii { "x failed" } else { "✗ failed" };
    error(icon, config)
}

/// Get a type icon for component types, with ASCII fallback support.
pub(crate) fn type_icon(component_type: ComponentType, config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        match component_type {
            ComponentType::Database => "#",
            ComponentType::Table => "=",
            ComponentType::View => "o",
            ComponentType::StoredProcedure => "&",
            ComponentType::Activity => ">",
            ComponentType::PowerBiChart => "%",
            ComponentType::Dataset => "*",
        }
    } else {
        match component_type {
            ComponentType::Database => "◆",
            ComponentType::Table => "▦",
            ComponentType::View => "◇",
            ComponentType::StoredProcedure => "ƒ",
            ComponentType::Activity => "▶",
            ComponentType::PowerBiChart => "▤",
            ComponentType::Dataset => "●",
        }
    }
}

/// Get a colored type icon for component types.
pub(crate) fn colored_type_icon(component_type: ComponentType, config: &OutputConfig) -> String {
    let icon = type_icon(component_type, config);
    if !config.use_colors {
        return icon.to_string();
    }
    match component_type {
        ComponentType::Database => icon.blue().bold().to_string(),
        ComponentType::Table => icon.blue().to_string(),
        ComponentType::View => icon.cyan().to_string(),
        ComponentType::StoredProcedure => icon.magenta().to_string(),
        ComponentType::Activity => icon.yellow().to_string(),
        ComponentType::PowerBiChart => icon.green().to_string(),
        ComponentType::Dataset => icon.white().to_string(),
    }
}
