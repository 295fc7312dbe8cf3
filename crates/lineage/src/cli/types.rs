//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for CLI argument parsing
//! and their conversions to domain types.

use clap::ValueEnum;

use crate::domain::{ComponentType, Environment, LineageDirection};

// ============================================================================
// Value Enums
// ============================================================================

/// Traversal direction for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Follow edges against their direction (sources of the root)
    Upstream,
    /// Follow edges along their direction (consumers of the root)
    Downstream,
    /// Both of the above
    Both,
}

impl std::fmt::Display for DirectionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", LineageDirection::from(*self))
    }
}

/// Component type for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentTypeArg {
    /// Database
    Database,
    /// Table
    Table,
    /// View
    View,
    /// Stored procedure
    #[value(name = "stored_procedure", alias = "stored-procedure", alias = "sp")]
    StoredProcedure,
    /// ETL activity
    Activity,
    /// Power BI visual
    #[value(name = "power_bi_chart", alias = "power-bi-chart", alias = "chart")]
    PowerBiChart,
    /// Dataset
    Dataset,
}

impl std::fmt::Display for ComponentTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ComponentType::from(*self))
    }
}

/// Deployment environment for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentArg {
    /// Production
    #[value(alias = "prod")]
    Production,
    /// Pre-production
    #[value(name = "pre-production", alias = "preprod", alias = "test")]
    PreProduction,
}

impl std::fmt::Display for EnvironmentArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Environment::from(*self))
    }
}

// ============================================================================
// Domain Conversions
// ============================================================================

impl From<DirectionArg> for LineageDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Upstream => LineageDirection::Upstream,
            DirectionArg::Downstream => LineageDirection::Downstream,
            DirectionArg::Both => LineageDirection::Both,
        }
    }
}

impl From<ComponentTypeArg> for ComponentType {
    fn from(arg: ComponentTypeArg) -> Self {
        match arg {
            ComponentTypeArg::Database => ComponentType::Database,
            ComponentTypeArg::Table => ComponentType::Table,
            ComponentTypeArg::View => ComponentType::View,
            ComponentTypeArg::StoredProcedure => ComponentType::StoredProcedure,
            ComponentTypeArg::Activity => ComponentType::Activity,
            ComponentTypeArg::PowerBiChart => ComponentType::PowerBiChart,
            ComponentTypeArg::Dataset => ComponentType::Dataset,
        }
    }
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Production => Environment::Production,
            EnvironmentArg::PreProduction => Environment::PreProduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("upstream", LineageDirection::Upstream)]
    #[case("downstream", LineageDirection::Downstream)]
    #[case("both", LineageDirection::Both)]
    fn direction_arg_parses(#[case] input: &str, #[case] expected: LineageDirection) {
        let arg = DirectionArg::from_str(input, false).unwrap();
        assert_eq!(LineageDirection::from(arg), expected);
        assert_eq!(arg.to_string(), input);
    }

    #[rstest]
    #[case("stored_procedure", ComponentType::StoredProcedure)]
    #[case("sp", ComponentType::StoredProcedure)]
    #[case("chart", ComponentType::PowerBiChart)]
    #[case("table", ComponentType::Table)]
    fn component_type_arg_accepts_aliases(#[case] input: &str, #[case] expected: ComponentType) {
        let arg = ComponentTypeArg::from_str(input, false).unwrap();
        assert_eq!(ComponentType::from(arg), expected);
    }

    #[test]
    fn every_component_type_has_an_arg() {
        let converted: Vec<ComponentType> = ComponentTypeArg::value_variants()
            .iter()
            .map(|arg| ComponentType::from(*arg))
            .collect();
        assert_eq!(converted, ComponentType::ALL.to_vec());
    }

    #[rstest]
    #[case("prod", Environment::Production)]
    #[case("pre-production", Environment::PreProduction)]
    #[case("test", Environment::PreProduction)]
    fn environment_arg_accepts_aliases(#[case] input: &str, #[case] expected: Environment) {
        let arg = EnvironmentArg::from_str(input, false).unwrap();
        assert_eq!(Environment::from(arg), expected);
    }
}
