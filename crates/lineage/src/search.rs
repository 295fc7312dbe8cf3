//! Component search and filtering.
//!
//! Used to find a root for a lineage query: a free-text match over the
//! descriptive fields combined with type, environment and failure filters.

use std::collections::BTreeSet;

use crate::domain::{Component, ComponentType, Environment};
use crate::graph::GraphIndex;

/// Criteria for selecting components. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFilter {
    /// Case-insensitive substring matched against name, id, database,
    /// datatype and endpoint.
    pub text: Option<String>,
    /// Allowed types; empty allows all.
    pub types: BTreeSet<ComponentType>,
    /// Allowed environments; empty allows all.
    pub environments: BTreeSet<Environment>,
    /// Keep only components whose last pipeline run failed.
    pub failed_only: bool,
}

impl ComponentFilter {
    /// Whether `component` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, component: &Component) -> bool {
        self.matches_text(component)
            && (self.types.is_empty() || self.types.contains(&component.component_type))
            && (self.environments.is_empty()
                || self.environments.contains(&component.environment))
            && (!self.failed_only || component.has_failed)
    }

    fn matches_text(&self, component: &Component) -> bool {
        let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = text.to_lowercase();

        [
            Some(component.name.as_str()),
            Some(component.id.as_str()),
            component.database.as_deref(),
            component.datatype.as_deref(),
            component.endpoint.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Components matching `filter`, in dataset order.
#[must_use]
pub fn search<'a>(index: &'a GraphIndex, filter: &ComponentFilter) -> Vec<&'a Component> {
    index
        .components()
        .iter()
        .filter(|c| filter.matches(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureDetails;
    use rstest::rstest;

    fn index() -> GraphIndex {
        let mut users = Component::new("tbl_users", ComponentType::Table, Environment::Production)
            .with_name("Users");
        users.database = Some("M365BillingSystem".to_string());

        let history = Component::new(
            "tbl_billing_history",
            ComponentType::Table,
            Environment::Production,
        )
        .with_name("BillingHistory")
        .with_failure(FailureDetails {
            pipeline_name: "Daily-Billing-ETL".to_string(),
            failure_time: "2024-01-15 08:30:00".to_string(),
            failure_count: 3,
            status: "Failed".to_string(),
        });

        let mut test_db = Component::new(
            "db_customer_test",
            ComponentType::Database,
            Environment::PreProduction,
        )
        .with_name("CustomerData-Test");
        test_db.endpoint = Some("spo-ba-test.database.windows.net".to_string());

        GraphIndex::build(vec![users, history, test_db], vec![])
    }

    fn ids(found: &[&Component]) -> Vec<String> {
        found.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn default_filter_matches_everything() {
        let index = index();
        assert_eq!(search(&index, &ComponentFilter::default()).len(), 3);
    }

    #[rstest]
    #[case("users", vec!["tbl_users"])]
    #[case("BILLING", vec!["tbl_users", "tbl_billing_history"])]
    #[case("windows.net", vec!["db_customer_test"])]
    #[case("   ", vec!["tbl_users", "tbl_billing_history", "db_customer_test"])]
    #[case("nothing-matches", vec![])]
    fn text_matches_descriptive_fields(#[case] text: &str, #[case] expected: Vec<&str>) {
        let index = index();
        let filter = ComponentFilter {
            text: Some(text.to_string()),
            ..ComponentFilter::default()
        };
        assert_eq!(ids(&search(&index, &filter)), expected);
    }

    #[test]
    fn type_and_environment_filters_combine() {
        let index = index();
        let filter = ComponentFilter {
            types: BTreeSet::from([ComponentType::Table, ComponentType::Database]),
            environments: BTreeSet::from([Environment::PreProduction]),
            ..ComponentFilter::default()
        };
        assert_eq!(ids(&search(&index, &filter)), vec!["db_customer_test"]);
    }

    #[test]
    fn failed_only_keeps_failures() {
        let index = index();
        let filter = ComponentFilter {
            failed_only: true,
            ..ComponentFilter::default()
        };
        assert_eq!(ids(&search(&index, &filter)), vec!["tbl_billing_history"]);
    }
}
