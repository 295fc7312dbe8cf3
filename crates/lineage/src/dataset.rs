//! Dataset loading.
//!
//! A dataset is a single JSON document holding the full component and edge
//! lists:
//!
//! ```json
//! {
//!   "components": [
//!     { "id": "db_billing_prod", "name": "M365BillingSystem-Prod",
//!       "type": "database", "environment": "production" }
//!   ],
//!   "edges": [
//!     { "id": "e1", "source": "db_billing_prod", "target": "tbl_users",
//!       "label": "contains", "type": "references" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::{Component, Edge};
use crate::error::{Error, Result};
use crate::graph::GraphIndex;

/// The bulk component and edge lists of a lineage dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// All components
    #[serde(default)]
    pub components: Vec<Component>,
    /// All edges
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Dataset {
    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the document is not a valid dataset.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Dataset`
    /// if it cannot be parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let dataset: Self = serde_json::from_str(&content).map_err(|source| Error::Dataset {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            components = dataset.components.len(),
            edges = dataset.edges.len(),
            "Loaded dataset"
        );

        Ok(dataset)
    }

    /// Build the graph index, consuming the dataset.
    #[must_use]
    pub fn into_index(self) -> GraphIndex {
        GraphIndex::build(self.components, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComponentType, EdgeType};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "components": [
            { "id": "db", "name": "Billing", "type": "database", "environment": "production" },
            { "id": "tbl", "name": "Users", "type": "table", "environment": "pre-production" }
        ],
        "edges": [
            { "id": "e1", "source": "db", "target": "tbl", "label": "contains", "type": "references" }
        ]
    }"#;

    #[test]
    fn parses_components_and_edges() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.components.len(), 2);
        assert_eq!(dataset.components[0].component_type, ComponentType::Database);
        assert_eq!(dataset.edges[0].edge_type, EdgeType::References);
        assert_eq!(dataset.edges[0].label, "contains");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let dataset = Dataset::from_json("{}").unwrap();
        assert!(dataset.components.is_empty());
        assert!(dataset.edges.is_empty());
    }

    #[test]
    fn unknown_component_type_is_rejected() {
        let json = r#"{ "components": [ { "id": "x", "type": "spreadsheet", "environment": "production" } ] }"#;
        assert!(matches!(Dataset::from_json(json), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lineage.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let index = Dataset::load(&path).await.unwrap().into_index();
        assert_eq!(index.component_count(), 2);
        assert_eq!(index.edge_count(), 1);
    }

    #[tokio::test]
    async fn load_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Dataset::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Dataset::load(&dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
