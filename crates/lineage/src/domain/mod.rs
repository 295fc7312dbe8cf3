//! Domain types for lineage exploration.
//!
//! This module contains the components and edges of the lineage graph as
//! they are loaded from a dataset, plus the query and position types the
//! traversal and layout stages exchange.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a component
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    /// Create a new component ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new edge ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A data-platform entity in the lineage graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique identifier
    pub id: ComponentId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Kind of entity
    #[serde(rename = "type")]
    pub component_type: ComponentType,

    /// Deployment environment
    pub environment: Environment,

    /// Data type label (e.g. "Table", "LineChart")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    /// Owning database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Server endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Whether the last pipeline run touching this component failed
    #[serde(default)]
    pub has_failed: bool,

    /// Details about the most recent failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_details: Option<FailureDetails>,

    /// Dashboard containing the visual (Power BI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_name: Option<String>,

    /// Dashboard page containing the visual (Power BI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    /// Visual type (Power BI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
}

impl Component {
    /// Create a component with only the required fields set.
    pub fn new(
        id: impl Into<ComponentId>,
        component_type: ComponentType,
        environment: Environment,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            component_type,
            environment,
            datatype: None,
            database: None,
            endpoint: None,
            has_failed: false,
            failure_details: None,
            dashboard_name: None,
            page_name: None,
            chart_type: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark the component as failed with the given details.
    #[must_use]
    pub fn with_failure(mut self, details: FailureDetails) -> Self {
        self.has_failed = true;
        self.failure_details = Some(details);
        self
    }
}

/// Failure annotation attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetails {
    /// Pipeline that failed
    pub pipeline_name: String,
    /// Timestamp of the failure, as reported by the pipeline
    pub failure_time: String,
    /// Number of consecutive failures
    pub failure_count: u32,
    /// Pipeline status text
    pub status: String,
}

/// Kind of data-platform entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// A database server/catalog
    Database,
    /// A table
    Table,
    /// A view
    View,
    /// A stored procedure
    StoredProcedure,
    /// An ETL activity
    Activity,
    /// A Power BI visual
    PowerBiChart,
    /// A dataset
    Dataset,
}

impl ComponentType {
    /// All component types in display order.
    pub const ALL: [ComponentType; 7] = [
        Self::Database,
        Self::Table,
        Self::View,
        Self::StoredProcedure,
        Self::Activity,
        Self::PowerBiChart,
        Self::Dataset,
    ];
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Table => write!(f, "table"),
            Self::View => write!(f, "view"),
            Self::StoredProcedure => write!(f, "stored_procedure"),
            Self::Activity => write!(f, "activity"),
            Self::PowerBiChart => write!(f, "power_bi_chart"),
            Self::Dataset => write!(f, "dataset"),
        }
    }
}

/// Deployment environment of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Production
    Production,
    /// Pre-production (test, staging)
    PreProduction,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::PreProduction => write!(f, "pre-production"),
        }
    }
}

/// A directed relationship between two components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,
    /// Component the data flows from
    pub source: ComponentId,
    /// Component the data flows to
    pub target: ComponentId,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Relationship kind
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Whether the presenter should animate this edge
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

impl Edge {
    /// Create an edge whose label matches its type.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<ComponentId>,
        target: impl Into<ComponentId>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: edge_type.to_string(),
            edge_type,
            animated: false,
        }
    }

    /// The other endpoint when walking this edge in `travel` direction.
    #[must_use]
    pub fn next_hop(&self, travel: Travel) -> &ComponentId {
        match travel {
            Travel::Upstream => &self.source,
            Travel::Downstream => &self.target,
        }
    }
}

/// Relationship kind of an edge (display styling only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Target reads from source
    Reads,
    /// Source writes into target
    Writes,
    /// Source uses target
    Uses,
    /// Source references target
    References,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reads => write!(f, "reads"),
            Self::Writes => write!(f, "writes"),
            Self::Uses => write!(f, "uses"),
            Self::References => write!(f, "references"),
        }
    }
}

/// Which side of the root a lineage query explores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineageDirection {
    /// Ancestors only
    Upstream,
    /// Descendants only
    Downstream,
    /// Ancestors and descendants
    #[default]
    Both,
}

impl LineageDirection {
    /// The travel directions this query walks, upstream first.
    #[must_use]
    pub fn travels(self) -> &'static [Travel] {
        match self {
            Self::Upstream => &[Travel::Upstream],
            Self::Downstream => &[Travel::Downstream],
            Self::Both => &[Travel::Upstream, Travel::Downstream],
        }
    }
}

impl fmt::Display for LineageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream => write!(f, "upstream"),
            Self::Downstream => write!(f, "downstream"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Direction of a single traversal walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Travel {
    /// Against edge direction, towards sources
    Upstream,
    /// Along edge direction, towards consumers
    Downstream,
}

impl Travel {
    /// Signed level of a node `hops` steps away in this direction.
    #[must_use]
    pub fn level(self, hops: u32) -> i32 {
        let hops = i32::try_from(hops).unwrap_or(i32::MAX);
        match self {
            Self::Upstream => -hops,
            Self::Downstream => hops,
        }
    }
}

/// Parameters of a lineage view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageQuery {
    /// Component to center the view on; `None` means no view
    pub root: Option<ComponentId>,
    /// Which side(s) of the root to explore
    pub direction: LineageDirection,
    /// Maximum number of hops from the root
    pub depth: u32,
}

impl LineageQuery {
    /// Create a query rooted at `root`.
    pub fn new(root: impl Into<ComponentId>, direction: LineageDirection, depth: u32) -> Self {
        Self {
            root: Some(root.into()),
            direction,
            depth,
        }
    }

    /// A query with no root selected.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: None,
            direction: LineageDirection::default(),
            depth: 1,
        }
    }

    /// Depth used by traversal: values below 1 are clamped to 1.
    #[must_use]
    pub fn effective_depth(&self) -> u32 {
        self.depth.max(1)
    }
}

/// A 2D layout coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate; grows downstream
    pub x: f64,
    /// Vertical coordinate; grows downward
    pub y: f64,
}

impl Position {
    /// Create a position
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
