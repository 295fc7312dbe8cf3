//! Non-fatal data-integrity warnings.
//!
//! Lineage computation degrades gracefully instead of failing: a dangling
//! edge is treated as a dead end, a duplicate id keeps its first
//! occurrence, an unknown root yields an empty view. Each of these is
//! reported as a [`Warning`] so the caller always has a trace of what was
//! excluded.
//!
//! # Examples
//!
//! ```
//! use lineage::domain::{ComponentId, EdgeId};
//! use lineage::warning::Warning;
//!
//! let warning = Warning::DanglingEdge {
//!     edge_id: EdgeId::new("e7"),
//!     missing: ComponentId::new("tbl_gone"),
//! };
//! assert_eq!(warning.kind(), "dangling_edge");
//! assert!(warning.description().contains("tbl_gone"));
//! ```

use serde::Serialize;

use crate::domain::{ComponentId, EdgeId};

/// A non-fatal problem found while indexing or traversing the graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The query root is not present in the component set.
    UnknownRoot {
        /// The requested root id.
        root: ComponentId,
    },

    /// An edge references a component id that does not exist.
    ///
    /// The edge is skipped during traversal and never reported as included.
    DanglingEdge {
        /// The offending edge.
        edge_id: EdgeId,
        /// The endpoint that could not be resolved.
        missing: ComponentId,
    },

    /// A second edge with an already-seen id was dropped.
    DuplicateEdgeId {
        /// The repeated edge id.
        edge_id: EdgeId,
    },

    /// A second component with an already-seen id was dropped.
    DuplicateComponentId {
        /// The repeated component id.
        component_id: ComponentId,
    },

    /// The requested depth was below 1 and was raised to 1.
    DepthClamped {
        /// Depth as requested.
        requested: u32,
        /// Depth actually used.
        applied: u32,
    },
}

impl Warning {
    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::UnknownRoot { root } => {
                format!("root component '{root}' does not exist; nothing to display")
            }
            Self::DanglingEdge { edge_id, missing } => {
                format!("edge '{edge_id}' references missing component '{missing}'")
            }
            Self::DuplicateEdgeId { edge_id } => {
                format!("duplicate edge id '{edge_id}'; keeping the first occurrence")
            }
            Self::DuplicateComponentId { component_id } => {
                format!("duplicate component id '{component_id}'; keeping the first occurrence")
            }
            Self::DepthClamped { requested, applied } => {
                format!("depth {requested} is below the minimum; using {applied}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// Useful for grouping warnings without matching on the variants.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownRoot { .. } => "unknown_root",
            Self::DanglingEdge { .. } => "dangling_edge",
            Self::DuplicateEdgeId { .. } => "duplicate_edge_id",
            Self::DuplicateComponentId { .. } => "duplicate_component_id",
            Self::DepthClamped { .. } => "depth_clamped",
        }
    }

    /// The edge this warning is about, if any.
    #[must_use]
    pub fn edge_id(&self) -> Option<&EdgeId> {
        match self {
            Self::DanglingEdge { edge_id, .. } | Self::DuplicateEdgeId { edge_id } => Some(edge_id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Warning::UnknownRoot { root: ComponentId::new("x") }, "unknown_root")]
    #[case(
        Warning::DanglingEdge { edge_id: EdgeId::new("e1"), missing: ComponentId::new("x") },
        "dangling_edge"
    )]
    #[case(Warning::DuplicateEdgeId { edge_id: EdgeId::new("e1") }, "duplicate_edge_id")]
    #[case(
        Warning::DuplicateComponentId { component_id: ComponentId::new("x") },
        "duplicate_component_id"
    )]
    #[case(Warning::DepthClamped { requested: 0, applied: 1 }, "depth_clamped")]
    fn kind_is_stable(#[case] warning: Warning, #[case] expected: &str) {
        assert_eq!(warning.kind(), expected);
    }

    #[test]
    fn display_matches_description() {
        let warning = Warning::DepthClamped {
            requested: 0,
            applied: 1,
        };
        assert_eq!(warning.to_string(), warning.description());
        assert!(warning.to_string().contains("using 1"));
    }

    #[test]
    fn edge_id_only_for_edge_warnings() {
        let dangling = Warning::DanglingEdge {
            edge_id: EdgeId::new("e9"),
            missing: ComponentId::new("gone"),
        };
        assert_eq!(dangling.edge_id().map(EdgeId::as_str), Some("e9"));

        let root = Warning::UnknownRoot {
            root: ComponentId::new("gone"),
        };
        assert!(root.edge_id().is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let warning = Warning::DuplicateEdgeId {
            edge_id: EdgeId::new("e2"),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "duplicate_edge_id");
        assert_eq!(json["edge_id"], "e2");
    }
}
