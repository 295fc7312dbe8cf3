//! Lineage - upstream/downstream lineage for data-platform components.
//!
//! Given the full component/edge graph of a data platform, a root
//! component, a direction and a depth bound, this crate selects the
//! reachable subgraph ([`compute_lineage`]) and assigns every included
//! component a 2D position grouped by distance from the root ([`layout()`]).
//! Both are pure functions of the read-only [`GraphIndex`] and the query.
//!
//! # Example
//!
//! ```
//! use lineage::domain::{Component, ComponentType, Edge, EdgeType, Environment};
//! use lineage::{GraphIndex, LayoutConfig, LineageDirection, LineageQuery, compute_view};
//!
//! let index = GraphIndex::build(
//!     vec![
//!         Component::new("db", ComponentType::Database, Environment::Production),
//!         Component::new("tbl", ComponentType::Table, Environment::Production),
//!     ],
//!     vec![Edge::new("e1", "db", "tbl", EdgeType::References)],
//! );
//!
//! let query = LineageQuery::new("tbl", LineageDirection::Upstream, 2);
//! let view = compute_view(&index, &query, &LayoutConfig::default());
//! assert_eq!(view.nodes.len(), 2);
//! assert_eq!(view.nodes[0].position.x, -400.0);
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod graph;
pub mod layout;
pub mod search;
pub mod session;
pub mod traversal;
pub mod view;
pub mod warning;

// Public CLI modules (needed by binary)
pub mod app;
pub mod cli;
pub mod output;

pub use domain::{LineageDirection, LineageQuery};
pub use graph::GraphIndex;
pub use layout::{LayoutConfig, Positions, layout};
pub use traversal::{LineageResult, compute_lineage};
pub use view::{LineageView, compute_view};
pub use warning::Warning;
