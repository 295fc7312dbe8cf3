//! Dataset integrity checks and summary statistics.
//!
//! Cycles are legal in a lineage graph (traversal terminates regardless),
//! but they usually point at a modelling mistake, so the report lists them
//! next to dangling edges and duplicate ids.

use std::collections::BTreeMap;

use petgraph::algo;
use serde::Serialize;

use super::GraphIndex;
use crate::domain::{ComponentId, ComponentType, Environment};
use crate::warning::Warning;

/// Result of checking a dataset for structural problems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// Dangling edges and duplicate ids found while indexing.
    pub warnings: Vec<Warning>,
    /// Groups of components that can reach each other, each sorted by id.
    pub cycles: Vec<Vec<ComponentId>>,
}

impl IntegrityReport {
    /// `true` if no problems were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.cycles.is_empty()
    }

    /// Total number of problems.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.warnings.len() + self.cycles.len()
    }
}

/// Component and edge counts for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Number of distinct components.
    pub components: usize,
    /// Number of distinct edges.
    pub edges: usize,
    /// Components per type.
    pub by_type: BTreeMap<ComponentType, usize>,
    /// Components per environment.
    pub by_environment: BTreeMap<Environment, usize>,
    /// Components whose last pipeline run failed.
    pub failed: usize,
}

impl GraphIndex {
    /// Check the dataset for dangling edges, duplicate ids and cycles.
    ///
    /// Cycle detection uses Tarjan's strongly connected components over the
    /// resolvable edges. A component with a self-loop is a cycle of one.
    #[must_use]
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut cycles: Vec<Vec<ComponentId>> = algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|&n| self.graph.contains_edge(n, n))
            })
            .map(|scc| {
                let mut ids: Vec<ComponentId> =
                    scc.into_iter().map(|n| self.graph[n].clone()).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();

        IntegrityReport {
            warnings: self.warnings.clone(),
            cycles,
        }
    }

    /// Summary counts over the dataset.
    #[must_use]
    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            components: self.component_count(),
            edges: self.edge_count(),
            ..DatasetStats::default()
        };

        for component in self.components() {
            *stats.by_type.entry(component.component_type).or_default() += 1;
            *stats
                .by_environment
                .entry(component.environment)
                .or_default() += 1;
            if component.has_failed {
                stats.failed += 1;
            }
        }

        stats
    }
}
