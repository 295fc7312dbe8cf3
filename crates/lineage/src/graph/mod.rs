//! Graph index over the full component/edge dataset.
//!
//! The index is built once per dataset load and is read-only afterwards.
//! It provides:
//! - O(1) component and edge lookup by id
//! - Precomputed outgoing/incoming adjacency lists in dataset order
//! - A `petgraph` view of the resolvable edges for integrity checks
//!   (cycle detection)
//!
//! Dangling edges (an endpoint missing from the component set) stay in the
//! adjacency lists so traversal can see and report them, but they are left
//! out of the `petgraph` graph.

mod integrity;

pub use integrity::{DatasetStats, IntegrityReport};

use crate::domain::{Component, ComponentId, Edge, EdgeId, Travel};
use crate::warning::Warning;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Read-only lookup structures over a lineage dataset.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    components: Vec<Component>,
    edges: Vec<Edge>,
    component_index: HashMap<ComponentId, usize>,
    edge_index: HashMap<EdgeId, usize>,
    outgoing: HashMap<ComponentId, Vec<usize>>,
    incoming: HashMap<ComponentId, Vec<usize>>,
    degree: HashMap<ComponentId, usize>,
    graph: DiGraph<ComponentId, EdgeId>,
    node_map: HashMap<ComponentId, NodeIndex>,
    warnings: Vec<Warning>,
}

impl GraphIndex {
    /// Build the index in O(V + E).
    ///
    /// Duplicate component or edge ids keep their first occurrence; every
    /// dropped duplicate and every dangling edge is recorded in
    /// [`warnings`](Self::warnings).
    pub fn build(
        components: impl IntoIterator<Item = Component>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let mut index = Self::default();

        for component in components {
            match index.component_index.entry(component.id.clone()) {
                Entry::Occupied(_) => {
                    index.warnings.push(Warning::DuplicateComponentId {
                        component_id: component.id,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(index.components.len());
                    let node = index.graph.add_node(component.id.clone());
                    index.node_map.insert(component.id.clone(), node);
                    index.components.push(component);
                }
            }
        }

        for edge in edges {
            if index.edge_index.contains_key(&edge.id) {
                index
                    .warnings
                    .push(Warning::DuplicateEdgeId { edge_id: edge.id });
                continue;
            }

            let position = index.edges.len();
            index.edge_index.insert(edge.id.clone(), position);
            index
                .outgoing
                .entry(edge.source.clone())
                .or_default()
                .push(position);
            index
                .incoming
                .entry(edge.target.clone())
                .or_default()
                .push(position);

            match (
                index.node_map.get(&edge.source),
                index.node_map.get(&edge.target),
            ) {
                (Some(&from), Some(&to)) => {
                    index.graph.add_edge(from, to, edge.id.clone());
                    *index.degree.entry(edge.source.clone()).or_default() += 1;
                    if edge.target != edge.source {
                        *index.degree.entry(edge.target.clone()).or_default() += 1;
                    }
                }
                (source, _) => {
                    let missing = if source.is_none() {
                        edge.source.clone()
                    } else {
                        edge.target.clone()
                    };
                    index.warnings.push(Warning::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing,
                    });
                }
            }

            index.edges.push(edge);
        }

        for warning in &index.warnings {
            tracing::warn!(kind = warning.kind(), "{warning}");
        }
        tracing::debug!(
            components = index.components.len(),
            edges = index.edges.len(),
            warnings = index.warnings.len(),
            "Built graph index"
        );

        index
    }

    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.component_index.get(id).map(|&i| &self.components[i])
    }

    /// Whether a component with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.component_index.contains_key(id)
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// Edges whose source is `id`, in dataset order.
    pub fn outgoing_edges<'a>(
        &'a self,
        id: &ComponentId,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.adjacent(&self.outgoing, id)
    }

    /// Edges whose target is `id`, in dataset order.
    pub fn incoming_edges<'a>(
        &'a self,
        id: &ComponentId,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.adjacent(&self.incoming, id)
    }

    /// Edges to follow when walking away from `id` in `travel` direction.
    ///
    /// Upstream walks use the incoming list, downstream walks the outgoing
    /// list.
    pub fn edges_toward<'a>(
        &'a self,
        id: &ComponentId,
        travel: Travel,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        let lists = match travel {
            Travel::Upstream => &self.incoming,
            Travel::Downstream => &self.outgoing,
        };
        self.adjacent(lists, id)
    }

    fn adjacent<'a>(
        &'a self,
        lists: &'a HashMap<ComponentId, Vec<usize>>,
        id: &ComponentId,
    ) -> impl Iterator<Item = &'a Edge> + use<'a> {
        lists
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&i| &self.edges[i])
    }

    /// Number of resolvable edges touching `id` (a self-loop counts once).
    ///
    /// Dangling edges are not counted.
    #[must_use]
    pub fn degree(&self, id: &ComponentId) -> usize {
        self.degree.get(id).copied().unwrap_or(0)
    }

    /// All components, in dataset order with duplicates removed.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All edges, in dataset order with duplicates removed.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of distinct components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Problems found while building the index.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
