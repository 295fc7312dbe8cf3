//! Positioned lineage view handed to presenters.
//!
//! A [`LineageView`] joins a [`LineageResult`] and its [`Positions`] back to
//! the full component and edge records, producing the filtered node and
//! edge lists a renderer draws.

use serde::Serialize;

use crate::domain::{Component, Edge, LineageQuery, Position};
use crate::graph::GraphIndex;
use crate::layout::{self, LayoutConfig, Positions};
use crate::traversal::{self, LineageResult};
use crate::warning::Warning;

/// A component placed in the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    /// The full component record.
    pub component: Component,
    /// Signed distance from the root.
    pub level: i32,
    /// Layout coordinate.
    pub position: Position,
    /// Whether this is the query root.
    pub is_root: bool,
}

/// Everything a presenter needs to draw one lineage query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageView {
    /// The query this view answers.
    pub query: LineageQuery,
    /// Placed components, ordered by level, then y, then id.
    pub nodes: Vec<ViewNode>,
    /// Included edges, ordered by id.
    pub edges: Vec<Edge>,
    /// Degraded conditions met while computing the view.
    pub warnings: Vec<Warning>,
}

impl LineageView {
    /// Assemble a view from traversal and layout output.
    ///
    /// Ids that do not resolve in `index` are dropped.
    #[must_use]
    pub fn build(
        index: &GraphIndex,
        query: &LineageQuery,
        result: &LineageResult,
        positions: &Positions,
    ) -> Self {
        let mut nodes: Vec<ViewNode> = result
            .components
            .iter()
            .filter_map(|id| {
                let component = index.component(id)?;
                Some(ViewNode {
                    component: component.clone(),
                    level: result.level_of(id).unwrap_or(0),
                    position: positions.get(id).copied().unwrap_or_default(),
                    is_root: result.root.as_ref() == Some(id),
                })
            })
            .collect();
        nodes.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then_with(|| a.position.y.total_cmp(&b.position.y))
                .then_with(|| a.component.id.cmp(&b.component.id))
        });

        let edges = result
            .edges
            .iter()
            .filter_map(|id| index.edge(id).cloned())
            .collect();

        Self {
            query: query.clone(),
            nodes,
            edges,
            warnings: result.warnings.clone(),
        }
    }

    /// `true` when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if the view has one.
    #[must_use]
    pub fn root(&self) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.is_root)
    }

    /// Distinct levels present in the view, ascending.
    #[must_use]
    pub fn levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.nodes.iter().map(|n| n.level).collect();
        levels.dedup();
        levels
    }

    /// Nodes at a given level, top to bottom.
    pub fn nodes_at(&self, level: i32) -> impl Iterator<Item = &ViewNode> {
        self.nodes.iter().filter(move |n| n.level == level)
    }
}

/// Run traversal and layout for `query` and assemble the view.
#[must_use]
pub fn compute_view(index: &GraphIndex, query: &LineageQuery, config: &LayoutConfig) -> LineageView {
    let result = traversal::compute_lineage(index, query);
    let positions = layout::layout(
        &result.components,
        &result.edges,
        &result.levels,
        index,
        config,
    );
    LineageView::build(index, query, &result, &positions)
}

/// Human-readable label for a level column.
#[must_use]
pub fn level_label(level: i32) -> String {
    match level.signum() {
        0 => "root".to_string(),
        -1 => format!("upstream {}", level.unsigned_abs()),
        _ => format!("downstream {level}"),
    }
}
