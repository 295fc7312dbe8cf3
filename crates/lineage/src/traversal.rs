//! Lineage traversal.
//!
//! Selects the subgraph reachable from a root within a hop limit and
//! assigns each included component a signed level: 0 for the root,
//! negative for upstream steps and positive for downstream steps.
//!
//! # Algorithm
//!
//! Each travel direction is walked breadth-first from the root with an
//! explicit queue. The visited set is keyed by `(component, travel)`, so a
//! component can appear on both sides of the root when the direction is
//! `Both` while cycles still terminate: every `(component, travel)` pair is
//! expanded at most once.
//!
//! Every edge inspected while expanding a component is included, even
//! when it leads to an already-visited component. This keeps cross-links
//! inside the explored frontier, not just the discovery tree. Components
//! at exactly `depth` hops are included but not expanded, so every included
//! edge has both endpoints included.
//!
//! # Level tie-break
//!
//! A component reachable at several levels keeps the one with the smallest
//! absolute value; on an absolute tie the larger (downstream) level wins.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use crate::domain::{ComponentId, EdgeId, LineageQuery, Travel};
use crate::graph::GraphIndex;
use crate::warning::Warning;

/// The subgraph selected by a lineage query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineageResult {
    /// The query root, if one was set.
    pub root: Option<ComponentId>,
    /// Components reachable within the depth limit, root included.
    pub components: BTreeSet<ComponentId>,
    /// Edges inspected while expanding included components.
    pub edges: BTreeSet<EdgeId>,
    /// Signed distance from the root for every included component.
    pub levels: BTreeMap<ComponentId, i32>,
    /// Degraded conditions met during traversal.
    pub warnings: Vec<Warning>,
}

impl LineageResult {
    /// Level of an included component.
    #[must_use]
    pub fn level_of(&self, id: &ComponentId) -> Option<i32> {
        self.levels.get(id).copied()
    }

    /// Whether the component was included.
    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains(id)
    }

    /// `true` when there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Compute the lineage subgraph for `query`.
///
/// This is a pure function of its inputs: all working state is local to the
/// call. It never fails; an absent root gives an empty result, an unknown
/// root an empty result with an [`Warning::UnknownRoot`], and dangling edges
/// are skipped and reported.
#[must_use]
pub fn compute_lineage(index: &GraphIndex, query: &LineageQuery) -> LineageResult {
    let Some(root) = &query.root else {
        return LineageResult::default();
    };

    let mut result = LineageResult {
        root: Some(root.clone()),
        ..LineageResult::default()
    };

    if !index.contains(root) {
        tracing::warn!(root = %root, "Lineage root not found");
        result.warnings.push(Warning::UnknownRoot { root: root.clone() });
        return result;
    }

    let depth = query.effective_depth();
    let mut warnings = BTreeSet::new();
    if depth != query.depth {
        tracing::warn!(requested = query.depth, applied = depth, "Clamping lineage depth");
        warnings.insert(Warning::DepthClamped {
            requested: query.depth,
            applied: depth,
        });
    }

    let mut visited: HashSet<(ComponentId, Travel)> = HashSet::new();
    for &travel in query.direction.travels() {
        walk(
            index,
            root,
            travel,
            depth,
            &mut visited,
            &mut result,
            &mut warnings,
        );
    }

    result.components.insert(root.clone());
    result.levels.insert(root.clone(), 0);
    result.warnings = warnings.into_iter().collect();

    tracing::debug!(
        root = %root,
        direction = %query.direction,
        depth,
        components = result.components.len(),
        edges = result.edges.len(),
        warnings = result.warnings.len(),
        "Computed lineage"
    );

    result
}

/// Breadth-first walk from `root` in a single travel direction.
fn walk(
    index: &GraphIndex,
    root: &ComponentId,
    travel: Travel,
    depth: u32,
    visited: &mut HashSet<(ComponentId, Travel)>,
    result: &mut LineageResult,
    warnings: &mut BTreeSet<Warning>,
) {
    let mut queue: VecDeque<(ComponentId, u32)> = VecDeque::from([(root.clone(), 0)]);

    while let Some((id, hops)) = queue.pop_front() {
        if hops > depth || !visited.insert((id.clone(), travel)) {
            continue;
        }

        record_level(&mut result.levels, &id, travel.level(hops));
        result.components.insert(id.clone());

        if hops == depth {
            continue;
        }

        for edge in index.edges_toward(&id, travel) {
            let next = edge.next_hop(travel);
            if !index.contains(next) {
                warnings.insert(Warning::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing: next.clone(),
                });
                continue;
            }

            result.edges.insert(edge.id.clone());
            if !visited.contains(&(next.clone(), travel)) {
                queue.push_back((next.clone(), hops + 1));
            }
        }
    }
}

fn record_level(levels: &mut BTreeMap<ComponentId, i32>, id: &ComponentId, candidate: i32) {
    levels
        .entry(id.clone())
        .and_modify(|level| *level = preferred_level(*level, candidate))
        .or_insert(candidate);
}

/// Pick between two levels for the same component.
///
/// Smaller absolute value wins; on a tie the larger level wins.
#[must_use]
pub fn preferred_level(current: i32, candidate: i32) -> i32 {
    match current.unsigned_abs().cmp(&candidate.unsigned_abs()) {
        std::cmp::Ordering::Less => current,
        std::cmp::Ordering::Greater => candidate,
        std::cmp::Ordering::Equal => current.max(candidate),
    }
}
