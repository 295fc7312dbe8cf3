//! Hierarchical layout of a lineage subgraph.
//!
//! Components are placed in vertical columns by level: upstream levels to
//! the left of the root, downstream levels to the right, the root at the
//! origin. Within a column the best-connected components sit closest to the
//! vertical center.
//!
//! # Algorithm
//!
//! 1. Group components by level; a column's x is `level * horizontal_spacing`.
//! 2. Order each column by incident-edge count over the whole dataset
//!    (descending, dangling edges excluded), then by incident edges inside
//!    the view (descending), then by id.
//! 3. Fill slots `vertical_spacing` apart, centered on y = 0, handing out
//!    the middle slot first and alternating below/above outwards.
//! 4. Resolve overlaps: columns are re-derived from x, sorted by y, and any
//!    component closer than `min_vertical_gap` to its predecessor is pushed
//!    down by the shortfall. This runs `resolve_passes` times.
//!
//! The output depends only on the inputs; there is no randomness and every
//! ordering decision ends in an id comparison.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{ComponentId, EdgeId, Position};
use crate::error::{Error, Result};
use crate::graph::GraphIndex;

/// Default distance between adjacent level columns.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 400.0;

/// Default distance between adjacent slots in a column.
pub const DEFAULT_VERTICAL_SPACING: f64 = 180.0;

/// Default minimum vertical distance between components in a column.
pub const DEFAULT_MIN_VERTICAL_GAP: f64 = 140.0;

/// Default number of overlap-resolution passes.
pub const DEFAULT_RESOLVE_PASSES: u32 = 2;

/// Computed coordinates, keyed by component id.
pub type Positions = BTreeMap<ComponentId, Position>;

/// Spacing constants for the hierarchical layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LayoutConfig {
    /// Distance between adjacent level columns.
    pub horizontal_spacing: f64,
    /// Distance between adjacent slots in a column.
    pub vertical_spacing: f64,
    /// Minimum vertical distance between components in a column.
    pub min_vertical_gap: f64,
    /// Number of overlap-resolution passes.
    pub resolve_passes: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            min_vertical_gap: DEFAULT_MIN_VERTICAL_GAP,
            resolve_passes: DEFAULT_RESOLVE_PASSES,
        }
    }
}

impl LayoutConfig {
    /// Check that the constants describe a usable layout.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a spacing is not finite and positive, the
    /// gap is negative or not finite, or no resolution pass is requested.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("horizontal-spacing", self.horizontal_spacing),
            ("vertical-spacing", self.vertical_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "layout.{name} must be a positive number, got {value}"
                )));
            }
        }

        if !self.min_vertical_gap.is_finite() || self.min_vertical_gap < 0.0 {
            return Err(Error::Config(format!(
                "layout.min-vertical-gap must be zero or positive, got {}",
                self.min_vertical_gap
            )));
        }

        if self.resolve_passes == 0 {
            return Err(Error::Config(
                "layout.resolve-passes must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Column index a horizontal coordinate belongs to.
    #[allow(clippy::cast_possible_truncation)]
    fn column_of(&self, x: f64) -> i64 {
        (x / self.horizontal_spacing).round() as i64
    }
}

/// Assign a position to every component in `components`.
///
/// `levels` comes from traversal; a component without a level is seeded at
/// the origin and still takes part in overlap resolution. `index` supplies
/// the resolvable edges that drive the within-column ordering together with
/// `included_edges`; dangling edges play no part.
#[must_use]
pub fn layout(
    components: &BTreeSet<ComponentId>,
    included_edges: &BTreeSet<EdgeId>,
    levels: &BTreeMap<ComponentId, i32>,
    index: &GraphIndex,
    config: &LayoutConfig,
) -> Positions {
    let in_view = in_view_degree(index, included_edges);
    let connections = |id: &ComponentId| {
        (
            index.degree(id),
            in_view.get(id).copied().unwrap_or_default(),
        )
    };

    let mut columns: BTreeMap<i32, Vec<&ComponentId>> = BTreeMap::new();
    let mut positions = Positions::new();

    for id in components {
        if let Some(&level) = levels.get(id) {
            columns.entry(level).or_default().push(id);
        } else {
            tracing::warn!(component = %id, "Component has no level; placing at origin");
            positions.insert(id.clone(), Position::default());
        }
    }

    for (level, mut ids) in columns {
        ids.sort_by(|a, b| {
            connections(*b)
                .cmp(&connections(*a))
                .then_with(|| a.cmp(b))
        });

        let x = f64::from(level) * config.horizontal_spacing;
        let count = ids.len();
        for (id, slot) in ids.into_iter().zip(center_out_slots(count)) {
            let y = slot_offset(slot, count) * config.vertical_spacing;
            positions.insert(id.clone(), Position::new(x, y));
        }
    }

    resolve_overlaps(&mut positions, config);
    positions
}

/// Incident edge counts per component, restricted to `included_edges`.
///
/// A self-loop counts once.
fn in_view_degree<'a>(
    index: &'a GraphIndex,
    included_edges: &BTreeSet<EdgeId>,
) -> HashMap<&'a ComponentId, usize> {
    let mut counts: HashMap<&ComponentId, usize> = HashMap::new();
    for edge in included_edges.iter().filter_map(|id| index.edge(id)) {
        *counts.entry(&edge.source).or_default() += 1;
        if edge.target != edge.source {
            *counts.entry(&edge.target).or_default() += 1;
        }
    }
    counts
}

/// Slot indices in the order they are handed out: middle first, then
/// alternating one below and one above.
///
/// For 5 slots this yields `2, 3, 1, 4, 0`.
fn center_out_slots(count: usize) -> impl Iterator<Item = usize> {
    let middle = count.saturating_sub(1) / 2;
    (0..count).map(move |k| {
        let offset = k.div_ceil(2);
        if k % 2 == 1 {
            middle + offset
        } else {
            middle - offset
        }
    })
}

/// Signed distance of `slot` from the column center, in slot units.
#[allow(clippy::cast_precision_loss)]
fn slot_offset(slot: usize, count: usize) -> f64 {
    slot as f64 - count.saturating_sub(1) as f64 / 2.0
}

/// Push apart components that sit closer than `min_vertical_gap` in the
/// same column.
///
/// Columns are re-derived from x so the pass stays correct even when
/// positions were not produced by level assignment.
fn resolve_overlaps(positions: &mut Positions, config: &LayoutConfig) {
    for pass in 0..config.resolve_passes {
        let mut columns: BTreeMap<i64, Vec<(ComponentId, f64)>> = BTreeMap::new();
        for (id, position) in positions.iter() {
            columns
                .entry(config.column_of(position.x))
                .or_default()
                .push((id.clone(), position.y));
        }

        let mut moved = 0usize;
        for column in columns.values_mut() {
            column.sort_by(|(a_id, a_y), (b_id, b_y)| {
                a_y.total_cmp(b_y).then_with(|| a_id.cmp(b_id))
            });

            for i in 1..column.len() {
                let previous = column[i - 1].1;
                let (id, y) = &mut column[i];
                if *y - previous < config.min_vertical_gap {
                    *y = previous + config.min_vertical_gap;
                    if let Some(position) = positions.get_mut(id) {
                        position.y = *y;
                    }
                    moved += 1;
                }
            }
        }

        tracing::trace!(pass, moved, "Overlap resolution pass");
    }
}
