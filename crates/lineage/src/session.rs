//! Current-view bookkeeping for interactive use.
//!
//! A UI recomputes the lineage view on every query change (dragging a depth
//! slider, clicking a new root). Each computation is pure, so a stale one
//! never needs cancelling; it just must not overwrite a newer result. The
//! session hands out increasing [`QueryTicket`]s and only publishes a view
//! whose ticket is newer than the one currently shown, whatever order the
//! computations finish in.
//!
//! # Example
//!
//! ```
//! use lineage::domain::{Component, ComponentType, Environment, LineageDirection, LineageQuery};
//! use lineage::graph::GraphIndex;
//! use lineage::layout::LayoutConfig;
//! use lineage::session::LineageSession;
//!
//! let index = GraphIndex::build(
//!     vec![Component::new("tbl", ComponentType::Table, Environment::Production)],
//!     vec![],
//! );
//! let mut session = LineageSession::new(index, LayoutConfig::default());
//!
//! let older = session.ticket(LineageQuery::new("tbl", LineageDirection::Both, 1));
//! let newer = session.ticket(LineageQuery::new("tbl", LineageDirection::Both, 2));
//!
//! let newer_view = session.compute(&newer);
//! let older_view = session.compute(&older);
//! assert!(session.publish(&newer, newer_view));
//! assert!(!session.publish(&older, older_view));
//! assert_eq!(session.current().unwrap().query.depth, 2);
//! ```

use crate::domain::LineageQuery;
use crate::graph::GraphIndex;
use crate::layout::LayoutConfig;
use crate::view::{self, LineageView};

/// A query stamped with its issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    sequence: u64,
    query: LineageQuery,
}

impl QueryTicket {
    /// Issue order; later tickets have larger numbers.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The stamped query.
    #[must_use]
    pub fn query(&self) -> &LineageQuery {
        &self.query
    }
}

/// Holds the graph index and the view currently on display.
#[derive(Debug)]
pub struct LineageSession {
    index: GraphIndex,
    layout: LayoutConfig,
    next_sequence: u64,
    current: Option<(u64, LineageView)>,
}

impl LineageSession {
    /// Create a session over a built index.
    #[must_use]
    pub fn new(index: GraphIndex, layout: LayoutConfig) -> Self {
        Self {
            index,
            layout,
            next_sequence: 0,
            current: None,
        }
    }

    /// The graph index this session computes over.
    #[must_use]
    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    /// Stamp a new query. Every call supersedes all earlier tickets.
    pub fn ticket(&mut self, query: LineageQuery) -> QueryTicket {
        self.next_sequence += 1;
        QueryTicket {
            sequence: self.next_sequence,
            query,
        }
    }

    /// Compute the view for a ticket without touching session state.
    #[must_use]
    pub fn compute(&self, ticket: &QueryTicket) -> LineageView {
        view::compute_view(&self.index, &ticket.query, &self.layout)
    }

    /// Install `view` as current if `ticket` is newer than the current one.
    ///
    /// Returns `false` and discards the view when a newer result is already
    /// published.
    pub fn publish(&mut self, ticket: &QueryTicket, view: LineageView) -> bool {
        if let Some((sequence, _)) = &self.current {
            if *sequence >= ticket.sequence {
                tracing::debug!(
                    stale = ticket.sequence,
                    current = *sequence,
                    "Discarding superseded lineage view"
                );
                return false;
            }
        }
        self.current = Some((ticket.sequence, view));
        true
    }

    /// Stamp, compute and publish in one step.
    pub fn refresh(&mut self, query: LineageQuery) -> &LineageView {
        let ticket = self.ticket(query);
        let view = self.compute(&ticket);
        &self.current.insert((ticket.sequence, view)).1
    }

    /// The view currently on display.
    #[must_use]
    pub fn current(&self) -> Option<&LineageView> {
        self.current.as_ref().map(|(_, view)| view)
    }
}
