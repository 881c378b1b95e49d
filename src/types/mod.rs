//! Identifier newtypes and the crate-wide error type.

use std::fmt;

/// Opaque handle identifying a graph vertex.
///
/// The engine never interprets the value; payloads such as coordinates or labels
/// live in caller-owned side tables keyed by `NodeId`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct NodeId(pub u64);

/// Non-owning handle to a [`Link`](crate::storage::Link) owned by a graph.
///
/// The generation makes handles to removed links detectably stale even after
/// their slot has been reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LinkId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl LinkId {
    /// Slot index inside the owning graph's link table.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation counter of the slot at the time the link was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.slot, self.generation)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for u64 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Errors surfaced by the registry, the graph store, and the search engine.
///
/// Every variant is local and recoverable; unreachable goals are not errors and
/// are reported through `Ok(None)` by the navigator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The identifier registry is at its fixed capacity.
    #[error("registry full: capacity {capacity} exhausted")]
    CapacityExhausted {
        /// Fixed registry capacity.
        capacity: usize,
    },
    /// An explicit id was registered twice.
    #[error("node {0} already registered")]
    DuplicateId(NodeId),
    /// An operation referenced an id that is not registered.
    #[error("node {0} not registered")]
    UnknownNode(NodeId),
    /// The ordered pair already exists as a link.
    #[error("link {from} -> {to} already exists")]
    DuplicateLink {
        /// Source endpoint.
        from: NodeId,
        /// Target endpoint.
        to: NodeId,
    },
    /// A link handle does not refer to a live link.
    #[error("link {0} is stale or was never issued")]
    UnknownLink(LinkId),
    /// A stored link weight was negative, NaN, or infinite.
    #[error("invalid link weight {0}")]
    InvalidWeight(f64),
    /// The injected edge-cost function returned a negative or NaN cost.
    #[error("invalid edge cost {cost} for {from} -> {to}")]
    InvalidCost {
        /// Source endpoint.
        from: NodeId,
        /// Target endpoint.
        to: NodeId,
        /// Offending cost value.
        cost: f64,
    },
    /// The injected heuristic returned NaN.
    #[error("invalid heuristic estimate {estimate} for node {node}")]
    InvalidHeuristic {
        /// Node being estimated.
        node: NodeId,
        /// Offending estimate.
        estimate: f64,
    },
    /// The search hit its expansion budget before settling the goal.
    #[error("search budget exhausted after {expansions} expansions")]
    BudgetExhausted {
        /// Frontier pops performed before giving up.
        expansions: usize,
    },
    /// The search observed its cancellation token.
    #[error("search cancelled")]
    Cancelled,
    /// Auto-allocation ran past `u64::MAX`.
    #[error("node id space exhausted")]
    IdSpaceExhausted,
    /// Invalid configuration or argument.
    #[error("invalid argument: {0}")]
    Invalid(&'static str),
    /// An internal structure failed its consistency check.
    #[error("corruption: {0}")]
    Corruption(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
