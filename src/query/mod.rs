#![forbid(unsafe_code)]

//! Best-first path search over a [`Graph`](crate::storage::Graph).
//!
//! The engine is generic over an edge-cost function and a heuristic, both
//! supplied by the caller; it never sees coordinates or any other payload.

/// A* search driver and its cost strategies.
pub mod astar;

/// Ordered open list used by the search loop.
mod frontier;

/// Search options: revisit policy, expansion budget, cancellation.
pub mod options;

pub use astar::{EdgeCost, Heuristic, LinkWeight, Navigator, Route, ZeroHeuristic};
pub use options::{CancelToken, NavigateOptions, RevisitPolicy};
