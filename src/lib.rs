//! Registry-backed directed graph with a pluggable A* search.
//!
//! Callers allocate or register [`NodeId`]s, link them, and run a
//! [`Navigator`] built from an edge-cost function and a heuristic. Any payload
//! attached to a node, such as coordinates, stays with the caller.

#![warn(missing_docs)]

pub mod logging;
pub mod primitives;
pub mod query;
pub mod storage;
pub mod types;

pub use query::{CancelToken, NavigateOptions, Navigator, RevisitPolicy, Route};
pub use storage::{Dir, Graph, GraphOptions, Link, SharedGraph};
pub use types::{GraphError, LinkId, NodeId, Result};
