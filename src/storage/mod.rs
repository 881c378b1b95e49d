//! Directed graph store and its configuration.
//!
//! Owns the node registry and every link between registered ids. Cascading
//! deletion keeps the store from ever referencing an unregistered id.

mod graph;
mod metrics;
mod options;
mod shared;

/// Core graph storage implementation.
pub use graph::{Dir, Graph, Link, DEFAULT_LINK_WEIGHT};

/// Metrics hooks.
pub use metrics::{default_metrics, CounterMetrics, GraphMetrics, NoopMetrics};

/// Graph configuration options.
pub use options::GraphOptions;

/// Lock-protected handle for multi-threaded hosts.
pub use shared::SharedGraph;
