//! Low-level building blocks for the graph store.
//!
//! Currently holds the fixed-capacity identifier registry that backs node
//! existence checks.

/// Bucket-chained identifier registry.
///
/// A single intrusive list over a preallocated slot pool with per-bucket skip
/// entries for lookups.
pub mod registry;

pub use registry::{Cursor, IdRegistry, InsertOutcome, Iter, DEFAULT_BUCKETS, DEFAULT_CAPACITY};
