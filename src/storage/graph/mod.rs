use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::primitives::registry::IdRegistry;
use crate::types::{LinkId, NodeId, Result};

use super::metrics::{default_metrics, GraphMetrics};
use super::options::GraphOptions;

mod adjacency_ops;
mod graph_types;
mod link_ops;
mod node_ops;
mod tests;

pub use graph_types::{Dir, Link, DEFAULT_LINK_WEIGHT};

use graph_types::LinkSlot;

pub(crate) type LinkList = SmallVec<[LinkId; 4]>;

/// Directed graph over registry-backed node ids.
///
/// The graph owns every [`Link`] it creates and hands out [`LinkId`] handles.
/// Every id referenced by a link is registered; freeing a node cascades to
/// its links.
pub struct Graph {
    registry: IdRegistry,
    latest_id: u64,
    links: Vec<LinkSlot>,
    free_links: Vec<u32>,
    link_count: usize,
    pairs: FxHashMap<(NodeId, NodeId), LinkId>,
    out_links: FxHashMap<NodeId, LinkList>,
    in_links: FxHashMap<NodeId, LinkList>,
    metrics: Arc<dyn GraphMetrics>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new(opts: GraphOptions) -> Result<Self> {
        opts.validate()?;
        let registry = IdRegistry::new(opts.capacity, opts.buckets)?;
        Ok(Self {
            registry,
            latest_id: 0,
            links: Vec::new(),
            free_links: Vec::new(),
            link_count: 0,
            pairs: FxHashMap::default(),
            out_links: FxHashMap::default(),
            in_links: FxHashMap::default(),
            metrics: opts.metrics.unwrap_or_else(default_metrics),
        })
    }

    /// Highest id ever allocated or explicitly registered.
    pub fn latest_id(&self) -> NodeId {
        NodeId(self.latest_id)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of live links.
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// Fixed node capacity.
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Read access to the underlying registry.
    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    pub(crate) fn metrics(&self) -> &Arc<dyn GraphMetrics> {
        &self.metrics
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.registry.len())
            .field("links", &self.link_count)
            .field("latest_id", &self.latest_id)
            .finish()
    }
}
