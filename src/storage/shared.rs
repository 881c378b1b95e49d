use std::sync::Arc;

use parking_lot::RwLock;

use super::{Graph, GraphOptions};
use crate::types::{LinkId, NodeId, Result};

/// Cloneable handle sharing one [`Graph`] behind a single coarse lock.
///
/// Every operation, including a whole search, runs with the lock held.
/// Searches and other reads share it; mutations take it exclusively.
#[derive(Clone, Debug)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    /// Creates a new shared graph.
    pub fn new(opts: GraphOptions) -> Result<Self> {
        Ok(Self::from_graph(Graph::new(opts)?))
    }

    /// Wraps an existing graph.
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Runs `f` with shared access to the graph.
    pub fn read<T>(&self, f: impl FnOnce(&Graph) -> T) -> T {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Runs `f` with exclusive access to the graph.
    pub fn write<T>(&self, f: impl FnOnce(&mut Graph) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// See [`Graph::allocate_id`].
    pub fn allocate_id(&self) -> Result<NodeId> {
        self.write(|graph| graph.allocate_id())
    }

    /// See [`Graph::register_id`].
    pub fn register_id(&self, id: NodeId) -> Result<NodeId> {
        self.write(|graph| graph.register_id(id))
    }

    /// See [`Graph::make_link`].
    pub fn make_link(&self, from: NodeId, to: NodeId) -> Result<LinkId> {
        self.write(|graph| graph.make_link(from, to))
    }

    /// See [`Graph::remove_link`].
    pub fn remove_link(&self, id: LinkId) -> bool {
        self.write(|graph| graph.remove_link(id).is_some())
    }

    /// See [`Graph::free_node`].
    pub fn free_node(&self, id: NodeId) -> bool {
        self.write(|graph| graph.free_node(id))
    }

    /// Unwraps the graph when this is the last handle.
    pub fn try_into_inner(self) -> std::result::Result<Graph, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
