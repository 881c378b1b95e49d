use tracing::{debug, warn};

use super::Graph;
use crate::primitives::registry::{InsertOutcome, Iter};
use crate::types::{GraphError, NodeId, Result};

impl Graph {
    /// Allocates the next id above [`Graph::latest_id`] and registers it.
    ///
    /// A full registry yields [`GraphError::CapacityExhausted`] and leaves
    /// `latest_id` untouched, so the id is not burned.
    pub fn allocate_id(&mut self) -> Result<NodeId> {
        let raw = self
            .latest_id
            .checked_add(1)
            .ok_or(GraphError::IdSpaceExhausted)?;
        let id = NodeId(raw);
        match self.registry.insert(id) {
            InsertOutcome::Inserted => {
                self.latest_id = raw;
                self.metrics.node_registered();
                debug!(id = %id, "graph.allocate_id");
                Ok(id)
            }
            InsertOutcome::Full => {
                warn!(
                    capacity = self.registry.capacity(),
                    "graph.allocate_id.capacity_exhausted"
                );
                Err(GraphError::CapacityExhausted {
                    capacity: self.registry.capacity(),
                })
            }
            // latest_id bounds every registered id, so this is only reachable
            // through a corrupted registry.
            InsertOutcome::Duplicate => Err(GraphError::DuplicateId(id)),
        }
    }

    /// Registers a caller-chosen id and raises `latest_id` to cover it.
    pub fn register_id(&mut self, id: NodeId) -> Result<NodeId> {
        match self.registry.insert(id) {
            InsertOutcome::Inserted => {
                self.latest_id = self.latest_id.max(id.0);
                self.metrics.node_registered();
                debug!(id = %id, "graph.register_id");
                Ok(id)
            }
            InsertOutcome::Duplicate => Err(GraphError::DuplicateId(id)),
            InsertOutcome::Full => {
                warn!(
                    id = %id,
                    capacity = self.registry.capacity(),
                    "graph.register_id.capacity_exhausted"
                );
                Err(GraphError::CapacityExhausted {
                    capacity: self.registry.capacity(),
                })
            }
        }
    }

    /// Unregisters `id` and deletes every link touching it.
    ///
    /// Returns `false` (and does nothing) when `id` is not registered.
    pub fn free_node(&mut self, id: NodeId) -> bool {
        if !self.registry.remove(id) {
            return false;
        }
        let outgoing = self.out_links.remove(&id).unwrap_or_default();
        let incoming = self.in_links.remove(&id).unwrap_or_default();
        let mut removed = 0usize;
        for link in outgoing.into_iter().chain(incoming) {
            // Self-loops appear in both lists; the second take sees a stale handle.
            if self.take_link(link).is_some() {
                removed += 1;
            }
        }
        self.metrics.node_freed();
        debug!(id = %id, links_removed = removed, "graph.free_node");
        true
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: NodeId) -> bool {
        self.registry.contains(id)
    }

    /// Registered ids in registry order.
    pub fn node_ids(&self) -> Iter<'_> {
        self.registry.iter()
    }
}
