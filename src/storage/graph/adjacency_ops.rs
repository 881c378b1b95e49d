use super::{Dir, Graph, Link};
use crate::types::{LinkId, NodeId};

impl Graph {
    /// Ids reachable from `id` over exactly one outgoing link, in link
    /// creation order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing_links(id).map(|link| link.to)
    }

    /// Outgoing links of `id` in creation order.
    pub fn outgoing_links(&self, id: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.resolve(self.out_links.get(&id).map(|list| list.as_slice()))
    }

    /// Incoming links of `id` in creation order.
    pub fn incoming_links(&self, id: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.resolve(self.in_links.get(&id).map(|list| list.as_slice()))
    }

    /// Neighbor ids in the requested direction. With [`Dir::Both`] outgoing
    /// targets come first; a node linked both ways is reported twice.
    pub fn neighbors_dir(&self, id: NodeId, dir: Dir) -> Vec<NodeId> {
        let mut result = Vec::new();
        if dir.includes_out() {
            result.extend(self.outgoing_links(id).map(|link| link.to));
        }
        if dir.includes_in() {
            result.extend(self.incoming_links(id).map(|link| link.from));
        }
        result
    }

    /// Number of outgoing links of `id`.
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.out_links.get(&id).map_or(0, |list| list.len())
    }

    /// Number of incoming links of `id`.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.in_links.get(&id).map_or(0, |list| list.len())
    }

    fn resolve<'a>(&'a self, ids: Option<&'a [LinkId]>) -> impl Iterator<Item = &'a Link> + 'a {
        ids.unwrap_or(&[])
            .iter()
            .filter_map(move |link_id| self.link(*link_id))
    }
}
