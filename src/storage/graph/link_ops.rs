use tracing::debug;

use super::graph_types::{check_weight, LinkSlot};
use super::{Graph, Link, DEFAULT_LINK_WEIGHT};
use crate::types::{GraphError, LinkId, NodeId, Result};

impl Graph {
    /// Creates the directed link `from -> to` with the default weight.
    ///
    /// Fails when either endpoint is unregistered or the ordered pair already
    /// exists. `to -> from` is an independent link and must be created on its own.
    pub fn make_link(&mut self, from: NodeId, to: NodeId) -> Result<LinkId> {
        self.make_weighted_link(from, to, DEFAULT_LINK_WEIGHT)
    }

    /// Creates the directed link `from -> to` carrying `weight`.
    pub fn make_weighted_link(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<LinkId> {
        check_weight(weight)?;
        for endpoint in [from, to] {
            if !self.registry.contains(endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        if self.pairs.contains_key(&(from, to)) {
            return Err(GraphError::DuplicateLink { from, to });
        }

        let link = Link { from, to, weight };
        let id = match self.free_links.pop() {
            Some(slot) => {
                let entry = &mut self.links[slot as usize];
                entry.link = Some(link);
                LinkId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = u32::try_from(self.links.len())
                    .map_err(|_| GraphError::Invalid("link table exceeds u32 slot space"))?;
                self.links.push(LinkSlot {
                    generation: 0,
                    link: Some(link),
                });
                LinkId {
                    slot,
                    generation: 0,
                }
            }
        };
        self.pairs.insert((from, to), id);
        self.out_links.entry(from).or_default().push(id);
        self.in_links.entry(to).or_default().push(id);
        self.link_count += 1;
        self.metrics.link_created();
        debug!(from = %from, to = %to, link = %id, "graph.make_link");
        Ok(id)
    }

    /// Removes the link behind `id`; a stale handle is a no-op returning `None`.
    pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
        let link = self.take_link(id)?;
        debug!(from = %link.from, to = %link.to, link = %id, "graph.remove_link");
        Some(link)
    }

    /// Live link behind `id`.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        let slot = self.links.get(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.link.as_ref()
    }

    /// Handle of the link `from -> to`, if present.
    pub fn find_link(&self, from: NodeId, to: NodeId) -> Option<LinkId> {
        self.pairs.get(&(from, to)).copied()
    }

    /// Stored weight of `from -> to`, if the link exists.
    pub fn link_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let id = self.find_link(from, to)?;
        self.link(id).map(|link| link.weight)
    }

    /// Overwrites the stored weight of one link.
    pub fn set_link_weight(&mut self, id: LinkId, weight: f64) -> Result<()> {
        check_weight(weight)?;
        let link = self
            .links
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.link.as_mut())
            .ok_or(GraphError::UnknownLink(id))?;
        link.weight = weight;
        Ok(())
    }

    /// Recomputes every stored weight from `weigh(from, to)`.
    ///
    /// All weights are computed and checked before any is written, so an
    /// invalid value leaves the graph unchanged.
    pub fn refresh_link_weights<F>(&mut self, mut weigh: F) -> Result<()>
    where
        F: FnMut(NodeId, NodeId) -> f64,
    {
        let mut updates = Vec::with_capacity(self.link_count);
        for (idx, slot) in self.links.iter().enumerate() {
            if let Some(link) = &slot.link {
                let weight = weigh(link.from, link.to);
                check_weight(weight)?;
                updates.push((idx, weight));
            }
        }
        for (idx, weight) in updates {
            if let Some(link) = self.links[idx].link.as_mut() {
                link.weight = weight;
            }
        }
        debug!(links = self.link_count, "graph.refresh_link_weights");
        Ok(())
    }

    /// All live links with their handles, in slot order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links.iter().enumerate().filter_map(|(idx, slot)| {
            slot.link.as_ref().map(|link| {
                (
                    LinkId {
                        slot: idx as u32,
                        generation: slot.generation,
                    },
                    link,
                )
            })
        })
    }

    /// Detaches a link from every index and recycles its slot.
    pub(super) fn take_link(&mut self, id: LinkId) -> Option<Link> {
        let slot = self.links.get_mut(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let link = slot.link.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_links.push(id.slot);
        self.pairs.remove(&(link.from, link.to));
        detach(&mut self.out_links, link.from, id);
        detach(&mut self.in_links, link.to, id);
        self.link_count -= 1;
        self.metrics.link_removed();
        Some(link)
    }
}

fn detach(index: &mut rustc_hash::FxHashMap<NodeId, super::LinkList>, node: NodeId, id: LinkId) {
    if let Some(list) = index.get_mut(&node) {
        list.retain(|candidate| *candidate != id);
        if list.is_empty() {
            index.remove(&node);
        }
    }
}
