use std::collections::VecDeque;

/// Open list kept in ascending `f` order.
///
/// Entries carry the `f` they were inserted with. A record whose cost changes
/// is removed and reinserted, so stored keys never go stale. New entries land
/// after every entry with an equal `f`.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    queue: VecDeque<(usize, f64)>,
    high_water: usize,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    /// Largest size the frontier reached.
    pub(crate) fn high_water(&self) -> usize {
        self.high_water
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front().map(|(record, _)| record)
    }

    pub(crate) fn push(&mut self, record: usize, f: f64) {
        let pos = self
            .queue
            .iter()
            .position(|&(_, other)| other > f)
            .unwrap_or(self.queue.len());
        self.queue.insert(pos, (record, f));
        self.high_water = self.high_water.max(self.queue.len());
    }

    pub(crate) fn remove(&mut self, record: usize) -> bool {
        match self.queue.iter().position(|&(other, _)| other == record) {
            Some(pos) => {
                self.queue.remove(pos);
                true
            }
            None => false,
        }
    }
}
