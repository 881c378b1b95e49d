use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Trait for tracking graph mutations and searches.
///
/// Implementations receive a callback for every successful registration, node
/// free, link creation, link removal, and finished search. Callers plug one in
/// through [`GraphOptions::metrics`](super::GraphOptions::metrics).
pub trait GraphMetrics: Send + Sync {
    /// Records a node id entering the registry.
    fn node_registered(&self);

    /// Records a node id leaving the registry.
    fn node_freed(&self);

    /// Records the creation of a link.
    fn link_created(&self);

    /// Records the removal of a link, including cascading removals.
    fn link_removed(&self);

    /// Records a completed search.
    ///
    /// # Parameters
    /// * `expansions` - Number of frontier pops the search performed.
    /// * `found` - Whether the goal was reached.
    fn search_finished(&self, expansions: usize, found: bool);
}

/// A no-op implementation of [`GraphMetrics`] that discards all recorded metrics.
#[derive(Default)]
pub struct NoopMetrics;

impl GraphMetrics for NoopMetrics {
    fn node_registered(&self) {}
    fn node_freed(&self) {}
    fn link_created(&self) {}
    fn link_removed(&self) {}
    fn search_finished(&self, _expansions: usize, _found: bool) {}
}

/// A thread-safe counter-based implementation of [`GraphMetrics`].
///
/// All counters are relaxed atomics and may be read while the graph is in use.
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of ids registered.
    pub nodes_registered: AtomicU64,

    /// Number of ids freed.
    pub nodes_freed: AtomicU64,

    /// Number of links created.
    pub links_created: AtomicU64,

    /// Number of links removed.
    pub links_removed: AtomicU64,

    /// Number of searches that reached their goal.
    pub searches_found: AtomicU64,

    /// Number of searches that exhausted the frontier.
    pub searches_unreachable: AtomicU64,

    /// Total frontier pops across all searches.
    pub expansions: AtomicU64,
}

impl GraphMetrics for CounterMetrics {
    fn node_registered(&self) {
        self.nodes_registered.fetch_add(1, Ordering::Relaxed);
    }

    fn node_freed(&self) {
        self.nodes_freed.fetch_add(1, Ordering::Relaxed);
    }

    fn link_created(&self) {
        self.links_created.fetch_add(1, Ordering::Relaxed);
    }

    fn link_removed(&self) {
        self.links_removed.fetch_add(1, Ordering::Relaxed);
    }

    fn search_finished(&self, expansions: usize, found: bool) {
        self.expansions
            .fetch_add(expansions as u64, Ordering::Relaxed);
        if found {
            self.searches_found.fetch_add(1, Ordering::Relaxed);
        } else {
            self.searches_unreachable.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Returns the default metrics implementation wrapped in an [`Arc`].
///
/// The default implementation is [`NoopMetrics`].
pub fn default_metrics() -> Arc<dyn GraphMetrics> {
    Arc::new(NoopMetrics)
}
