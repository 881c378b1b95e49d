use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How the search treats a neighbor that has already been reached.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevisitPolicy {
    /// Skip a neighbor only when its back-pointer is the record being
    /// expanded. Settled records can be re-opened from another predecessor.
    #[default]
    PredecessorOnly,
    /// Never relax a record once it has been popped from the frontier.
    ClosedSet,
}

/// Cooperative cancellation flag shared between a search and its controller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; every clone observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Options controlling a single search.
#[derive(Clone, Debug, Default)]
pub struct NavigateOptions {
    /// Revisit rule applied during relaxation.
    pub revisit: RevisitPolicy,
    /// Maximum frontier pops before giving up (`None` for unbounded).
    pub max_expansions: Option<usize>,
    /// Token checked once per expansion.
    pub cancel: Option<CancelToken>,
}

impl NavigateOptions {
    /// Default options: predecessor-only revisits, no budget, no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the revisit policy.
    pub fn revisit(mut self, policy: RevisitPolicy) -> Self {
        self.revisit = policy;
        self
    }

    /// Caps the number of frontier pops.
    pub fn max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Attaches a cancellation token.
    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
