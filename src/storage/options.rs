use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::primitives::registry::{DEFAULT_BUCKETS, DEFAULT_CAPACITY};
use crate::types::{GraphError, Result};

use super::metrics::GraphMetrics;

/// Configuration options supplied when creating a [`super::Graph`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Maximum number of node ids the registry can hold.
    pub capacity: usize,
    /// Number of registry buckets; a prime spreads sequential ids best.
    pub buckets: usize,
    /// Optional metrics collection implementation
    #[serde(skip)]
    pub metrics: Option<Arc<dyn GraphMetrics>>,
}

impl GraphOptions {
    /// Creates a new GraphOptions with default settings.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            buckets: DEFAULT_BUCKETS,
            metrics: None,
        }
    }

    /// Sets the registry capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the registry bucket count.
    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Sets the metrics collection implementation.
    pub fn metrics(mut self, metrics: Arc<dyn GraphMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Checks the registry dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(GraphError::Invalid("capacity must be non-zero"));
        }
        if self.capacity > (u32::MAX - 2) as usize {
            return Err(GraphError::Invalid("capacity exceeds u32 slot space"));
        }
        if self.buckets == 0 {
            return Err(GraphError::Invalid("buckets must be non-zero"));
        }
        Ok(())
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphOptions")
            .field("capacity", &self.capacity)
            .field("buckets", &self.buckets)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
