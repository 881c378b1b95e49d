//! Tracing subscriber setup for binaries and tests.

use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{GraphError, Result};

/// Installs a global `fmt` subscriber filtered by `level`
/// (any `EnvFilter` directive, e.g. `"pathgraph=debug"`).
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level).map_err(|_| GraphError::Invalid("invalid log filter"))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| GraphError::Invalid("logging already initialized"))
}
