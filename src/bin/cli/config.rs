use pathgraph::storage::GraphOptions;
use pathgraph::{NavigateOptions, RevisitPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Engine defaults read from the CLI config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub capacity: Option<usize>,
    pub buckets: Option<usize>,
    pub revisit: Option<RevisitPolicy>,
    pub max_expansions: Option<usize>,
    pub log: Option<String>,
}

impl CliConfig {
    /// Loads `explicit`, or the default location when it exists. A missing
    /// default file yields the built-in defaults; a missing explicit file is
    /// an error.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => read_file(&path),
            None => match default_config_path() {
                Some(path) if path.exists() => read_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn graph_options(&self, capacity: Option<usize>) -> GraphOptions {
        let mut opts = GraphOptions::new();
        if let Some(capacity) = capacity.or(self.capacity) {
            opts = opts.capacity(capacity);
        }
        if let Some(buckets) = self.buckets {
            opts = opts.buckets(buckets);
        }
        opts
    }

    pub fn navigate_options(
        &self,
        revisit: Option<RevisitPolicy>,
        max_expansions: Option<usize>,
    ) -> NavigateOptions {
        let mut opts = NavigateOptions::new()
            .revisit(revisit.or(self.revisit).unwrap_or_default());
        if let Some(limit) = max_expansions.or(self.max_expansions) {
            opts = opts.max_expansions(limit);
        }
        opts
    }
}

fn read_file(path: &Path) -> Result<CliConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CLI config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CLI config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("pathgraph").join("config.toml"))
}
