use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Number of parallel workers; `None` means the available hardware parallelism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerCount(Option<NonZeroUsize>);

impl WorkerCount {
    pub fn fixed(workers: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(workers)
            .map(|n| Self(Some(n)))
            .ok_or_else(|| ConfigError::InvalidParameter {
                name: "workers",
                reason: "must be at least 1".to_string(),
            })
    }

    pub fn available() -> Self {
        Self(None)
    }

    pub fn resolve(self) -> usize {
        self.0
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory holding the cached tables; `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Skip the cache lookup and overwrite any cached tables.
    pub force_rebuild: bool,
    pub workers: WorkerCount,
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    cache_dir: Option<PathBuf>,
    force_rebuild: Option<bool>,
    workers: Option<usize>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }
    pub fn force_rebuild(mut self, force: bool) -> Self {
        self.force_rebuild = Some(force);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let workers = match self.workers {
            Some(n) => WorkerCount::fixed(n)?,
            None => WorkerCount::available(),
        };
        Ok(BuildConfig {
            cache_dir: self.cache_dir,
            force_rebuild: self.force_rebuild.unwrap_or(false),
            workers,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub workers: WorkerCount,
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    workers: Option<usize>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let workers = match self.workers {
            Some(n) => WorkerCount::fixed(n)?,
            None => WorkerCount::available(),
        };
        Ok(SearchConfig { workers })
    }
}
