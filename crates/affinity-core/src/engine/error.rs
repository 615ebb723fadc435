use super::cache::CacheError;
use super::config::ConfigError;
use crate::core::index::IndexError;
use crate::core::io::groups::GroupReadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Entity '{name}' is not part of the universe")]
    UnknownEntity { name: String },

    #[error("Entity '{name}' appears more than once in the combination")]
    DuplicateEntity { name: String },

    #[error("Not enough entities to search: need at least {required} besides the parent, found {available}")]
    InsufficientUniverse { required: usize, available: usize },

    #[error("Search space of {universe} entities exceeds the countable candidate range")]
    SearchSpaceOverflow { universe: usize },

    #[error("Failed to read group input: {source}")]
    Input {
        #[from]
        source: GroupReadError,
    },

    #[error("Invalid group data: {source}")]
    Index {
        #[from]
        source: IndexError,
    },

    #[error("Score cache error: {source}")]
    Cache {
        #[from]
        source: CacheError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}
