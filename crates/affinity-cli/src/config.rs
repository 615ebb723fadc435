use crate::cli::TableSource;
use crate::error::{CliError, Result};
use affinity::engine::config::{
    BuildConfig, BuildConfigBuilder, SearchConfig, SearchConfigBuilder,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_GROUPS_PATH: &str = "data/groups.csv";
pub const DEFAULT_CACHE_DIR: &str = "data/cache";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialInputConfig {
    groups_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCacheConfig {
    directory: Option<PathBuf>,
    force_rebuild: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSearchConfig {
    workers: Option<usize>,
    top_n: Option<usize>,
}

/// Settings read from the optional TOML file; every field may be overridden on the
/// command line.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    input: Option<PartialInputConfig>,
    cache: Option<PartialCacheConfig>,
    search: Option<PartialSearchConfig>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub groups_path: PathBuf,
    pub build: BuildConfig,
    pub search: SearchConfig,
    pub top_n: usize,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Merges command-line values over the file; `threads` sets the worker count of
    /// both table construction and search.
    pub fn merge_with_cli(
        self,
        source: &TableSource,
        threads: Option<usize>,
        top_n: Option<usize>,
    ) -> Result<Settings> {
        let input = self.input.unwrap_or_default();
        let cache = self.cache.unwrap_or_default();
        let search = self.search.unwrap_or_default();

        let groups_path = source
            .groups
            .clone()
            .or(input.groups_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GROUPS_PATH));

        let workers = threads.or(search.workers);

        let mut build = BuildConfigBuilder::new()
            .force_rebuild(source.rebuild || cache.force_rebuild.unwrap_or(false));
        if !source.no_cache {
            build = build.cache_dir(
                source
                    .cache_dir
                    .clone()
                    .or(cache.directory)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            );
        }
        let mut search_builder = SearchConfigBuilder::new();
        if let Some(n) = workers {
            build = build.workers(n);
            search_builder = search_builder.workers(n);
        }

        let settings = Settings {
            groups_path,
            build: build
                .build()
                .map_err(|e| CliError::Config(e.to_string()))?,
            search: search_builder
                .build()
                .map_err(|e| CliError::Config(e.to_string()))?,
            top_n: top_n.or(search.top_n).unwrap_or(DEFAULT_TOP_N),
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}
