pub mod lookup;
pub mod score;
pub mod search;
pub mod tables;

use crate::cli::TableSource;
use crate::config::{PartialConfig, Settings};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use affinity::core::io::groups::GroupInput;
use affinity::core::tables::Tables;
use affinity::engine::progress::ProgressReporter;
use affinity::workflows;
use tracing::info;

/// Per-invocation context shared by every subcommand.
pub struct Context {
    pub config: PartialConfig,
    pub threads: Option<usize>,
}

impl Context {
    pub fn settings(self, source: &TableSource, top_n: Option<usize>) -> Result<Settings> {
        self.config.merge_with_cli(source, self.threads, top_n)
    }
}

/// Restores the score tables from the cache, or builds them from the group table.
pub fn load_tables(settings: &Settings) -> Result<Tables> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Preparing score tables (groups: {:?}, cache: {:?}).",
        settings.groups_path, settings.build.cache_dir
    );
    let input = GroupInput::CsvFile(settings.groups_path.clone());
    let tables = workflows::tables::build_or_load(input, &settings.build, &reporter)?;
    info!(
        "Score tables ready: {} entities, {} pair and {} triple entries.",
        tables.universe().len(),
        tables.pair_entries(),
        tables.triple_entries()
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GROUPS_CSV: &str = "\
id,score,category,members
1,10,kin,\"A,B,C\"
2,4,kin,\"B,C,D,none\"
3,2,,\"D,E,F\"
";

    #[test]
    fn second_load_comes_from_the_cache() {
        let dir = tempdir().unwrap();
        let groups = dir.path().join("groups.csv");
        fs::write(&groups, GROUPS_CSV).unwrap();
        let source = TableSource {
            groups: Some(groups.clone()),
            cache_dir: Some(dir.path().join("cache")),
            no_cache: false,
            rebuild: false,
        };
        let context = || Context {
            config: PartialConfig::default(),
            threads: Some(2),
        };

        let settings = context().settings(&source, None).unwrap();
        let built = load_tables(&settings).unwrap();
        assert_eq!(built.pair_score("B", "C"), 14);
        assert_eq!(built.triple_score("D", "B", "C"), 4);

        fs::remove_file(&groups).unwrap();
        let settings = context().settings(&source, None).unwrap();
        let cached = load_tables(&settings).unwrap();

        assert_eq!(cached, built);
    }

    #[test]
    fn missing_group_table_without_cache_fails() {
        let dir = tempdir().unwrap();
        let source = TableSource {
            groups: Some(dir.path().join("absent.csv")),
            cache_dir: None,
            no_cache: true,
            rebuild: false,
        };
        let context = Context {
            config: PartialConfig::default(),
            threads: None,
        };

        let settings = context.settings(&source, None).unwrap();

        assert!(load_tables(&settings).is_err());
    }
}
