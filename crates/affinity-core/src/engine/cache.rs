use crate::core::models::ids::EntityId;
use crate::core::models::universe::Universe;
use crate::core::tables::{PairScoreTable, ScoreKey, Tables, TripleScoreTable};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PAIR_SCORES_FILE: &str = "pair_scores.json";
pub const TRIPLE_SCORES_FILE: &str = "triple_scores.json";
pub const UNIVERSE_FILE: &str = "universe.json";

const KEY_SEPARATOR: char = ',';

type EncodedScores = BTreeMap<String, i64>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache artifact '{path}' does not exist")]
    Missing { path: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Corrupt cache artifact '{path}': {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Entity '{name}' contains the key separator ',' and cannot be cached")]
    UnencodableEntity { name: String },
}

/// Durable storage for the universe and both score tables.
///
/// The three artifacts live under one directory with fixed file names. There is no
/// content addressing: a cache stays valid until it is removed or overwritten.
#[derive(Debug, Clone)]
pub struct ScoreCache {
    directory: PathBuf,
}

impl ScoreCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    pub fn save(&self, tables: &Tables) -> Result<(), CacheError> {
        let universe = tables.universe();
        if let Some(name) = universe.names().iter().find(|n| n.contains(KEY_SEPARATOR)) {
            return Err(CacheError::UnencodableEntity { name: name.clone() });
        }

        fs::create_dir_all(&self.directory).map_err(|e| CacheError::Io {
            path: self.directory.to_string_lossy().to_string(),
            source: e,
        })?;

        write_json(&self.artifact(UNIVERSE_FILE), universe.names())?;
        write_json(
            &self.artifact(PAIR_SCORES_FILE),
            &encode_scores(universe, tables.pairs().iter()),
        )?;
        write_json(
            &self.artifact(TRIPLE_SCORES_FILE),
            &encode_scores(universe, tables.triples().iter()),
        )?;

        info!(
            "Saved {} entities, {} pair and {} triple entries to cache at {:?}.",
            universe.len(),
            tables.pair_entries(),
            tables.triple_entries(),
            self.directory
        );
        Ok(())
    }

    /// Restores the cached tables, or `None` if any artifact is missing or unreadable.
    ///
    /// A partially readable cache is never trusted; callers rebuild instead.
    pub fn load(&self) -> Option<Tables> {
        match self.try_load() {
            Ok(tables) => Some(tables),
            Err(CacheError::Missing { path }) => {
                debug!("Cache miss: '{}' not found.", path);
                None
            }
            Err(e) => {
                warn!("Ignoring unusable cache at {:?}: {}", self.directory, e);
                None
            }
        }
    }

    pub fn try_load(&self) -> Result<Tables, CacheError> {
        let universe_path = self.artifact(UNIVERSE_FILE);
        let pair_path = self.artifact(PAIR_SCORES_FILE);
        let triple_path = self.artifact(TRIPLE_SCORES_FILE);

        for path in [&universe_path, &pair_path, &triple_path] {
            if !path.is_file() {
                return Err(CacheError::Missing {
                    path: path.to_string_lossy().to_string(),
                });
            }
        }

        let names: Vec<String> = read_json(&universe_path)?;
        let universe = Universe::from_names(names.iter().cloned());
        let universe_corrupt = |reason: &str| CacheError::Corrupt {
            path: universe_path.to_string_lossy().to_string(),
            reason: reason.to_string(),
        };
        if universe.is_empty() {
            return Err(universe_corrupt("no entities"));
        }
        if universe.len() != names.len() {
            return Err(universe_corrupt("duplicate entity names"));
        }

        let mut pairs = PairScoreTable::new();
        for (key, score) in read_json::<EncodedScores>(&pair_path)? {
            let [a, b] = decode_key::<2>(&universe, &key, &pair_path)?;
            pairs.insert(a, b, score);
        }

        let mut triples = TripleScoreTable::new();
        for (key, score) in read_json::<EncodedScores>(&triple_path)? {
            let [a, b, c] = decode_key::<3>(&universe, &key, &triple_path)?;
            triples.insert(a, b, c, score);
        }

        info!(
            "Loaded {} entities, {} pair and {} triple entries from cache at {:?}.",
            universe.len(),
            pairs.len(),
            triples.len(),
            self.directory
        );
        Ok(Tables::new(universe, pairs, triples))
    }
}

fn encode_scores(
    universe: &Universe,
    entries: impl Iterator<Item = (ScoreKey, i64)>,
) -> EncodedScores {
    entries
        .map(|(key, score)| {
            let names: Vec<&str> = key.members().into_iter().map(|id| universe.name(id)).collect();
            (names.join(&KEY_SEPARATOR.to_string()), score)
        })
        .collect()
}

fn decode_key<const N: usize>(
    universe: &Universe,
    key: &str,
    path: &Path,
) -> Result<[EntityId; N], CacheError> {
    let corrupt = |reason: String| CacheError::Corrupt {
        path: path.to_string_lossy().to_string(),
        reason,
    };

    let ids = key
        .split(KEY_SEPARATOR)
        .map(|name| {
            universe
                .id_of(name)
                .ok_or_else(|| corrupt(format!("unknown entity '{name}' in key '{key}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let ids = <[EntityId; N]>::try_from(ids)
        .map_err(|_| corrupt(format!("key '{key}' does not name exactly {N} entities")))?;
    if (1..N).any(|i| ids[..i].contains(&ids[i])) {
        return Err(corrupt(format!("key '{key}' repeats an entity")));
    }
    Ok(ids)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CacheError> {
    // Write beside the target and rename, so a crash never leaves a half-written artifact.
    let staging = path.with_extension("json.tmp");
    let io_err = |e: std::io::Error| CacheError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    };

    let file = File::create(&staging).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| CacheError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    writer.flush().map_err(io_err)?;
    drop(writer);

    fs::rename(&staging, path).map_err(io_err)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CacheError> {
    let file = File::open(path).map_err(|e| CacheError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CacheError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
