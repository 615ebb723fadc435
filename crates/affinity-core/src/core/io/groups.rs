use crate::core::models::group::Group;
use crate::core::models::ids::GroupId;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MEMBER_SEPARATOR: char = ',';

/// One row of a group table.
///
/// Headers are `id, score, category, members`; the localized headers used by the
/// upstream data tables are accepted as aliases. Unrecognized columns are ignored.
#[derive(Debug, Deserialize)]
struct GroupRecord {
    #[serde(alias = "组号")]
    id: GroupId,
    #[serde(alias = "分数")]
    score: i64,
    #[serde(alias = "分类", default)]
    category: Option<String>,
    #[serde(alias = "成员")]
    members: String,
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Self {
            id: record.id,
            score: record.score,
            category: record.category.filter(|c| !c.trim().is_empty()),
            members: parse_member_list(&record.members),
        }
    }
}

#[derive(Debug, Error)]
pub enum GroupReadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Where the group rows come from.
///
/// A file source is only read when the rows are actually needed, so a warm cache
/// never touches it.
#[derive(Debug, Clone)]
pub enum GroupInput {
    Groups(Vec<Group>),
    CsvFile(PathBuf),
}

impl GroupInput {
    pub fn into_groups(self) -> Result<Vec<Group>, GroupReadError> {
        match self {
            GroupInput::Groups(groups) => Ok(groups),
            GroupInput::CsvFile(path) => read_groups(&path),
        }
    }
}

impl From<Vec<Group>> for GroupInput {
    fn from(groups: Vec<Group>) -> Self {
        GroupInput::Groups(groups)
    }
}

pub fn read_groups(path: &Path) -> Result<Vec<Group>, GroupReadError> {
    let file = std::fs::File::open(path).map_err(|e| GroupReadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_groups_from(file, &path.to_string_lossy())
}

/// Reads group rows from any CSV byte stream; `origin` names the stream in errors.
pub fn read_groups_from<R: Read>(reader: R, origin: &str) -> Result<Vec<Group>, GroupReadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    reader
        .deserialize::<GroupRecord>()
        .map(|result| {
            result.map(Group::from).map_err(|e| GroupReadError::Csv {
                path: origin.to_string(),
                source: e,
            })
        })
        .collect()
}

/// Splits a literal member list on commas, trimming each token and dropping empties.
pub fn parse_member_list(raw: &str) -> Vec<String> {
    raw.split(MEMBER_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
