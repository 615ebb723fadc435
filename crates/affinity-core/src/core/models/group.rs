use super::ids::GroupId;

/// A scored cluster of entities.
///
/// `members` holds the raw member tokens of the input row, placeholders included;
/// the [`GroupScoreIndex`](crate::core::index::GroupScoreIndex) decides which tokens
/// are genuine entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub score: i64,
    pub category: Option<String>,
    pub members: Vec<String>,
}

impl Group {
    pub fn new<I, S>(id: GroupId, score: i64, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            score,
            category: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}
