use crate::core::models::group::Group;
use crate::core::models::ids::{EntityId, GroupId};
use crate::core::models::universe::Universe;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

/// Member tokens that mark an empty slot rather than an entity.
///
/// Matching is by exact token: a name that merely contains one of these words is a
/// genuine entity.
pub const PLACEHOLDER_MEMBERS: [&str; 2] = ["none", "无"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Group id {0} appears in more than one input row")]
    DuplicateGroupId(GroupId),

    #[error("No entities found: every group is empty or holds only placeholders")]
    EmptyUniverse,

    #[error("Found {count} distinct entities; at most {limit} can be indexed", limit = EntityId::LIMIT)]
    TooManyEntities { count: usize },
}

pub fn is_placeholder(token: &str) -> bool {
    PLACEHOLDER_MEMBERS.contains(&token)
}

/// Maps every entity to the groups it belongs to.
///
/// Built once from the input groups and read-only afterwards. Membership lists are
/// sorted by group id so that shared-group lookups are a linear merge.
#[derive(Debug, Clone)]
pub struct GroupScoreIndex {
    universe: Universe,
    groups: Vec<Group>,
    group_positions: HashMap<GroupId, usize>,
    memberships: Vec<Vec<GroupId>>,
}

impl GroupScoreIndex {
    pub fn build(groups: Vec<Group>) -> Result<Self, IndexError> {
        let mut group_positions = HashMap::with_capacity(groups.len());
        let mut by_entity: BTreeMap<&str, BTreeSet<GroupId>> = BTreeMap::new();

        for (position, group) in groups.iter().enumerate() {
            if group_positions.insert(group.id, position).is_some() {
                return Err(IndexError::DuplicateGroupId(group.id));
            }
            for member in group.members.iter().filter(|m| !is_placeholder(m)) {
                by_entity.entry(member.as_str()).or_default().insert(group.id);
            }
        }

        if by_entity.is_empty() {
            return Err(IndexError::EmptyUniverse);
        }
        if EntityId::try_new(by_entity.len() - 1).is_none() {
            return Err(IndexError::TooManyEntities {
                count: by_entity.len(),
            });
        }

        let universe = Universe::from_names(by_entity.keys().copied());
        // BTreeMap iteration order matches the sorted universe, so positions line up.
        let memberships = by_entity
            .into_values()
            .map(|ids| ids.into_iter().collect())
            .collect();

        Ok(Self {
            universe,
            groups,
            group_positions,
            memberships,
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.group_positions.get(&id).map(|&pos| &self.groups[pos])
    }

    pub fn group_score(&self, id: GroupId) -> Option<i64> {
        self.group(id).map(|group| group.score)
    }

    /// Sorted ids of the groups `entity` belongs to.
    pub fn memberships(&self, entity: EntityId) -> &[GroupId] {
        &self.memberships[entity.index()]
    }

    pub fn groups_of(&self, name: &str) -> Vec<&Group> {
        self.universe
            .id_of(name)
            .map(|id| {
                self.memberships(id)
                    .iter()
                    .filter_map(|gid| self.group(*gid))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of the scores of every group that contains all of `entities`.
    ///
    /// Repeated entities do not narrow the intersection. An empty slice scores zero.
    pub fn shared_score(&self, entities: &[EntityId]) -> i64 {
        let Some((first, rest)) = entities.split_first() else {
            return 0;
        };

        self.memberships(*first)
            .iter()
            .filter(|gid| {
                rest.iter()
                    .all(|other| self.memberships(*other).binary_search(gid).is_ok())
            })
            .filter_map(|gid| self.group_score(*gid))
            .sum()
    }

    /// Summed shared-group score between `name` and every entity it co-occurs with.
    ///
    /// Returns `None` when `name` is not in the universe.
    pub fn partner_scores(&self, name: &str) -> Option<BTreeMap<String, i64>> {
        let id = self.universe.id_of(name)?;
        let mut partners: BTreeMap<String, i64> = BTreeMap::new();

        for group in self.memberships(id).iter().filter_map(|gid| self.group(*gid)) {
            let others: BTreeSet<&str> = group
                .members
                .iter()
                .map(String::as_str)
                .filter(|m| *m != name && !is_placeholder(m))
                .collect();
            for other in others {
                *partners.entry(other.to_string()).or_default() += group.score;
            }
        }

        Some(partners)
    }
}
