use super::ids::EntityId;
use std::collections::HashMap;

/// The full set of distinct entities observed across all groups.
///
/// Names are kept sorted and deduplicated; each name's position is its [`EntityId`].
/// This fixed ordering is the basis of every deterministic enumeration in the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    names: Vec<String>,
    lookup: HashMap<String, EntityId>,
}

impl Universe {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();

        let lookup = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), EntityId::new(idx)))
            .collect();

        Self { names, lookup }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.lookup.get(name).copied()
    }

    /// Returns the name behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this universe.
    pub fn name(&self, id: EntityId) -> &str {
        &self.names[id.index()]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.names.len()).map(EntityId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (EntityId::new(idx), name.as_str()))
    }
}
