use std::fmt;

/// Identifier of a group as given by the input rows.
pub type GroupId = i64;

/// Position of an entity inside its [`Universe`](super::universe::Universe).
///
/// Identifiers are issued in lexicographic order of entity names, so comparing two
/// `EntityId`s from the same universe compares their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Largest number of entities a universe can hold.
    pub const LIMIT: usize = u32::MAX as usize;

    /// Callers keep `index` below [`Self::LIMIT`]; see [`Self::try_new`].
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < Self::LIMIT, "entity index {index} exceeds the id range");
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub(crate) fn try_new(index: usize) -> Option<Self> {
        (index < Self::LIMIT).then(|| Self(index as u32))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_outside_the_u32_range_are_refused() {
        assert_eq!(EntityId::try_new(7).map(EntityId::index), Some(7));
        assert!(EntityId::try_new(EntityId::LIMIT - 1).is_some());
        assert!(EntityId::try_new(EntityId::LIMIT).is_none());
    }
}
