use super::ids::EntityId;
use super::universe::Universe;

/// An entity for each slot of the seven-role kinship structure.
///
/// No uniqueness is enforced here; callers that need distinct entities validate
/// before constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SevenRoleAssignment {
    pub target: EntityId,
    pub parent1: EntityId,
    pub parent2: EntityId,
    pub grandparent1: EntityId,
    pub grandparent2: EntityId,
    pub grandparent3: EntityId,
    pub grandparent4: EntityId,
}

/// An entity for each slot of the five-role structure explored by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiveRoleAssignment {
    pub parent: EntityId,
    pub grandparent1: EntityId,
    pub grandparent2: EntityId,
    pub chromo1: EntityId,
    pub chromo2: EntityId,
}

impl FiveRoleAssignment {
    /// Builds an assignment from a fixed parent and the four free slots in
    /// `[grandparent1, grandparent2, chromo1, chromo2]` order.
    pub fn from_slots(parent: EntityId, slots: [EntityId; 4]) -> Self {
        let [grandparent1, grandparent2, chromo1, chromo2] = slots;
        Self {
            parent,
            grandparent1,
            grandparent2,
            chromo1,
            chromo2,
        }
    }

    pub fn members(&self) -> [EntityId; 5] {
        [
            self.parent,
            self.grandparent1,
            self.grandparent2,
            self.chromo1,
            self.chromo2,
        ]
    }

    pub fn names<'u>(&self, universe: &'u Universe) -> [&'u str; 5] {
        self.members().map(|id| universe.name(id))
    }
}

/// The fixed role mapping from the five-role structure into the seven-role one.
///
/// `chromo2` fills both `grandparent2` and `grandparent3`, and `grandparent1` fills both
/// `parent1` and `grandparent4`.
impl From<FiveRoleAssignment> for SevenRoleAssignment {
    fn from(five: FiveRoleAssignment) -> Self {
        Self {
            target: five.parent,
            parent1: five.grandparent1,
            parent2: five.grandparent2,
            grandparent1: five.chromo1,
            grandparent2: five.chromo2,
            grandparent3: five.chromo2,
            grandparent4: five.grandparent1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCombination {
    pub assignment: FiveRoleAssignment,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [EntityId; N] {
        std::array::from_fn(EntityId::new)
    }

    #[test]
    fn five_role_mapping_reuses_chromo2_and_grandparent1() {
        let [p, g1, g2, c1, c2] = ids::<5>();
        let five = FiveRoleAssignment::from_slots(p, [g1, g2, c1, c2]);
        let seven = SevenRoleAssignment::from(five);

        assert_eq!(seven.target, p);
        assert_eq!(seven.parent1, g1);
        assert_eq!(seven.parent2, g2);
        assert_eq!(seven.grandparent1, c1);
        assert_eq!(seven.grandparent2, c2);
        assert_eq!(seven.grandparent3, c2);
        assert_eq!(seven.grandparent4, g1);
    }

    #[test]
    fn names_resolve_in_role_order() {
        let universe = Universe::from_names(["A", "B", "C", "D", "E"]);
        let id = |name| universe.id_of(name).unwrap();
        let five = FiveRoleAssignment::from_slots(id("C"), [id("E"), id("A"), id("D"), id("B")]);

        assert_eq!(five.names(&universe), ["C", "E", "A", "D", "B"]);
    }
}
