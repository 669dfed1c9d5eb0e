//! Registry of the squares currently placed on the grid.

use std::collections::BTreeMap;

use kitchen_planner_core::Square;

/// Stable identity of a placed square.
///
/// Identifiers are allocated in placement order, so sorting by identifier
/// reproduces the order in which squares were placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareId(u64);

impl SquareId {
    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Registry that stores placed squares and manages identifier allocation.
#[derive(Clone, Debug, Default)]
pub(crate) struct SquareRegistry {
    entries: BTreeMap<SquareId, Square>,
    next_square_id: u64,
}

impl SquareRegistry {
    /// Stores a square and returns the identifier allocated for it.
    pub(crate) fn insert(&mut self, square: Square) -> SquareId {
        let id = SquareId(self.next_square_id);
        self.next_square_id += 1;
        let _ = self.entries.insert(id, square);
        id
    }

    pub(crate) fn remove(&mut self, id: SquareId) -> Option<Square> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: SquareId) -> Option<&Square> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: SquareId) -> Option<&mut Square> {
        self.entries.get_mut(&id)
    }

    /// Drops every square and resets identifier allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_square_id = 0;
    }

    /// Squares in placement order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SquareId, &Square)> + '_ {
        self.entries.iter().map(|(id, square)| (*id, square))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
