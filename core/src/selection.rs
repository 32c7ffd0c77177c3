use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Set of cells picked by the player, kept sorted and free of duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    cells: SmallVec<[CellId; 16]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cells.binary_search(&id).is_ok()
    }

    /// Returns `true` if the cell was not selected before.
    pub fn insert(&mut self, id: CellId) -> bool {
        match self.cells.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.cells.insert(pos, id);
                true
            }
        }
    }

    /// Returns `true` if the cell was selected before.
    pub fn remove(&mut self, id: CellId) -> bool {
        match self.cells.binary_search(&id) {
            Ok(pos) => {
                self.cells.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Flips membership of `id`, returning whether it is now selected.
    pub fn toggle(&mut self, id: CellId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id)
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<CellId> for Selection {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        let mut cells: SmallVec<[CellId; 16]> = iter.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }
}
