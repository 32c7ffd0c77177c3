use serde::{Deserialize, Serialize};

use crate::*;

/// A generated number on the grid.
///
/// Presentation state (position on screen, animation) belongs to the front end; the core only
/// tracks identity and value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub value: Value,
}

impl Cell {
    pub const fn new(id: CellId, value: Value) -> Self {
        Self { id, value }
    }

    pub const fn is_even(self) -> bool {
        self.value % 2 == 0
    }
}
