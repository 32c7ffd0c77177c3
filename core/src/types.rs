use serde::{Deserialize, Serialize};

/// Single grid axis used for column/row counts and positions.
pub type Coord = u8;

/// Two-dimensional grid position or shape `(col, row)`.
pub type Coord2 = (Coord, Coord);

/// Numeric value carried by a cell and by a puzzle target.
pub type Value = u32;

/// Session level, starting at 1.
pub type Level = u32;

/// Accumulated session score.
pub type Score = u64;

/// Highest difficulty the generator scales to, later levels reuse it.
pub const MAX_DIFFICULTY: u32 = 15;

/// Level-derived difficulty, capped at [`MAX_DIFFICULTY`].
pub const fn difficulty(level: Level) -> u32 {
    if level < 1 {
        1
    } else if level > MAX_DIFFICULTY {
        MAX_DIFFICULTY
    } else {
        level
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Cells are stored row-major, so `(col, row)` maps to `[row, col]`.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> u16 {
    let a = a as u16;
    let b = b as u16;
    a.saturating_mul(b)
}

/// Identifies one generated puzzle, fresh for every generation call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub u32);

impl PuzzleId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Stable identity of a cell: the puzzle it belongs to plus its row-major index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub puzzle: PuzzleId,
    pub index: u8,
}

impl CellId {
    pub const fn new(puzzle: PuzzleId, index: u8) -> Self {
        Self { puzzle, index }
    }
}
