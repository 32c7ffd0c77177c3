use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Values of the cells picked by a selection, in selection order.
pub type SelectedValues = SmallVec<[Value; 16]>;

/// Immutable description of one round: the rule, its target and the grid of numbers.
///
/// A new round always produces a new context; nothing mutates one after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleContext {
    id: PuzzleId,
    kind: PatternKind,
    target: Value,
    cells: Array2<Cell>,
}

impl PuzzleContext {
    /// Builds a context from row-major cell values laid out on a `(cols, rows)` grid.
    pub fn new(
        id: PuzzleId,
        kind: PatternKind,
        target: Value,
        (cols, rows): Coord2,
        values: &[Value],
    ) -> Result<Self> {
        let total = mult(cols, rows);
        if total == 0 || total > MAX_CELLS || values.len() != usize::from(total) {
            return Err(GameError::InvalidGridShape);
        }

        let cells: Vec<Cell> = values
            .iter()
            .enumerate()
            .map(|(index, &value)| Cell::new(CellId::new(id, index as u8), value))
            .collect();
        let cells = Array2::from_shape_vec((usize::from(rows), usize::from(cols)), cells)
            .map_err(|_| GameError::InvalidGridShape)?;

        Ok(Self {
            id,
            kind,
            target,
            cells,
        })
    }

    pub fn id(&self) -> PuzzleId {
        self.id
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn target(&self) -> Value {
        self.target
    }

    /// Grid shape as `(cols, rows)`.
    pub fn shape(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.cell(id).is_some()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        if id.puzzle != self.id {
            return None;
        }
        let cols = self.cells.ncols();
        let index = usize::from(id.index);
        self.cells.get([index / cols, index % cols])
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Cells in row-major order, which is also id order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.cells.iter().map(|cell| cell.value)
    }

    /// Selection made of the cells at the given row-major indices of this puzzle.
    pub fn select(&self, indices: impl IntoIterator<Item = u8>) -> Selection {
        indices
            .into_iter()
            .map(|index| CellId::new(self.id, index))
            .collect()
    }

    /// Looks up the value of every selected cell.
    pub fn resolve(&self, selection: &Selection) -> Result<SelectedValues> {
        selection
            .iter()
            .map(|id| {
                self.cell(id)
                    .map(|cell| cell.value)
                    .ok_or(GameError::ForeignCell)
            })
            .collect()
    }
}

impl fmt::Display for PuzzleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::pattern::write_instruction(f, self.kind, self.target)
    }
}

/// Upper bound on grid size, cell indices are a single byte.
pub const MAX_CELLS: u16 = 255;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn sample() -> PuzzleContext {
        let values = [5, 15, 3, 8, 1, 2, 9, 4, 6, 7, 11, 12];
        PuzzleContext::new(PuzzleId(7), PatternKind::Sum, 20, (4, 3), &values).unwrap()
    }

    #[test]
    fn cells_are_laid_out_row_major() {
        let puzzle = sample();

        assert_eq!(puzzle.shape(), (4, 3));
        assert_eq!(puzzle.len(), 12);
        assert_eq!(puzzle.cell_at((0, 0)).map(|c| c.value), Some(5));
        assert_eq!(puzzle.cell_at((3, 0)).map(|c| c.value), Some(8));
        assert_eq!(puzzle.cell_at((1, 2)).map(|c| c.value), Some(7));
        assert_eq!(puzzle.cell(CellId::new(PuzzleId(7), 9)).map(|c| c.value), Some(7));
        assert_eq!(puzzle.cell_at((4, 0)), None);
    }

    #[test]
    fn ids_from_another_puzzle_do_not_resolve() {
        let puzzle = sample();
        let stale: Selection = [CellId::new(PuzzleId(6), 0)].into_iter().collect();
        let out_of_range: Selection = [CellId::new(PuzzleId(7), 12)].into_iter().collect();

        assert_eq!(puzzle.resolve(&stale), Err(GameError::ForeignCell));
        assert_eq!(puzzle.resolve(&out_of_range), Err(GameError::ForeignCell));
        assert_eq!(puzzle.resolve(&puzzle.select([0, 1])).unwrap()[..], [5, 15]);
    }

    #[test]
    fn rejects_mismatched_shape() {
        let result = PuzzleContext::new(PuzzleId(0), PatternKind::Sum, 1, (2, 2), &[1, 2, 3]);
        assert_eq!(result, Err(GameError::InvalidGridShape));

        let result = PuzzleContext::new(PuzzleId(0), PatternKind::Sum, 1, (0, 3), &[]);
        assert_eq!(result, Err(GameError::InvalidGridShape));
    }

    #[test]
    fn instruction_names_the_rule() {
        let puzzle = sample();
        assert_eq!(puzzle.to_string(), "SUM TO 20");

        let puzzle =
            PuzzleContext::new(PuzzleId(0), PatternKind::GreaterThanCount, 16, (1, 1), &[3])
                .unwrap();
        assert_eq!(puzzle.to_string(), "SELECT 3+ NUMBERS > 16");
    }
}
