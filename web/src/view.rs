use numgrid_core as game;
use serde::Serialize;

/// One grid cell as the canvas front end draws it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellView {
    pub index: u8,
    pub col: game::Coord,
    pub row: game::Coord,
    pub value: game::Value,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PuzzleView {
    pub kind: game::PatternKind,
    pub target: game::Value,
    pub instruction: String,
    pub cols: game::Coord,
    pub rows: game::Coord,
    pub cells: Vec<CellView>,
}

impl PuzzleView {
    pub(crate) fn new(puzzle: &game::PuzzleContext, selection: &game::Selection) -> Self {
        let (cols, rows) = puzzle.shape();
        let cells = puzzle
            .cells()
            .map(|cell| CellView {
                index: cell.id.index,
                col: cell.id.index % cols,
                row: cell.id.index / cols,
                value: cell.value,
                selected: selection.contains(cell.id),
            })
            .collect();

        Self {
            kind: puzzle.kind(),
            target: puzzle.target(),
            instruction: puzzle.to_string(),
            cols,
            rows,
            cells,
        }
    }
}
