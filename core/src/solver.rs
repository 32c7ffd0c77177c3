use alloc::boxed::Box;
use smallvec::SmallVec;

use crate::*;

type Picked = SmallVec<[CellId; 16]>;

/// Searches the grid for any selection the puzzle's rule accepts.
///
/// Returns `None` for unwinnable rounds, which the generator does not rule out on its own.
pub fn find_solution(puzzle: &PuzzleContext) -> Option<Selection> {
    use PatternKind::*;

    let target = u64::from(puzzle.target());
    let picked = match puzzle.kind() {
        Sum => subset_search(puzzle, 0, |acc, value| {
            acc.checked_add(value).filter(|&sum| sum <= target)
        }),
        Product => subset_search(puzzle, 1, |acc, value| {
            acc.checked_mul(value)
                .filter(|&product| product <= target && (product == 0 || target % product == 0))
        }),
        EvenCount => first_matching(puzzle, puzzle.target(), |cell| cell.is_even()),
        OddCount => first_matching(puzzle, puzzle.target(), |cell| !cell.is_even()),
        GreaterThanCount => {
            let above: Picked = puzzle
                .cells()
                .filter(|cell| cell.value > puzzle.target())
                .map(|cell| cell.id)
                .collect();
            (above.len() >= GREATER_THAN_MIN_COUNT).then_some(above)
        }
        ConsecutiveSequence => consecutive_run(puzzle, puzzle.target()),
    };

    picked.map(|ids| ids.into_iter().collect())
}

pub fn is_solvable(puzzle: &PuzzleContext) -> bool {
    find_solution(puzzle).is_some()
}

fn subset_search(
    puzzle: &PuzzleContext,
    identity: u64,
    step: impl Fn(u64, u64) -> Option<u64>,
) -> Option<Picked> {
    let cells: SmallVec<[Cell; 16]> = puzzle.cells().copied().collect();
    let target = u64::from(puzzle.target());
    let mut picked = Picked::new();

    search(&cells, identity, target, &step, &mut picked).then_some(picked)
}

fn search(
    cells: &[Cell],
    acc: u64,
    target: u64,
    step: &impl Fn(u64, u64) -> Option<u64>,
    picked: &mut Picked,
) -> bool {
    if !picked.is_empty() && acc == target {
        return true;
    }

    for (i, cell) in cells.iter().enumerate() {
        let Some(next) = step(acc, u64::from(cell.value)) else {
            continue;
        };
        picked.push(cell.id);
        if search(&cells[i + 1..], next, target, step, picked) {
            return true;
        }
        picked.pop();
    }
    false
}

fn first_matching(
    puzzle: &PuzzleContext,
    count: Value,
    predicate: impl Fn(&Cell) -> bool,
) -> Option<Picked> {
    let count = count as usize;
    if count == 0 {
        return None;
    }

    let picked: Picked = puzzle
        .cells()
        .filter(|cell| predicate(cell))
        .take(count)
        .map(|cell| cell.id)
        .collect();
    (picked.len() == count).then_some(picked)
}

fn consecutive_run(puzzle: &PuzzleContext, length: Value) -> Option<Picked> {
    let length = length as usize;
    if length == 0 {
        return None;
    }

    let mut distinct: SmallVec<[Cell; 16]> = puzzle.cells().copied().collect();
    distinct.sort_by_key(|cell| cell.value);
    distinct.dedup_by_key(|cell| cell.value);

    let mut start = 0;
    for i in 0..distinct.len() {
        if i > 0 && distinct[i - 1].value.checked_add(1) != Some(distinct[i].value) {
            start = i;
        }
        if i + 1 - start == length {
            return Some(distinct[start..=i].iter().map(|cell| cell.id).collect());
        }
    }
    None
}

/// Hook deciding whether a freshly generated puzzle may be played.
pub trait SolvabilityCheck {
    fn accepts(&self, puzzle: &PuzzleContext) -> bool;
}

/// Keeps every generated puzzle, including unwinnable ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl SolvabilityCheck for AcceptAll {
    fn accepts(&self, _puzzle: &PuzzleContext) -> bool {
        true
    }
}

/// Only keeps puzzles for which [`find_solution`] succeeds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RequireSolution;

impl SolvabilityCheck for RequireSolution {
    fn accepts(&self, puzzle: &PuzzleContext) -> bool {
        is_solvable(puzzle)
    }
}

impl<C: SolvabilityCheck + ?Sized> SolvabilityCheck for Box<C> {
    fn accepts(&self, puzzle: &PuzzleContext) -> bool {
        (**self).accepts(puzzle)
    }
}
