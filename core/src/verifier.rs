use crate::*;

/// Checks a player's selection against the rule of the active puzzle.
///
/// Empty selections and selections touching cells of another puzzle never match.
pub fn verify(puzzle: &PuzzleContext, selection: &Selection) -> bool {
    if selection.is_empty() {
        return false;
    }

    match puzzle.resolve(selection) {
        Ok(values) => matches_rule(puzzle.kind(), puzzle.target(), &values),
        Err(err) => {
            log::debug!("Selection rejected for puzzle {:?}: {err}", puzzle.id());
            false
        }
    }
}

/// Rule predicate over already resolved values.
pub fn matches_rule(kind: PatternKind, target: Value, values: &[Value]) -> bool {
    use PatternKind::*;

    if values.is_empty() {
        return false;
    }

    let count_is = |expected: Value| values.len() as u64 == u64::from(expected);

    match kind {
        Sum => values.iter().map(|&v| u64::from(v)).sum::<u64>() == u64::from(target),
        Product => {
            values
                .iter()
                .fold(1u64, |acc, &v| acc.saturating_mul(u64::from(v)))
                == u64::from(target)
        }
        EvenCount => count_is(target) && values.iter().all(|v| v % 2 == 0),
        OddCount => count_is(target) && values.iter().all(|v| v % 2 != 0),
        GreaterThanCount => {
            values.len() >= GREATER_THAN_MIN_COUNT && values.iter().all(|&v| v > target)
        }
        ConsecutiveSequence => {
            if !count_is(target) {
                return false;
            }
            let mut sorted = SelectedValues::from_slice(values);
            sorted.sort_unstable();
            sorted
                .windows(2)
                .all(|pair| pair[0].checked_add(1) == Some(pair[1]))
        }
    }
}
