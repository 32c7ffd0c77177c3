use alloc::collections::VecDeque;
use core::ops::RangeInclusive;

use crate::*;

/// Replays a fixed list of draws, for deterministic rounds in tests and replays.
///
/// Each scripted value is clamped into the requested range. Once the script runs out every draw
/// returns the lower bound of the range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedSource {
    script: VecDeque<Value>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Value>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.script.extend(values);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_in(&mut self, range: RangeInclusive<Value>) -> Value {
        let (low, high) = range.into_inner();
        match self.script.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_then_falls_back_to_lower_bound() {
        let mut source = ScriptedSource::new([4, 99, 0]);

        assert_eq!(source.next_in(1..=10), 4);
        assert_eq!(source.next_in(1..=10), 10);
        assert_eq!(source.next_in(1..=10), 1);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.next_in(2..=10), 2);
    }
}
