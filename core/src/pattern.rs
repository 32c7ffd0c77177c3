use core::fmt;
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rule category deciding which cell subsets count as a correct answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// Selected values add up to the target.
    Sum,
    /// Selected values multiply to the target.
    Product,
    /// Exactly `target` cells, all even.
    EvenCount,
    /// Exactly `target` cells, all odd.
    OddCount,
    /// At least [`GREATER_THAN_MIN_COUNT`] cells, all strictly above the target threshold.
    GreaterThanCount,
    /// Exactly `target` cells forming a run of consecutive integers.
    ConsecutiveSequence,
}

/// Minimum selection size for [`PatternKind::GreaterThanCount`], independent of the target.
pub const GREATER_THAN_MIN_COUNT: usize = 3;

/// Targets available to product rounds. Each difficulty step unlocks one more entry.
pub const PRODUCT_TARGETS: [Value; 10] = [12, 18, 20, 24, 30, 36, 40, 48, 60, 72];

/// Run length asked for by consecutive-sequence rounds.
pub const SEQUENCE_LENGTH: Value = 4;

impl PatternKind {
    /// Pool order used when drawing a kind, later unlocks are appended at the end.
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Sum,
        PatternKind::EvenCount,
        PatternKind::OddCount,
        PatternKind::GreaterThanCount,
        PatternKind::Product,
        PatternKind::ConsecutiveSequence,
    ];

    /// Lowest difficulty at which this kind can be drawn.
    pub const fn unlock_difficulty(self) -> u32 {
        use PatternKind::*;
        match self {
            Sum | EvenCount | OddCount | GreaterThanCount => 1,
            Product => 3,
            ConsecutiveSequence => 6,
        }
    }

    pub const fn is_unlocked(self, difficulty: u32) -> bool {
        difficulty >= self.unlock_difficulty()
    }

    /// Kinds that can be drawn at `difficulty`, in pool order.
    pub fn unlocked(difficulty: u32) -> impl Iterator<Item = PatternKind> {
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.is_unlocked(difficulty))
    }

    /// Target and cell value ranges for a round of this kind.
    pub fn policy(self, difficulty: u32) -> RoundPolicy {
        use PatternKind::*;

        let max_value = (12 + 2 * difficulty).min(35);
        match self {
            Sum => RoundPolicy {
                target: TargetRule::Between(20 + 2 * difficulty..=40 + 3 * difficulty),
                cells: 2..=max_value,
            },
            Product => {
                let last = (difficulty.saturating_sub(1) as usize).min(PRODUCT_TARGETS.len() - 1);
                RoundPolicy {
                    target: TargetRule::OneOf(&PRODUCT_TARGETS[..=last]),
                    cells: 2..=10,
                }
            }
            EvenCount | OddCount => RoundPolicy {
                target: TargetRule::Fixed(3 + difficulty / 4),
                cells: 1..=max_value,
            },
            GreaterThanCount => RoundPolicy {
                target: TargetRule::Fixed(12 + 2 * difficulty),
                cells: 1..=max_value + 8,
            },
            ConsecutiveSequence => RoundPolicy {
                target: TargetRule::Fixed(SEQUENCE_LENGTH),
                cells: 1..=20,
            },
        }
    }
}

/// How the target of a round is picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRule {
    Fixed(Value),
    Between(RangeInclusive<Value>),
    /// Uniform pick from a non-empty table.
    OneOf(&'static [Value]),
}

impl TargetRule {
    pub fn contains(&self, value: Value) -> bool {
        match self {
            Self::Fixed(target) => *target == value,
            Self::Between(range) => range.contains(&value),
            Self::OneOf(choices) => choices.contains(&value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundPolicy {
    pub target: TargetRule,
    pub cells: RangeInclusive<Value>,
}

/// Short player-facing instruction for a rule.
pub(crate) fn write_instruction(
    f: &mut fmt::Formatter<'_>,
    kind: PatternKind,
    target: Value,
) -> fmt::Result {
    use PatternKind::*;
    match kind {
        Sum => write!(f, "SUM TO {target}"),
        Product => write!(f, "MULTIPLY TO {target}"),
        EvenCount => write!(f, "SELECT {target} EVEN NUMBERS"),
        OddCount => write!(f, "SELECT {target} ODD NUMBERS"),
        GreaterThanCount => write!(f, "SELECT {GREATER_THAN_MIN_COUNT}+ NUMBERS > {target}"),
        ConsecutiveSequence => write!(f, "SELECT {target} CONSECUTIVE NUMBERS"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn unlock_schedule_grows_with_difficulty() {
        let base: Vec<_> = PatternKind::unlocked(1).collect();
        assert_eq!(
            base,
            [
                PatternKind::Sum,
                PatternKind::EvenCount,
                PatternKind::OddCount,
                PatternKind::GreaterThanCount
            ]
        );
        assert!(!PatternKind::unlocked(2).any(|k| k == PatternKind::Product));
        assert!(PatternKind::unlocked(3).any(|k| k == PatternKind::Product));
        assert!(!PatternKind::unlocked(5).any(|k| k == PatternKind::ConsecutiveSequence));
        assert_eq!(PatternKind::unlocked(6).count(), 6);
    }

    #[test]
    fn sum_policy_scales_with_difficulty() {
        let policy = PatternKind::Sum.policy(1);
        assert_eq!(policy.target, TargetRule::Between(22..=43));
        assert_eq!(policy.cells, 2..=14);

        let policy = PatternKind::Sum.policy(15);
        assert_eq!(policy.target, TargetRule::Between(50..=85));
        assert_eq!(policy.cells, 2..=35);
    }

    #[test]
    fn product_target_pool_grows_then_saturates() {
        assert_eq!(
            PatternKind::Product.policy(3).target,
            TargetRule::OneOf(&[12, 18, 20])
        );
        assert_eq!(
            PatternKind::Product.policy(10).target,
            TargetRule::OneOf(&PRODUCT_TARGETS)
        );
        assert_eq!(
            PatternKind::Product.policy(15).target,
            TargetRule::OneOf(&PRODUCT_TARGETS)
        );
        assert!(PatternKind::Product.policy(15).target.contains(12));
        assert!(!PatternKind::Product.policy(3).target.contains(24));
        assert_eq!(PatternKind::Product.policy(15).cells, 2..=10);
    }

    #[test]
    fn count_policies_follow_difficulty() {
        assert_eq!(PatternKind::EvenCount.policy(3).target, TargetRule::Fixed(3));
        assert_eq!(PatternKind::OddCount.policy(8).target, TargetRule::Fixed(5));
        assert_eq!(PatternKind::GreaterThanCount.policy(2).target, TargetRule::Fixed(16));
        assert_eq!(PatternKind::GreaterThanCount.policy(15).cells, 1..=43);
        assert_eq!(
            PatternKind::ConsecutiveSequence.policy(9),
            RoundPolicy {
                target: TargetRule::Fixed(4),
                cells: 1..=20
            }
        );
    }
}
