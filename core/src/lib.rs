#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use pattern::*;
pub use puzzle::*;
pub use selection::*;
pub use solver::*;
pub use store::*;
pub use types::*;
pub use verifier::*;

mod cell;
mod controller;
mod error;
mod generator;
mod pattern;
mod puzzle;
mod selection;
mod solver;
mod store;
mod types;
mod verifier;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid shape as `(cols, rows)`.
    pub grid: Coord2,
    pub scoring: ScoringRules,
    /// Upper bound on the seconds a single `tick` may consume.
    pub max_tick_delta: Option<f64>,
}

impl SessionConfig {
    pub const fn new_unchecked(grid: Coord2, scoring: ScoringRules) -> Self {
        Self {
            grid,
            scoring,
            max_tick_delta: None,
        }
    }

    pub fn new((cols, rows): Coord2, scoring: ScoringRules) -> Self {
        let cols = cols.max(1);
        let rows = rows.clamp(1, (MAX_CELLS / u16::from(cols)) as Coord);
        Self::new_unchecked((cols, rows), scoring.sanitized())
    }

    pub fn with_max_tick_delta(mut self, max_tick_delta: f64) -> Self {
        self.max_tick_delta = Some(max_tick_delta);
        self
    }

    pub const fn total_cells(&self) -> u16 {
        mult(self.grid.0, self.grid.1)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new_unchecked((4, 3), ScoringRules::default())
    }
}

/// Score, level and timer economy of a session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub base_points: u32,
    /// Extra points per combo step held before the answer.
    pub combo_bonus: u32,
    /// Points for answering with the full time budget left, scaled down linearly.
    pub speed_bonus: u32,
    pub level_bonus: u32,
    /// Seconds given back on a correct answer.
    pub correct_time_reward: f64,
    /// Seconds taken away on a wrong answer.
    pub wrong_time_penalty: f64,
    pub points_per_level: Score,
    pub initial_time_budget: f64,
    pub time_budget_base: f64,
    pub time_budget_step: f64,
    pub time_budget_floor: f64,
}

impl ScoringRules {
    /// Copy with every timer field finite and non-negative, falling back to the default
    /// for values that are not numbers at all.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let seconds = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                fallback
            }
        };
        Self {
            correct_time_reward: seconds(self.correct_time_reward, defaults.correct_time_reward),
            wrong_time_penalty: seconds(self.wrong_time_penalty, defaults.wrong_time_penalty),
            initial_time_budget: seconds(self.initial_time_budget, defaults.initial_time_budget),
            time_budget_base: seconds(self.time_budget_base, defaults.time_budget_base),
            time_budget_step: seconds(self.time_budget_step, defaults.time_budget_step),
            time_budget_floor: seconds(self.time_budget_floor, defaults.time_budget_floor),
            ..self
        }
    }

    /// Points for a correct answer given the state right before it is applied.
    pub fn points(&self, round: &RoundState) -> u32 {
        let speed = (round.time_fraction() * f64::from(self.speed_bonus)) as u32;
        self.base_points
            .saturating_add(round.combo.saturating_mul(self.combo_bonus))
            .saturating_add(speed)
            .saturating_add(round.level.saturating_mul(self.level_bonus))
    }

    pub fn level_for(&self, score: Score) -> Level {
        let completed = score.checked_div(self.points_per_level).unwrap_or(0);
        Level::try_from(completed)
            .unwrap_or(Level::MAX)
            .saturating_add(1)
    }

    /// Time budget after reaching `level`, shrinking towards the floor.
    pub fn time_budget_for(&self, level: Level) -> f64 {
        (self.time_budget_base - self.time_budget_step * f64::from(level))
            .max(self.time_budget_floor)
            .max(0.0)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base_points: 150,
            combo_bonus: 50,
            speed_bonus: 100,
            level_bonus: 15,
            correct_time_reward: 6.0,
            wrong_time_penalty: 5.0,
            points_per_level: 800,
            initial_time_budget: 60.0,
            time_budget_base: 65.0,
            time_budget_step: 2.0,
            time_budget_floor: 45.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// Nothing was submitted, or no round is being played.
    Ignored,
    Wrong,
    Correct { points: u32, leveled_up: bool },
}

impl SubmitOutcome {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    pub const fn points_awarded(self) -> u32 {
        match self {
            Self::Correct { points, .. } => points,
            Self::Ignored | Self::Wrong => 0,
        }
    }

    pub const fn leveled_up(self) -> bool {
        matches!(
            self,
            Self::Correct {
                leveled_up: true,
                ..
            }
        )
    }

    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub round: RoundState,
    pub high_score: Score,
    pub new_high_score: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// No round is being played.
    Ignored,
    Running(RoundState),
    GameOver(GameOverSummary),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}
