use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Score, streak and timer of the running session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: Score,
    pub level: Level,
    pub combo: u32,
    pub max_combo: u32,
    /// Seconds left, always within `0..=time_budget`.
    pub time_remaining: f64,
    pub time_budget: f64,
    pub total_correct: u32,
    pub total_wrong: u32,
}

impl RoundState {
    pub fn new(rules: &ScoringRules) -> Self {
        Self {
            score: 0,
            level: 1,
            combo: 0,
            max_combo: 0,
            time_remaining: rules.initial_time_budget,
            time_budget: rules.initial_time_budget,
            total_correct: 0,
            total_wrong: 0,
        }
    }

    /// Share of the time budget still left, in `0.0..=1.0`.
    pub fn time_fraction(&self) -> f64 {
        if self.time_budget > 0.0 {
            (self.time_remaining / self.time_budget).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(&ScoringRules::default())
    }
}

/// Owns a session: drives generation at round start, verification on submit and the timer.
///
/// Front ends read state through the accessors and only change it through the operations below.
#[derive(Clone, Debug)]
pub struct RoundController<G, H = MemoryHighScore> {
    config: SessionConfig,
    generator: G,
    store: H,
    state: SessionState,
    round: RoundState,
    puzzle: Option<PuzzleContext>,
    selection: Selection,
    high_score: Score,
}

impl RoundController<StandardGenerator<SeededSource>> {
    /// Controller with a reproducible generator and an in-memory high score.
    pub fn seeded(config: SessionConfig, seed: u64) -> Result<Self> {
        let generator = StandardGenerator::new(SeededSource::seeded(seed), config.grid)?;
        Ok(Self::new(config, generator, MemoryHighScore::default()))
    }
}

impl<G: PuzzleGenerator, H: HighScoreStore> RoundController<G, H> {
    pub fn new(mut config: SessionConfig, generator: G, store: H) -> Self {
        config.scoring = config.scoring.sanitized();
        let high_score = store.load();
        Self {
            round: RoundState::new(&config.scoring),
            config,
            generator,
            store,
            state: SessionState::Menu,
            puzzle: None,
            selection: Selection::new(),
            high_score,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn puzzle(&self) -> Option<&PuzzleContext> {
        self.puzzle.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Resets the session and deals the first puzzle. Restarts a running session too.
    pub fn start_session(&mut self) -> RoundState {
        if self.state.is_playing() {
            log::debug!("Restarting a session that was still running");
        }

        self.round = RoundState::new(&self.config.scoring);
        self.selection.clear();
        self.state = SessionState::Playing;
        self.puzzle = Some(self.generator.generate(self.round.level));

        log::debug!("Session started");
        self.round
    }

    /// Advances the countdown by `dt` seconds and ends the session when it runs out.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Ignored;
        }

        let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if let Some(max_delta) = self.config.max_tick_delta {
            dt = dt.min(max_delta.max(0.0));
        }

        let round = &mut self.round;
        round.time_remaining = (round.time_remaining - dt).min(round.time_budget).max(0.0);

        if round.time_remaining <= 0.0 {
            TickOutcome::GameOver(self.end_session())
        } else {
            TickOutcome::Running(self.round)
        }
    }

    /// Flips a cell in the player's current selection, returning whether it is now selected.
    pub fn toggle_cell(&mut self, id: CellId) -> Result<bool> {
        if !self.state.is_playing() {
            return Err(GameError::NotPlaying);
        }
        match &self.puzzle {
            Some(puzzle) if puzzle.contains(id) => Ok(self.selection.toggle(id)),
            _ => Err(GameError::ForeignCell),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Submits the selection built with [`Self::toggle_cell`].
    pub fn submit_selection(&mut self) -> Result<SubmitOutcome> {
        let selection = self.selection.clone();
        self.submit(&selection)
    }

    /// Checks `selection` against the active puzzle and applies the reward or the penalty.
    ///
    /// Empty selections and submissions outside of a running session are ignored. Cells of any
    /// other puzzle are rejected without touching the session.
    pub fn submit(&mut self, selection: &Selection) -> Result<SubmitOutcome> {
        if !self.state.is_playing() || selection.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }
        let Some(puzzle) = &self.puzzle else {
            return Ok(SubmitOutcome::Ignored);
        };
        if selection.iter().any(|id| !puzzle.contains(id)) {
            return Err(GameError::ForeignCell);
        }

        Ok(if verify(puzzle, selection) {
            self.on_correct()
        } else {
            self.on_wrong()
        })
    }

    /// Leaves the game over screen for the menu.
    pub fn acknowledge(&mut self) {
        if self.state.is_finished() {
            self.state = SessionState::Menu;
            self.puzzle = None;
            self.selection.clear();
        }
    }

    fn on_correct(&mut self) -> SubmitOutcome {
        let rules = self.config.scoring;
        let points = rules.points(&self.round);

        let round = &mut self.round;
        round.score = round.score.saturating_add(points.into());
        round.combo = round.combo.saturating_add(1);
        round.total_correct = round.total_correct.saturating_add(1);
        round.max_combo = round.max_combo.max(round.combo);
        round.time_remaining =
            (round.time_remaining + rules.correct_time_reward).min(round.time_budget);

        let level = rules.level_for(round.score);
        let leveled_up = level > round.level;
        if leveled_up {
            round.level = level;
            round.time_budget = rules.time_budget_for(level);
            round.time_remaining = round.time_remaining.min(round.time_budget);
            log::info!("Level up to {level}, time budget {}s", round.time_budget);
        }

        self.selection.clear();
        self.puzzle = Some(self.generator.generate(self.round.level));

        SubmitOutcome::Correct { points, leveled_up }
    }

    fn on_wrong(&mut self) -> SubmitOutcome {
        let penalty = self.config.scoring.wrong_time_penalty;

        let round = &mut self.round;
        round.combo = 0;
        round.total_wrong = round.total_wrong.saturating_add(1);
        round.time_remaining = (round.time_remaining - penalty).max(0.0);

        self.selection.clear();
        SubmitOutcome::Wrong
    }

    fn end_session(&mut self) -> GameOverSummary {
        self.state = SessionState::GameOver;
        self.selection.clear();

        let new_high_score = self.round.score > self.high_score;
        if new_high_score {
            self.high_score = self.round.score;
            self.store.save(self.high_score);
        }

        log::info!(
            "Game over with {} points (best {}, max combo {})",
            self.round.score,
            self.high_score,
            self.round.max_combo
        );
        GameOverSummary {
            round: self.round,
            high_score: self.high_score,
            new_high_score,
        }
    }
}
