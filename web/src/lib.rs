use clap::Parser;
use numgrid_core as game;
use wasm_bindgen::prelude::*;

mod storage;
mod utils;
mod view;

use storage::LocalStorageHighScore;
use view::PuzzleView;

/// Frames longer than this only drain this much time, e.g. after the tab was in the background.
const MAX_FRAME_DELTA: f64 = 0.1;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only deal puzzles that have at least one solution
    #[arg(long)]
    solvable: bool,
}

impl Args {
    /// Arguments come from the page URL, e.g. `#-vv&--seed=42`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    match Args::from_location_hash(&utils::location_hash()) {
        Ok(args) => {
            if let Some(log_level) = args.verbose.log_level() {
                console_log::init_with_level(log_level).expect("Error initializing logger");
            }
        }
        Err(err) => {
            let _ = console_log::init_with_level(log::Level::Warn);
            log::warn!("Ignoring malformed arguments: {err}");
        }
    }
    log::debug!("App started");
}

type Generator = game::StandardGenerator<game::SeededSource, Box<dyn game::SolvabilityCheck>>;

/// Game core handed to the JavaScript canvas front end.
///
/// Snapshots cross the boundary as JSON strings.
#[wasm_bindgen]
pub struct NumGrid {
    controller: game::RoundController<Generator, LocalStorageHighScore>,
}

#[wasm_bindgen]
impl NumGrid {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<NumGrid, JsError> {
        let args = Args::from_location_hash(&utils::location_hash()).unwrap_or_else(|err| {
            log::warn!("Falling back to default arguments: {err}");
            Args::parse_from([""])
        });
        let seed = args.seed.unwrap_or_else(utils::js_random_seed);
        log::debug!("seed: {seed}, solvable: {}", args.solvable);

        let check: Box<dyn game::SolvabilityCheck> = if args.solvable {
            Box::new(game::RequireSolution)
        } else {
            Box::new(game::AcceptAll)
        };
        let config = game::SessionConfig::default().with_max_tick_delta(MAX_FRAME_DELTA);
        let generator =
            game::StandardGenerator::new(game::SeededSource::seeded(seed), config.grid)?
                .with_check(check);

        Ok(Self {
            controller: game::RoundController::new(config, generator, LocalStorageHighScore),
        })
    }

    #[wasm_bindgen(js_name = startSession)]
    pub fn start_session(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.controller.start_session())?)
    }

    /// Advances the countdown, `dt` is in seconds.
    pub fn tick(&mut self, dt: f64) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.controller.tick(dt))?)
    }

    /// Toggles the cell at a row-major index of the current grid.
    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&mut self, index: u8) -> Result<bool, JsError> {
        let puzzle = self.controller.puzzle().ok_or(game::GameError::NotPlaying)?;
        let id = game::CellId::new(puzzle.id(), index);
        Ok(self.controller.toggle_cell(id)?)
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.controller.clear_selection();
    }

    pub fn submit(&mut self) -> Result<String, JsError> {
        let outcome = self.controller.submit_selection()?;
        Ok(serde_json::to_string(&outcome)?)
    }

    pub fn acknowledge(&mut self) {
        self.controller.acknowledge();
    }

    pub fn phase(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.controller.state())?)
    }

    pub fn round(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.controller.round())?)
    }

    /// Current grid with selection marks, `null` outside of a session.
    pub fn puzzle(&self) -> Result<String, JsError> {
        let view = self
            .controller
            .puzzle()
            .map(|puzzle| PuzzleView::new(puzzle, self.controller.selection()));
        Ok(serde_json::to_string(&view)?)
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.controller.high_score() as f64
    }
}
