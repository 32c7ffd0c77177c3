use serde::{Deserialize, Serialize};

use crate::*;

/// Persistence sink for the best score across sessions.
pub trait HighScoreStore {
    fn load(&self) -> Score;
    fn save(&mut self, score: Score);
}

impl<H: HighScoreStore + ?Sized> HighScoreStore for &mut H {
    fn load(&self) -> Score {
        (**self).load()
    }

    fn save(&mut self, score: Score) {
        (**self).save(score)
    }
}

/// Keeps the high score for the lifetime of the process only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHighScore(pub Score);

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Score {
        self.0
    }

    fn save(&mut self, score: Score) {
        self.0 = score;
    }
}
