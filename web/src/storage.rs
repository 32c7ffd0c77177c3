use gloo::storage::{LocalStorage, Storage};
use numgrid_core::{HighScoreStore, Score};

pub trait StorageKey {
    const KEY: &'static str;
}

/// High score kept in the browser's local storage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalStorageHighScore;

impl StorageKey for LocalStorageHighScore {
    const KEY: &'static str = "numgrid:high-score";
}

impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> Score {
        LocalStorage::get(Self::KEY).unwrap_or_default()
    }

    fn save(&mut self, score: Score) {
        if let Err(err) = LocalStorage::set(Self::KEY, score) {
            log::error!("Could not save high score to local storage: {:?}", err);
        }
    }
}
