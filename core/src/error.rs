use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell does not belong to the active puzzle")]
    ForeignCell,
    #[error("No round is being played, selection is locked")]
    NotPlaying,
    #[error("Grid must hold between 1 and 255 cells")]
    InvalidGridShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
