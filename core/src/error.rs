use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration")]
    InvalidConfiguration,
    #[error("Coordinates outside the grid")]
    OutOfBounds,
    #[error("Hidden is not a requestable tile state")]
    InvalidState,
    #[error("Mines have already been generated")]
    AlreadyGenerated,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
