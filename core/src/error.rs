use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Enter a whole number between {min} and {max}")]
    InvalidInput { min: i64, max: i64 },
    #[error("There is no cell {0} on this board")]
    OutOfRange(u8),
    #[error("That cell is already taken")]
    CellOccupied,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Wait for the open cards to turn back")]
    InputLocked,
    #[error("Start a round first")]
    NotArmed,
    #[error("Too soon! Wait for the signal")]
    FalseStart,
    #[error("This game does not take that kind of input")]
    Unsupported,
}

/// Coarse grouping of [`GameError`]s, used by the presentation layer to pick a tone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    IllegalMove,
    PrematureAction,
    NoOp,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidInput { .. } | OutOfRange(_) => ErrorKind::InvalidInput,
            CellOccupied | AlreadyEnded => ErrorKind::IllegalMove,
            FalseStart => ErrorKind::PrematureAction,
            InputLocked | NotArmed | Unsupported => ErrorKind::NoOp,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            GameError::InvalidInput { min: 1, max: 100 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(GameError::CellOccupied.kind(), ErrorKind::IllegalMove);
        assert_eq!(GameError::AlreadyEnded.kind(), ErrorKind::IllegalMove);
        assert_eq!(GameError::FalseStart.kind(), ErrorKind::PrematureAction);
        assert_eq!(GameError::InputLocked.kind(), ErrorKind::NoOp);
    }
}
