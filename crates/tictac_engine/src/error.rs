//! Rejected-operation errors for the game session.

use crate::{Phase, Player};
use derive_more::{Display, Error};

/// A session operation was not valid in the current state.
///
/// Every variant is recoverable: the session is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// `start` was called before both a sign and a mode were chosen.
    #[display("You must select game mode and selected sign")]
    MissingSelection,

    /// Sign or mode changes are only allowed before the game starts.
    #[display("Game already started")]
    AlreadyStarted,

    /// A move was attempted outside an in-progress game.
    #[display("Game is not in progress ({_0})")]
    NotInProgress(#[error(not(source))] Phase),

    /// Cell index outside 0-8.
    #[display("Position {_0} out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),

    /// The target cell is already taken.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] usize),

    /// The human tried to move while the computer is to play.
    #[display("It's not your turn; waiting for {_0}")]
    NotYourTurn(#[error(not(source))] Player),

    /// The computer was asked to move when it may not.
    #[display("Computer cannot move now")]
    NotComputersTurn,

    /// Time travel target beyond the recorded history.
    #[display("Move #{index} does not exist (history has {len} entries)")]
    JumpOutOfRange {
        /// Requested history index.
        index: usize,
        /// History length at the time of the request.
        len: usize,
    },

    /// Snapshots that no sequence of legal plays could produce.
    #[display("History is corrupt: {_0}")]
    CorruptHistory(#[error(not(source))] &'static str),
}
