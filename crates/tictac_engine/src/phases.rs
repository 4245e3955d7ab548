//! Session phases, game modes, and outcomes.

use crate::rules::Win;
use crate::Player;
use serde::{Deserialize, Serialize};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Nothing selected yet.
    Menu,
    /// Sign and/or mode chosen, not started.
    Configuring,
    /// Started with no winner or draw on the current snapshot.
    InProgress,
    /// Current snapshot holds a winner or a draw.
    Finished,
}

/// Who the human plays against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the board.
    #[strum(to_string = "human vs human", serialize = "pvp", serialize = "HumanVsHuman")]
    HumanVsHuman,
    /// The human plays against the random computer opponent.
    #[strum(to_string = "human vs computer", serialize = "computer", serialize = "HumanVsComputer")]
    HumanVsComputer,
}

/// Outcome of a finished snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A line was completed.
    Winner(Win),
    /// Board full, no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(win) => Some(win.player()),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(win) => write!(f, "Player {} wins", win.player()),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
