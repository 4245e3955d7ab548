//! Tic-tac-toe with time travel.
//!
//! A rendering-agnostic game engine: pure rules over board snapshots, and
//! a [`GameSession`] that owns the snapshot history, sequences turns, runs
//! the random computer opponent, and lets players jump back to any
//! earlier move.
//!
//! # Architecture
//!
//! - **Rules**: winner, draw, and legality checks over a [`Board`]
//! - **History**: snapshot list with a movable cursor
//! - **Session**: menu selections, play, computer moves, time travel
//! - **View**: status line and move list for a renderer
//!
//! # Example
//!
//! ```
//! use tictac_engine::{GameMode, GameSession, HistoryOrder, Phase, Player};
//!
//! let mut session = GameSession::seeded(7);
//! session.select_sign(Player::X).unwrap();
//! session.select_mode(GameMode::HumanVsHuman).unwrap();
//! session.start().unwrap();
//!
//! for index in [0, 4, 1, 3, 2] {
//!     session.play(index).unwrap();
//! }
//! assert_eq!(session.phase(), Phase::Finished);
//! assert_eq!(session.status().to_string(), "Winner: X");
//!
//! session.jump_to(2).unwrap();
//! assert_eq!(session.phase(), Phase::InProgress);
//! assert_eq!(session.history_entries(HistoryOrder::Ascending).len(), 6);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod history;
pub mod invariants;
mod opponent;
mod phases;
mod position;
pub mod rules;
mod schedule;
mod session;
mod types;
mod view;

pub use error::SessionError;
pub use history::{History, MoveDescription};
pub use opponent::{MovePolicy, RandomPolicy};
pub use phases::{GameMode, Outcome, Phase};
pub use position::Position;
pub use schedule::{PendingMove, Resolution};
pub use session::{GameSession, GameState, outcome};
pub use types::{Board, Player, Square};
pub use view::{HistoryOrder, MoveEntry, SessionView, Status};
