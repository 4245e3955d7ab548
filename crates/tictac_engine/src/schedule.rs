//! Deferred computer moves.
//!
//! The session never sleeps. When the computer is to play it hands out a
//! [`PendingMove`] ticket; the front end waits however long it likes and
//! then passes the ticket back. Any state change in between makes the
//! ticket stale and resolving it does nothing.

use crate::{Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A computer move waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct PendingMove {
    generation: u64,
    player: Player,
}

impl PendingMove {
    /// Session generation the ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sign the computer will place.
    pub fn player(&self) -> Player {
        self.player
    }
}

/// Result of handing a ticket back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The computer played at the position.
    Applied(Position),
    /// The game moved on since the ticket was issued; nothing happened.
    Stale,
}

impl Resolution {
    /// Whether the ticket produced a move.
    pub fn is_applied(&self) -> bool {
        matches!(self, Resolution::Applied(_))
    }
}
