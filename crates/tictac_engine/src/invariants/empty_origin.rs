//! The first snapshot is always the empty board.

use super::Invariant;
use crate::{Board, History};

/// Invariant: `history[0]` is the empty board.
pub struct EmptyOriginInvariant;

impl Invariant<History> for EmptyOriginInvariant {
    fn holds(history: &History) -> bool {
        history.get(0) == Some(&Board::new())
    }

    fn description() -> &'static str {
        "History starts from the empty board"
    }
}
