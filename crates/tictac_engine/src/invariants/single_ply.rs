//! Consecutive snapshots differ by exactly one placed mark.

use super::Invariant;
use crate::{History, Position, Square};

/// Invariant: each snapshot adds one mark to an empty square and changes nothing else.
pub struct SinglePlyInvariant;

impl Invariant<History> for SinglePlyInvariant {
    fn holds(history: &History) -> bool {
        history.snapshots().windows(2).all(|pair| {
            let changed: Vec<_> = Position::ALL
                .into_iter()
                .filter(|pos| pair[0].get(*pos) != pair[1].get(*pos))
                .collect();
            matches!(changed.as_slice(), [pos]
                if pair[0].get(*pos) == Square::Empty && pair[1].get(*pos) != Square::Empty)
        })
    }

    fn description() -> &'static str {
        "Each ply places exactly one mark on an empty square"
    }
}
