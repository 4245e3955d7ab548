//! Marks alternate X, O, X, O, ... by history index.

use super::Invariant;
use crate::{History, Player, Position, Square};

/// Invariant: the mark added at index `i` belongs to the sign to move at `i - 1`.
pub struct AlternatingSignInvariant;

impl Invariant<History> for AlternatingSignInvariant {
    fn holds(history: &History) -> bool {
        history
            .snapshots()
            .windows(2)
            .enumerate()
            .all(|(i, pair)| {
                let expected = Square::Occupied(Player::to_move_at(i));
                Position::ALL
                    .into_iter()
                    .filter(|pos| pair[0].get(*pos) != pair[1].get(*pos))
                    .all(|pos| pair[1].get(pos) == expected)
            })
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_o_first_violates() {
        let mut next = Board::new();
        next.set(Position::Center, Square::Occupied(Player::O));
        let history = History::from_snapshots_unchecked(vec![Board::new(), next], 1);
        assert!(!AlternatingSignInvariant::holds(&history));
    }

    #[test]
    fn test_alternating_holds() {
        let mut first = Board::new();
        first.set(Position::Center, Square::Occupied(Player::X));
        let mut second = first;
        second.set(Position::TopLeft, Square::Occupied(Player::O));
        let history = History::from_snapshots_unchecked(vec![Board::new(), first, second], 2);
        assert!(AlternatingSignInvariant::holds(&history));
    }
}
