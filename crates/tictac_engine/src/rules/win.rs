//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning lines, in the order they are checked.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed three-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Win {
    line: [Position; 3],
    player: Player,
}

impl Win {
    /// The three positions forming the line.
    pub fn line(&self) -> [Position; 3] {
        self.line
    }

    /// The sign occupying the line.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Whether `pos` is part of the winning line.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the first line in [`LINES`] order whose three squares hold the
/// same sign, so the answer is reproducible even on boards that could not
/// arise in play.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Win> {
    for line in LINES {
        let [a, b, c] = line;
        let sq = board.get(a);
        if let Square::Occupied(player) = sq
            && sq == board.get(b)
            && sq == board.get(c)
        {
            return Some(Win::new(line, player));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(marks: &[(Position, Player)]) -> Board {
        let mut board = Board::new();
        for &(pos, player) in marks {
            board.set(pos, Square::Occupied(player));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_of(&[
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
            (Position::TopRight, Player::X),
        ]);
        let win = winner(&board).unwrap();
        assert_eq!(win.player(), Player::X);
        assert_eq!(win.line(), LINES[0]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_of(&[
            (Position::TopRight, Player::O),
            (Position::Center, Player::O),
            (Position::BottomLeft, Player::O),
        ]);
        let win = winner(&board).unwrap();
        assert_eq!(win.player(), Player::O);
        assert!(win.contains(Position::Center));
        assert!(!win.contains(Position::TopLeft));
    }

    #[test]
    fn test_every_line_detected() {
        for line in LINES {
            let board = board_of(&line.map(|pos| (pos, Player::O)));
            assert_eq!(winner(&board), Some(Win::new(line, Player::O)));
        }
    }

    #[test]
    fn test_first_line_wins_when_two_complete() {
        // Unreachable in play: O holds the middle row, X the bottom row.
        let board = board_of(&[
            (Position::MiddleLeft, Player::O),
            (Position::Center, Player::O),
            (Position::MiddleRight, Player::O),
            (Position::BottomLeft, Player::X),
            (Position::BottomCenter, Player::X),
            (Position::BottomRight, Player::X),
        ]);
        let win = winner(&board).unwrap();
        assert_eq!(win.line(), LINES[1]);
        assert_eq!(win.player(), Player::O);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_of(&[
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
            (Position::TopRight, Player::O),
        ]);
        assert_eq!(winner(&board), None);
    }
}
