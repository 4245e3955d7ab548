//! Move legality and application.

use super::{is_draw, winner};
use crate::{Board, Player, Position, Square};
use tracing::instrument;

/// True iff the game on `board` is still open and `index` names an empty square.
#[instrument(skip(board))]
pub fn is_legal_move(board: &Board, index: usize) -> bool {
    let Some(pos) = Position::from_index(index) else {
        return false;
    };
    winner(board).is_none() && !is_draw(board) && board.is_empty(pos)
}

/// Returns a copy of `board` with `player` placed at `index`.
///
/// # Panics
///
/// Panics if the move is not legal. Callers validate with
/// [`is_legal_move`] first; reaching the panic is a bug in the caller.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, player: Player) -> Board {
    assert!(
        is_legal_move(board, index),
        "apply_move called with illegal index {index}"
    );
    let mut next = *board;
    // from_index cannot fail once the move is legal
    if let Some(pos) = Position::from_index(index) {
        next.set(pos, Square::Occupied(player));
    }
    next
}

/// Empty positions in index order.
pub fn empty_positions(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}
