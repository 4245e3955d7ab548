//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Rules hold no
//! state; the session composes them into turn sequencing.

pub mod draw;
pub mod legal;
pub mod win;

pub use draw::{is_draw, is_full};
pub use legal::{apply_move, empty_positions, is_legal_move};
pub use win::{LINES, Win, winner};
