//! Move selection for the computer opponent.

use crate::rules::empty_positions;
use crate::{Board, Position};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Chooses where the computer plays.
pub trait MovePolicy: std::fmt::Debug + Send {
    /// Picks an empty position on `board`, or `None` when there is none.
    fn choose(&mut self, board: &Board) -> Option<Position>;
}

/// Uniformly random choice among the empty squares.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic policy for reproducible games and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomPolicy {
    #[instrument(skip(self, board))]
    fn choose(&mut self, board: &Board) -> Option<Position> {
        let open = empty_positions(board);
        let choice = open.choose(&mut self.rng).copied();
        debug!(open = open.len(), ?choice, "Random policy chose");
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square};

    #[test]
    fn test_full_board_has_no_choice() {
        let board = Board::from_squares([Square::Occupied(Player::X); 9]);
        assert_eq!(RandomPolicy::seeded(1).choose(&board), None);
    }

    #[test]
    fn test_never_picks_occupied() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::Center, Position::BottomRight] {
            board.set(pos, Square::Occupied(Player::X));
        }
        let mut policy = RandomPolicy::seeded(7);
        for _ in 0..500 {
            let pos = policy.choose(&board).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_roughly_uniform() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        let open = empty_positions(&board);

        let trials = 8_000;
        let mut counts = [0usize; 9];
        let mut policy = RandomPolicy::seeded(42);
        for _ in 0..trials {
            counts[policy.choose(&board).unwrap().to_index()] += 1;
        }

        let expected = trials as f64 / open.len() as f64;
        let chi_square: f64 = open
            .iter()
            .map(|pos| {
                let observed = counts[pos.to_index()] as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();
        // 7 degrees of freedom; the 0.999 quantile is about 24.3.
        assert!(chi_square < 30.0, "chi-square {chi_square} too large: {counts:?}");
        assert_eq!(counts[Position::Center.to_index()], 0);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = Board::new();
        let mut a = RandomPolicy::seeded(3);
        let mut b = RandomPolicy::seeded(3);
        for _ in 0..20 {
            assert_eq!(a.choose(&board), b.choose(&board));
        }
    }
}
