//! Read-only projections for whatever renders the game.

use crate::rules::Win;
use crate::session::outcome;
use crate::{Board, GameMode, GameSession, MoveDescription, Outcome, Phase, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Status line for the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Someone completed a line.
    Winner(Win),
    /// Board full without a line.
    Draw,
    /// Sign to play next.
    NextPlayer(Player),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Winner(win) => write!(f, "Winner: {}", win.player()),
            Status::Draw => write!(f, "It's a draw"),
            Status::NextPlayer(player) => write!(f, "Next player: {player}"),
        }
    }
}

/// Display order for the move list. Storage order never changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HistoryOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

impl HistoryOrder {
    /// The other order.
    pub fn toggle(self) -> Self {
        match self {
            HistoryOrder::Ascending => HistoryOrder::Descending,
            HistoryOrder::Descending => HistoryOrder::Ascending,
        }
    }
}

/// One row of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    index: usize,
    description: MoveDescription,
    is_current: bool,
}

impl MoveEntry {
    /// History index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// What the ply did.
    pub fn description(&self) -> MoveDescription {
        self.description
    }

    /// Whether the cursor sits here.
    pub fn is_current(&self) -> bool {
        self.is_current
    }
}

impl std::fmt::Display for MoveEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_current {
            return write!(f, "You are at move #{}", self.index);
        }
        match self.description {
            MoveDescription::Start => write!(f, "{}", self.description),
            MoveDescription::Placed(_) => write!(f, "#{} {}", self.index, self.description),
        }
    }
}

/// Everything a renderer needs after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionView {
    /// Lifecycle phase.
    phase: Phase,
    /// Chosen opponent kind.
    mode: Option<GameMode>,
    /// Chosen human sign.
    human: Option<Player>,
    /// Current snapshot.
    board: Board,
    /// Status line.
    status: Status,
    /// Move list in the requested order.
    entries: Vec<MoveEntry>,
    /// Whether a human click would be accepted.
    accepts_input: bool,
    /// Whether a computer move is waiting to fire.
    computer_pending: bool,
}

impl GameSession {
    /// Status line for the current snapshot.
    pub fn status(&self) -> Status {
        match outcome(self.board()) {
            Some(Outcome::Winner(win)) => Status::Winner(win),
            Some(Outcome::Draw) => Status::Draw,
            None => Status::NextPlayer(self.state().history().to_move()),
        }
    }

    /// The move list, ordered for display.
    pub fn history_entries(&self, order: HistoryOrder) -> Vec<MoveEntry> {
        let history = self.state().history();
        let current = history.current_index();
        let mut entries: Vec<MoveEntry> = (0..history.len())
            .filter_map(|index| {
                history.describe(index).ok().map(|description| MoveEntry {
                    index,
                    description,
                    is_current: index == current,
                })
            })
            .collect();
        if order == HistoryOrder::Descending {
            entries.reverse();
        }
        entries
    }

    /// Snapshot of everything a renderer shows.
    pub fn view(&self, order: HistoryOrder) -> SessionView {
        SessionView {
            phase: self.phase(),
            mode: self.state().mode(),
            human: self.state().human(),
            board: *self.board(),
            status: self.status(),
            entries: self.history_entries(order),
            accepts_input: self.accepts_input(),
            computer_pending: self.pending().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvp() -> GameSession {
        let mut session = GameSession::seeded(5);
        session.select_sign(Player::X).unwrap();
        session.select_mode(GameMode::HumanVsHuman).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_status_text() {
        let mut session = pvp();
        assert_eq!(session.status().to_string(), "Next player: X");
        session.play(4).unwrap();
        assert_eq!(session.status().to_string(), "Next player: O");
    }

    #[test]
    fn test_entry_text() {
        let mut session = pvp();
        session.play(5).unwrap();
        session.play(0).unwrap();
        session.jump_to(1).unwrap();
        let lines: Vec<String> = session
            .history_entries(HistoryOrder::Ascending)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines, ["Go to start", "You are at move #1", "#2 (0, 0)"]);
    }

    #[test]
    fn test_descending_only_reorders_view() {
        let mut session = pvp();
        session.play(0).unwrap();
        session.play(1).unwrap();
        let indices: Vec<usize> = session
            .history_entries(HistoryOrder::Descending)
            .iter()
            .map(MoveEntry::index)
            .collect();
        assert_eq!(indices, [2, 1, 0]);
        assert_eq!(session.state().history().current_index(), 2);
    }

    #[test]
    fn test_order_parses_and_toggles() {
        assert_eq!("desc".parse::<HistoryOrder>().ok(), None);
        assert_eq!(
            "Descending".parse::<HistoryOrder>().unwrap(),
            HistoryOrder::Descending
        );
        assert_eq!(HistoryOrder::Ascending.toggle(), HistoryOrder::Descending);
    }

    #[test]
    fn test_view_in_menu() {
        let session = GameSession::seeded(1);
        let view = session.view(HistoryOrder::Ascending);
        assert_eq!(*view.phase(), Phase::Menu);
        assert!(!*view.accepts_input());
        assert_eq!(view.entries().len(), 1);
    }
}
