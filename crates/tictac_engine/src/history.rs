//! Snapshot history with a movable cursor.
//!
//! Every ply appends a full board snapshot. The cursor can travel back to
//! any recorded snapshot without losing the ones after it; only a new
//! play from the past discards the abandoned future.

use crate::{Board, Player, Position, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What changed at a given history index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDescription {
    /// The initial empty board.
    Start,
    /// A mark was placed at the position.
    Placed(Position),
}

impl MoveDescription {
    /// `(col, row)` of the placed mark, if any.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            MoveDescription::Start => None,
            MoveDescription::Placed(pos) => Some((pos.col(), pos.row())),
        }
    }
}

impl std::fmt::Display for MoveDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveDescription::Start => write!(f, "Go to start"),
            MoveDescription::Placed(pos) => write!(f, "({}, {})", pos.col(), pos.row()),
        }
    }
}

/// Ordered board snapshots, index 0 always empty.
///
/// Deserialized histories are checked against the same invariants a
/// played history upholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord")]
pub struct History {
    snapshots: Vec<Board>,
    current: usize,
}

/// Unchecked wire form of [`History`].
#[derive(Deserialize)]
struct HistoryRecord {
    snapshots: Vec<Board>,
    current: usize,
}

impl TryFrom<HistoryRecord> for History {
    type Error = SessionError;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        use crate::invariants::{HistoryInvariants, InvariantSet};

        let history = Self {
            snapshots: record.snapshots,
            current: record.current,
        };
        if history.current >= history.snapshots.len() {
            return Err(SessionError::CorruptHistory("cursor outside the snapshots"));
        }
        if let Err(violations) = HistoryInvariants::check_all(&history) {
            debug!(?violations, "Rejected history");
            return Err(SessionError::CorruptHistory(
                "snapshots are not a sequence of single plays from the empty board",
            ));
        }
        Ok(history)
    }
}

impl History {
    /// History holding only the empty board.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
            current: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_snapshots_unchecked(snapshots: Vec<Board>, current: usize) -> Self {
        Self { snapshots, current }
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &Board {
        &self.snapshots[self.current]
    }

    /// Cursor position.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of snapshots, including the empty origin.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; the origin snapshot is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in storage order.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.snapshots.get(index)
    }

    /// Sign to play on the current snapshot.
    pub fn to_move(&self) -> Player {
        Player::to_move_at(self.current)
    }

    /// Drops snapshots after the cursor, appends `board`, and moves the cursor to it.
    #[instrument(skip(self, board), fields(current = self.current, len = self.snapshots.len()))]
    pub(crate) fn push(&mut self, board: Board) {
        let dropped = self.snapshots.len() - (self.current + 1);
        if dropped > 0 {
            debug!(dropped, "Discarding abandoned future");
        }
        self.snapshots.truncate(self.current + 1);
        self.snapshots.push(board);
        self.current = self.snapshots.len() - 1;

        #[cfg(debug_assertions)]
        self.assert_invariants();
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        use crate::invariants::{HistoryInvariants, InvariantSet};

        if let Err(violations) = HistoryInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("History invariant violated: {descriptions}");
        }
    }

    /// Moves the cursor without discarding anything.
    #[instrument(skip(self), fields(len = self.snapshots.len()))]
    pub(crate) fn jump(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.snapshots.len() {
            return Err(SessionError::JumpOutOfRange {
                index,
                len: self.snapshots.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Describes the ply that produced the snapshot at `index`.
    #[instrument(skip(self))]
    pub fn describe(&self, index: usize) -> Result<MoveDescription, SessionError> {
        let len = self.snapshots.len();
        let board = self
            .snapshots
            .get(index)
            .ok_or(SessionError::JumpOutOfRange { index, len })?;
        if index == 0 {
            return Ok(MoveDescription::Start);
        }
        let prev = &self.snapshots[index - 1];
        Position::ALL
            .into_iter()
            .find(|pos| prev.get(*pos) != board.get(*pos))
            .map(MoveDescription::Placed)
            .ok_or(SessionError::CorruptHistory("consecutive snapshots are identical"))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
