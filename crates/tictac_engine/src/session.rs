//! Game session: menu selections, turn sequencing, and time travel.

use crate::opponent::{MovePolicy, RandomPolicy};
use crate::rules::{apply_move, is_draw, is_legal_move, winner};
use crate::schedule::{PendingMove, Resolution};
use crate::{
    Board, GameMode, History, MoveDescription, Outcome, Phase, Player, Position, SessionError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Everything a session knows about one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    history: History,
    mode: Option<GameMode>,
    human: Option<Player>,
    started: bool,
}

impl GameState {
    /// Fresh state at menu entry.
    pub fn new() -> Self {
        Self {
            history: History::new(),
            mode: None,
            human: None,
            started: false,
        }
    }

    /// Board snapshots and the time-travel cursor.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Opponent kind, once chosen.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Sign the (first) human plays, once chosen.
    pub fn human(&self) -> Option<Player> {
        self.human
    }

    /// Whether `start` has succeeded.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Lifecycle phase derived from the selections and the current snapshot.
    pub fn phase(&self) -> Phase {
        if !self.started {
            if self.mode.is_none() && self.human.is_none() {
                Phase::Menu
            } else {
                Phase::Configuring
            }
        } else if outcome(self.history.current()).is_some() {
            Phase::Finished
        } else {
            Phase::InProgress
        }
    }

    /// Sign the computer plays, under human-vs-computer.
    pub fn computer(&self) -> Option<Player> {
        match (self.mode, self.human) {
            (Some(GameMode::HumanVsComputer), Some(human)) => Some(human.opponent()),
            _ => None,
        }
    }

    /// True when the game is running and the computer is to play.
    pub fn is_computers_turn(&self) -> bool {
        self.phase() == Phase::InProgress && self.computer() == Some(self.history.to_move())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Winner or draw on `board`, if the game there is over.
pub fn outcome(board: &Board) -> Option<Outcome> {
    if let Some(win) = winner(board) {
        Some(Outcome::Winner(win))
    } else if is_draw(board) {
        Some(Outcome::Draw)
    } else {
        None
    }
}

/// A single game of tic-tac-toe from menu to finish.
///
/// All mutation goes through the methods below. Rejected calls return a
/// [`SessionError`] and leave the session untouched.
#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    policy: Box<dyn MovePolicy>,
    generation: u64,
    pending: Option<PendingMove>,
}

impl GameSession {
    /// Session with an OS-seeded random opponent.
    #[instrument]
    pub fn new() -> Self {
        Self::with_policy(Box::new(RandomPolicy::new()))
    }

    /// Session whose random opponent is seeded for reproducible play.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_policy(Box::new(RandomPolicy::seeded(seed)))
    }

    /// Session using a custom opponent policy.
    pub fn with_policy(policy: Box<dyn MovePolicy>) -> Self {
        info!("Creating new game session");
        Self {
            state: GameState::new(),
            policy,
            generation: 0,
            pending: None,
        }
    }

    /// Read-only game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Snapshot under the time-travel cursor.
    pub fn board(&self) -> &Board {
        self.state.history.current()
    }

    /// Winner or draw on the current snapshot.
    pub fn outcome(&self) -> Option<Outcome> {
        outcome(self.board())
    }

    /// Outstanding computer-move ticket, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }

    /// Whether a human click on the board would be accepted now.
    pub fn accepts_input(&self) -> bool {
        self.phase() == Phase::InProgress && !self.state.is_computers_turn()
    }

    /// Chooses the human's sign.
    #[instrument(skip(self))]
    pub fn select_sign(&mut self, sign: Player) -> Result<(), SessionError> {
        self.ensure_not_started()?;
        self.state.human = Some(sign);
        self.touch();
        info!(%sign, "Sign selected");
        Ok(())
    }

    /// Chooses the opponent kind.
    #[instrument(skip(self))]
    pub fn select_mode(&mut self, mode: GameMode) -> Result<(), SessionError> {
        self.ensure_not_started()?;
        self.state.mode = Some(mode);
        self.touch();
        info!(%mode, "Mode selected");
        Ok(())
    }

    /// Leaves the menu and begins play.
    ///
    /// When the human chose O against the computer, the computer opens and
    /// a pending move is issued immediately.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.ensure_not_started()?;
        let (Some(mode), Some(human)) = (self.state.mode, self.state.human) else {
            warn!("Start requested without full selection");
            return Err(SessionError::MissingSelection);
        };
        self.state.started = true;
        self.touch();
        info!(%mode, %human, human_first = human == Player::X, "Game started");
        self.schedule_computer();
        Ok(())
    }

    /// Plays the current turn's sign at `index` on behalf of a human.
    #[instrument(skip(self), fields(phase = %self.phase(), cursor = self.state.history.current_index()))]
    pub fn play(&mut self, index: usize) -> Result<(), SessionError> {
        let phase = self.phase();
        if phase != Phase::InProgress {
            warn!("Play outside an in-progress game");
            return Err(SessionError::NotInProgress(phase));
        }
        if index >= 9 {
            warn!("Play out of bounds");
            return Err(SessionError::OutOfBounds(index));
        }
        if self.state.is_computers_turn() {
            let waiting = self.state.history.to_move();
            warn!(%waiting, "Human tried to move out of turn");
            return Err(SessionError::NotYourTurn(waiting));
        }
        if !is_legal_move(self.board(), index) {
            warn!("Square already occupied");
            return Err(SessionError::SquareOccupied(index));
        }
        self.place(index);
        Ok(())
    }

    /// Lets the computer play immediately, bypassing any ticket.
    ///
    /// Returns the position chosen by the opponent policy.
    #[instrument(skip(self))]
    pub fn computer_move(&mut self) -> Result<Position, SessionError> {
        if !self.state.is_computers_turn() {
            return Err(SessionError::NotComputersTurn);
        }
        let pos = self
            .policy
            .choose(self.state.history.current())
            .ok_or(SessionError::NotComputersTurn)?;
        info!(%pos, "Computer plays");
        self.place(pos.to_index());
        Ok(pos)
    }

    /// Applies a deferred computer move if `ticket` is still current.
    ///
    /// Any mutation since the ticket was issued, a finished game, or a
    /// change of turn makes this a no-op.
    #[instrument(skip(self))]
    pub fn resolve_pending(&mut self, ticket: PendingMove) -> Resolution {
        if self.pending != Some(ticket) || ticket.generation() != self.generation {
            debug!(current = self.generation, "Ignoring stale computer move");
            return Resolution::Stale;
        }
        self.pending = None;
        match self.computer_move() {
            Ok(pos) => Resolution::Applied(pos),
            Err(e) => {
                debug!(error = %e, "Pending computer move no longer applicable");
                Resolution::Stale
            }
        }
    }

    /// Moves the time-travel cursor to `index`.
    ///
    /// History after the cursor is kept until the next play.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.state.history.jump(index).inspect_err(|e| {
            warn!(error = %e, "Rejected jump");
        })?;
        self.touch();
        info!(phase = %self.phase(), to_move = %self.state.history.to_move(), "Jumped");
        self.schedule_computer();
        Ok(())
    }

    /// What the ply at history `index` did.
    pub fn move_description(&self, index: usize) -> Result<MoveDescription, SessionError> {
        self.state.history.describe(index)
    }

    /// Back to the menu with a fresh history; outstanding tickets go stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.touch();
        info!("Session reset");
    }

    fn ensure_not_started(&self) -> Result<(), SessionError> {
        if self.state.started {
            warn!("Selection change after start");
            return Err(SessionError::AlreadyStarted);
        }
        Ok(())
    }

    fn place(&mut self, index: usize) {
        let player = self.state.history.to_move();
        let next = apply_move(self.board(), index, player);
        self.state.history.push(next);
        self.touch();
        debug!(index, %player, phase = %self.phase(), "Placed mark");
        if let Some(outcome) = self.outcome() {
            info!(%outcome, "Game finished");
        }
        self.schedule_computer();
    }

    /// Invalidates outstanding tickets.
    fn touch(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn schedule_computer(&mut self) {
        if !self.state.is_computers_turn() {
            return;
        }
        let player = self.state.history.to_move();
        let ticket = PendingMove::new(self.generation, player);
        debug!(?ticket, "Computer move scheduled");
        self.pending = Some(ticket);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn started(mode: GameMode, human: Player) -> GameSession {
        let mut session = GameSession::seeded(11);
        session.select_sign(human).unwrap();
        session.select_mode(mode).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_menu_to_configuring() {
        let mut session = GameSession::seeded(0);
        assert_eq!(session.phase(), Phase::Menu);
        session.select_sign(Player::O).unwrap();
        assert_eq!(session.phase(), Phase::Configuring);
    }

    #[test]
    fn test_start_requires_both_selections() {
        let mut session = GameSession::seeded(0);
        session.select_mode(GameMode::HumanVsHuman).unwrap();
        let err = session.start().unwrap_err();
        assert_eq!(err, SessionError::MissingSelection);
        assert_eq!(err.to_string(), "You must select game mode and selected sign");
        assert_eq!(session.phase(), Phase::Configuring);
    }

    #[test]
    fn test_selection_rejected_after_start() {
        let mut session = started(GameMode::HumanVsHuman, Player::X);
        assert_eq!(
            session.select_sign(Player::O),
            Err(SessionError::AlreadyStarted)
        );
        assert_eq!(
            session.select_mode(GameMode::HumanVsComputer),
            Err(SessionError::AlreadyStarted)
        );
        assert_eq!(session.start(), Err(SessionError::AlreadyStarted));
        assert_eq!(session.state().human(), Some(Player::X));
    }

    #[test]
    fn test_play_before_start_rejected() {
        let mut session = GameSession::seeded(0);
        assert_eq!(
            session.play(0),
            Err(SessionError::NotInProgress(Phase::Menu))
        );
    }

    #[test]
    fn test_human_x_moves_first_against_computer() {
        let session = started(GameMode::HumanVsComputer, Player::X);
        assert!(session.pending().is_none());
        assert!(session.accepts_input());
    }

    #[test]
    fn test_computer_opens_when_human_is_o() {
        let mut session = started(GameMode::HumanVsComputer, Player::O);
        let ticket = session.pending().unwrap();
        assert_eq!(ticket.player(), Player::X);
        assert!(!session.accepts_input());
        assert_eq!(session.play(4), Err(SessionError::NotYourTurn(Player::X)));

        let resolution = session.resolve_pending(ticket);
        assert!(resolution.is_applied());
        assert_eq!(session.board().occupied(), 1);
        assert!(session.accepts_input());
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_ticket_resolves_once() {
        let mut session = started(GameMode::HumanVsComputer, Player::O);
        let ticket = session.pending().unwrap();
        assert!(session.resolve_pending(ticket).is_applied());
        assert_eq!(session.resolve_pending(ticket), Resolution::Stale);
        assert_eq!(session.board().occupied(), 1);
    }

    #[test]
    fn test_reset_makes_ticket_stale() {
        let mut session = started(GameMode::HumanVsComputer, Player::O);
        let ticket = session.pending().unwrap();
        session.reset();
        assert_eq!(session.resolve_pending(ticket), Resolution::Stale);
        assert_eq!(session.phase(), Phase::Menu);
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_computer_move_rejected_in_pvp() {
        let mut session = started(GameMode::HumanVsHuman, Player::X);
        assert_eq!(
            session.computer_move(),
            Err(SessionError::NotComputersTurn)
        );
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut session = started(GameMode::HumanVsHuman, Player::X);
        session.play(4).unwrap();
        assert_eq!(session.play(4), Err(SessionError::SquareOccupied(4)));
        assert_eq!(session.state().history().len(), 2);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut session = started(GameMode::HumanVsHuman, Player::X);
        assert_eq!(session.play(9), Err(SessionError::OutOfBounds(9)));
    }

    #[test]
    fn test_computer_move_plays_on_current_snapshot() {
        let mut session = started(GameMode::HumanVsComputer, Player::X);
        session.play(4).unwrap();
        let pos = session.computer_move().unwrap();
        assert_ne!(pos, Position::Center);
        assert_eq!(session.board().get(pos), Square::Occupied(Player::O));
        assert!(session.pending().is_none());
        assert!(session.accepts_input());
    }

    #[test]
    fn test_state_deserialization_validates_history() {
        let json = r#"{"history":{"snapshots":[],"current":5},"mode":null,"human":null,"started":true}"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());

        let mut session = started(GameMode::HumanVsHuman, Player::X);
        session.play(0).unwrap();
        let json = serde_json::to_string(session.state()).unwrap();
        let state: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(&state, session.state());
        assert_eq!(state.phase(), Phase::InProgress);
    }

    #[test]
    fn test_jump_into_computer_turn_schedules() {
        let mut session = started(GameMode::HumanVsComputer, Player::X);
        session.play(0).unwrap();
        let first = session.pending().unwrap();
        assert!(session.resolve_pending(first).is_applied());

        session.jump_to(1).unwrap();
        let second = session.pending().unwrap();
        assert_ne!(first, second);
        assert_eq!(session.resolve_pending(first), Resolution::Stale);
        assert!(session.resolve_pending(second).is_applied());
        assert_eq!(session.state().history().len(), 3);
    }
}
