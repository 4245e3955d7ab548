//! Plain-text rendering of a session view.

use tictac_engine::{Phase, SessionView, Status};

/// The board grid, with the winning line bracketed once there is one.
pub fn board_text(view: &SessionView) -> String {
    match view.status() {
        Status::Winner(win) => view.board().display_marking(|pos| win.contains(pos)),
        Status::Draw | Status::NextPlayer(_) => view.board().display(),
    }
}

/// Renders the board, status line, and move list.
pub fn render(view: &SessionView) -> String {
    let mut out = String::new();
    match view.phase() {
        Phase::Menu | Phase::Configuring => {
            let sign = view.human().as_ref().map_or("-".to_string(), |p| p.to_string());
            let mode = view.mode().as_ref().map_or("-".to_string(), |m| m.to_string());
            out.push_str(&format!("Menu  sign: {sign}  mode: {mode}\n"));
            out.push_str("Choose with `sign x|o` and `mode computer|pvp`, then `start`.\n");
        }
        Phase::InProgress | Phase::Finished => {
            out.push_str(&board_text(view));
            out.push('\n');
            out.push_str(&view.status().to_string());
            if *view.computer_pending() {
                out.push_str("  (computer is thinking)");
            }
            out.push('\n');
            for entry in view.entries() {
                out.push_str(&format!("  {entry}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_engine::{GameMode, GameSession, HistoryOrder, Player};

    #[test]
    fn test_menu_render() {
        let mut session = GameSession::seeded(0);
        session.select_sign(Player::O).unwrap();
        let text = render(&session.view(HistoryOrder::Ascending));
        assert!(text.starts_with("Menu  sign: O  mode: -"));
    }

    #[test]
    fn test_board_render() {
        let mut session = GameSession::seeded(0);
        session.select_sign(Player::X).unwrap();
        session.select_mode(GameMode::HumanVsHuman).unwrap();
        session.start().unwrap();
        session.play(4).unwrap();
        let text = render(&session.view(HistoryOrder::Ascending));
        assert!(text.contains(" 3 | X | 5 "));
        assert!(text.contains("Next player: O"));
        assert!(text.contains("  Go to start\n  You are at move #1\n"));
    }

    #[test]
    fn test_winning_line_bracketed() {
        let mut session = GameSession::seeded(0);
        session.select_sign(Player::X).unwrap();
        session.select_mode(GameMode::HumanVsHuman).unwrap();
        session.start().unwrap();
        for index in [0, 4, 1, 3, 2] {
            session.play(index).unwrap();
        }
        let text = render(&session.view(HistoryOrder::Ascending));
        assert!(text.starts_with("[X]|[X]|[X]\n---+---+---\n O | O | 5 \n"));
        assert!(text.contains("Winner: X"));

        session.jump_to(4).unwrap();
        let text = render(&session.view(HistoryOrder::Ascending));
        assert!(!text.contains('['));
    }
}
