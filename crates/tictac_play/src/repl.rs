//! Interactive loop: stdin commands and the delayed computer move.

use crate::config::PlayConfig;
use crate::render::{board_text, render};
use derive_more::{Display, Error};
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;
use tictac_engine::{
    GameMode, GameSession, HistoryOrder, PendingMove, Player, Resolution, SessionView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Sleep, sleep};
use tracing::{debug, info, instrument};

const HELP: &str = "Commands: sign x|o, mode computer|pvp, start, play <0-8>, \
jump <n>, sort, board, history, reset, help, quit";

/// One parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Choose the human's sign.
    Sign(Player),
    /// Choose the opponent.
    Mode(GameMode),
    /// Leave the menu.
    Start,
    /// Place a mark.
    Play(usize),
    /// Time travel.
    Jump(usize),
    /// Flip the move-list order.
    Sort,
    /// Show the board.
    Board,
    /// Show the move list.
    History,
    /// Back to the menu.
    Reset,
    /// Show the command list.
    Help,
    /// Leave.
    Quit,
}

/// Input that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct InputError {
    /// What went wrong, for the user.
    pub message: String,
}

impl InputError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses one command line.
#[instrument]
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    let number = |what: &str| -> Result<usize, InputError> {
        arg.ok_or_else(|| InputError::new(format!("`{command}` needs {what}")))?
            .parse()
            .map_err(|_| InputError::new(format!("`{command}` needs {what}")))
    };

    match command.as_str() {
        "sign" => arg
            .and_then(|s| s.parse().ok())
            .map(Input::Sign)
            .ok_or_else(|| InputError::new("`sign` takes x or o")),
        "mode" => arg
            .and_then(|s| s.parse().ok())
            .map(Input::Mode)
            .ok_or_else(|| InputError::new("`mode` takes computer or pvp")),
        "start" => Ok(Input::Start),
        "play" | "p" => number("a cell 0-8").map(Input::Play),
        "jump" | "j" => number("a move number").map(Input::Jump),
        "sort" => Ok(Input::Sort),
        "board" | "b" => Ok(Input::Board),
        "history" | "h" => Ok(Input::History),
        "reset" => Ok(Input::Reset),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        "" => Err(InputError::new(HELP)),
        other => Err(InputError::new(format!("Unknown command `{other}`. {HELP}"))),
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The session changed; show it.
    Updated,
    /// Show this message, a rejection or a requested listing, and keep going.
    Message(String),
    /// Stop the loop.
    Quit,
}

/// Applies a command to the session and says what to show.
#[instrument(skip(session, order))]
pub fn apply(session: &mut GameSession, order: &mut HistoryOrder, input: Input) -> Flow {
    let result = match input {
        Input::Sign(sign) => session.select_sign(sign),
        Input::Mode(mode) => session.select_mode(mode),
        Input::Start => session.start(),
        Input::Play(index) => session.play(index),
        Input::Jump(index) => session.jump_to(index),
        Input::Sort => {
            *order = order.toggle();
            Ok(())
        }
        Input::Reset => {
            session.reset();
            Ok(())
        }
        Input::Board => return Flow::Message(board_text(&session.view(*order))),
        Input::History => {
            let lines: Vec<String> = session
                .history_entries(*order)
                .iter()
                .map(ToString::to_string)
                .collect();
            return Flow::Message(lines.join("\n"));
        }
        Input::Help => return Flow::Message(HELP.to_string()),
        Input::Quit => return Flow::Quit,
    };

    match result {
        Ok(()) => Flow::Updated,
        Err(e) => Flow::Message(e.to_string()),
    }
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct Reply<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    view: SessionView,
}

/// Formats the response to one event.
///
/// Text mode prints the message, followed by the board when `with_board`
/// is set. JSON mode always carries the view and adds the message if any.
fn format_output(
    message: Option<&str>,
    with_board: bool,
    session: &GameSession,
    order: HistoryOrder,
    json: bool,
) -> anyhow::Result<String> {
    let view = session.view(order);
    if json {
        return Ok(serde_json::to_string(&Reply { message, view })?);
    }
    Ok(match (message, with_board) {
        (Some(message), true) => format!("{message}\n{}", render(&view)),
        (Some(message), false) => message.to_string(),
        (None, _) => render(&view),
    })
}

type Timer = Option<(PendingMove, Pin<Box<Sleep>>)>;

/// Waits for the armed timer; never completes when none is armed.
async fn fire(timer: &mut Timer) -> PendingMove {
    match timer {
        Some((ticket, delay)) => {
            delay.as_mut().await;
            *ticket
        }
        None => std::future::pending().await,
    }
}

/// Runs the interactive game until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(config: PlayConfig, json: bool) -> anyhow::Result<()> {
    let mut session = match *config.seed() {
        Some(seed) => GameSession::seeded(seed),
        None => GameSession::new(),
    };
    if let Some(sign) = *config.sign() {
        session.select_sign(sign)?;
    }
    if let Some(mode) = *config.mode() {
        session.select_mode(mode)?;
    }
    let mut order = *config.history_order();
    let delay = Duration::from_millis(*config.computer_delay_ms());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer: Timer = None;

    println!("{HELP}");
    println!("{}", format_output(None, true, &session, order, json)?);

    loop {
        // A new ticket restarts the delay; an old one stays armed and resolves as stale.
        if let Some(ticket) = session.pending()
            && timer.as_ref().map(|(armed, _)| *armed) != Some(ticket)
        {
            debug!(?ticket, delay_ms = *config.computer_delay_ms(), "Arming computer move");
            timer = Some((ticket, Box::pin(sleep(delay))));
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("End of input");
                    break;
                };
                let output = match parse_input(&line) {
                    Ok(input) => match apply(&mut session, &mut order, input) {
                        Flow::Updated => format_output(None, true, &session, order, json)?,
                        Flow::Message(message) => {
                            format_output(Some(&message), false, &session, order, json)?
                        }
                        Flow::Quit => break,
                    },
                    Err(e) => format_output(Some(&e.to_string()), false, &session, order, json)?,
                };
                println!("{output}");
            }
            ticket = fire(&mut timer) => {
                timer = None;
                match session.resolve_pending(ticket) {
                    Resolution::Applied(pos) => {
                        let message = format!("Computer plays {} ({})", pos, pos.to_index());
                        println!("{}", format_output(Some(&message), true, &session, order, json)?);
                    }
                    Resolution::Stale => debug!("Computer move expired"),
                }
            }
        }
    }

    Ok(())
}
