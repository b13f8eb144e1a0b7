// Line-oriented presentation: gestures come in on stdin, views and alerts go to stdout.

use crate::domain::{Cell, Notifier, UserId};
use crate::use_cases::{Dashboard, GameDetail, Gesture, Presenter, View};
use std::fmt::{self, Write as _};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const USAGE: &str =
    "commands: start <user id> | select <game #> | move <cell 0-8> | name <new username>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
}

impl fmt::Display for GestureParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureParseError::Empty => f.write_str("empty input"),
            GestureParseError::UnknownCommand(word) => write!(f, "unknown command `{word}`"),
            GestureParseError::MissingArgument(command) => {
                write!(f, "`{command}` needs an argument")
            }
            GestureParseError::InvalidNumber(raw) => write!(f, "`{raw}` is not a number"),
        }
    }
}

impl std::error::Error for GestureParseError {}

pub fn parse_gesture(line: &str) -> Result<Gesture, GestureParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let required = |command: &'static str| {
        if rest.is_empty() {
            Err(GestureParseError::MissingArgument(command))
        } else {
            Ok(rest)
        }
    };
    let index = |command: &'static str| {
        required(command).and_then(|raw| {
            raw.parse::<usize>()
                .map_err(|_| GestureParseError::InvalidNumber(raw.to_string()))
        })
    };

    match word {
        "" => Err(GestureParseError::Empty),
        "start" => required("start").map(|raw| Gesture::StartGame(UserId::from(raw))),
        "select" => index("select").map(Gesture::SelectGame),
        "move" => index("move").map(Gesture::ClickCell),
        // The rename field sends the whole line, spaces included.
        "name" => required("name").map(|raw| Gesture::EditUsername(raw.to_string())),
        other => Err(GestureParseError::UnknownCommand(other.to_string())),
    }
}

pub fn render_view(view: &View) -> String {
    match view {
        View::NeedUser => "need user".to_string(),
        View::Ready(dashboard) => render_dashboard(dashboard),
    }
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "user id: {}", dashboard.user.id);
    let _ = writeln!(out, "username: {}", dashboard.user.name);

    let _ = writeln!(out, "Users (start <id> to challenge):");
    for user in &dashboard.roster {
        let _ = writeln!(out, "  {}, {}", user.id, user.name);
    }

    let _ = writeln!(out, "Games (select <#> to view):");
    for row in &dashboard.games {
        let _ = writeln!(out, "  [{}] {}", row.game_id, row.label);
    }

    match &dashboard.detail {
        Some(detail) => out.push_str(&render_detail(detail)),
        None => out.push_str("Game\n"),
    }
    out
}

fn render_detail(detail: &GameDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game [{}] {}", detail.game_id, detail.label);
    let _ = writeln!(out, "turn: {}", detail.turn);
    if detail.result.is_terminal() {
        let _ = writeln!(out, "result: {} (game over)", detail.result);
    } else {
        let _ = writeln!(out, "result: {}", detail.result);
    }
    for row in detail.board.chunks(3) {
        let cells: Vec<String> = row.iter().map(render_cell).collect();
        let _ = writeln!(out, " {}", cells.join(" | "));
    }
    out
}

fn render_cell(cell: &Cell) -> String {
    cell.mark().map(String::from).unwrap_or_else(|| ".".to_string())
}

/// Stdout presenter and alert sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Presenter for Console {
    fn show(&self, view: &View) {
        println!("{}", render_view(view));
    }
}

impl Notifier for Console {
    fn alert(&self, message: &str) {
        println!("!! {message}");
    }
}

/// Feeds parsed stdin lines into the gesture channel until stdin or the loop goes away.
pub async fn read_gestures(gesture_tx: mpsc::Sender<Gesture>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{USAGE}");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed; no more gestures");
                break;
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                break;
            }
        };

        match parse_gesture(&line) {
            Ok(gesture) => {
                if gesture_tx.send(gesture).await.is_err() {
                    break;
                }
            }
            Err(GestureParseError::Empty) => {}
            Err(err) => println!("{err}; {USAGE}"),
        }
    }
}
