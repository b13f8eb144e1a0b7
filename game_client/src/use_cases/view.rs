// Presentational derivation from the latest snapshot, and gesture-to-command mapping.

use crate::domain::{BOARD_CELLS, Board, Command, Game, GameId, GameResult, User, UserId};
use crate::use_cases::state_store::Snapshot;
use tracing::debug;

/// Discrete user interactions the presentation layer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    StartGame(UserId),
    SelectGame(GameId),
    ClickCell(usize),
    EditUsername(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No roster entry matches the authenticated user id.
    NeedUser,
    Ready(Dashboard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub user: User,
    pub roster: Vec<User>,
    pub games: Vec<GameRow>,
    pub detail: Option<GameDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub game_id: GameId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetail {
    pub game_id: GameId,
    pub label: String,
    pub turn: UserId,
    pub result: GameResult,
    pub board: Board,
}

/// Sink for derived views (the presentation layer).
pub trait Presenter {
    fn show(&self, view: &View);
}

/// Holds the client-only selection; everything else comes from the snapshot.
#[derive(Debug, Default)]
pub struct ViewBinding {
    selected_game_id: Option<GameId>,
}

impl ViewBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_game_id(&self) -> Option<GameId> {
        self.selected_game_id
    }

    pub fn render(&self, snapshot: &Snapshot) -> View {
        let Some(user) = active_user(snapshot) else {
            return View::NeedUser;
        };
        let users = snapshot.users();

        let games = snapshot
            .games()
            .iter()
            .enumerate()
            .map(|(game_id, game)| GameRow {
                game_id,
                label: game_label(game, users),
            })
            .collect();

        // A selection pointing past the current games list renders nothing.
        let detail = self.selected_game_id.and_then(|game_id| {
            snapshot.games().get(game_id).map(|game| GameDetail {
                game_id,
                label: game_label(game, users),
                turn: game.turn.clone(),
                result: game.result,
                board: game.board,
            })
        });

        View::Ready(Dashboard {
            user: user.clone(),
            roster: users.to_vec(),
            games,
            detail,
        })
    }

    /// Maps a gesture to at most one command. Nothing is dispatched without an active user.
    pub fn handle(&mut self, gesture: Gesture, snapshot: &Snapshot) -> Option<Command> {
        if active_user(snapshot).is_none() {
            debug!(?gesture, "gesture ignored; no active user");
            return None;
        }

        match gesture {
            Gesture::StartGame(requested) => {
                // The command carries the roster's own id, keeping its wire type.
                let Some(opponent) = snapshot.users().iter().find(|user| user.id == requested)
                else {
                    debug!(%requested, "start ignored; no such user in roster");
                    return None;
                };
                Some(Command::CreateGame {
                    opponent: opponent.id.clone(),
                })
            }
            Gesture::SelectGame(game_id) => {
                self.selected_game_id = Some(game_id);
                None
            }
            Gesture::ClickCell(location) => {
                let Some(game_id) = self.selected_game_id else {
                    debug!(location, "cell click ignored; no game selected");
                    return None;
                };
                if snapshot.games().get(game_id).is_none() {
                    debug!(
                        game_id,
                        location, "cell click ignored; selected game is not shown"
                    );
                    return None;
                }
                if location >= BOARD_CELLS {
                    debug!(location, "cell click ignored; outside the board");
                    return None;
                }
                Some(Command::MakeMove { game_id, location })
            }
            Gesture::EditUsername(username) => Some(Command::RenameUser { username }),
        }
    }
}

pub fn active_user(snapshot: &Snapshot) -> Option<&User> {
    let user_id = snapshot.current_user_id()?;
    snapshot.users().iter().find(|user| &user.id == user_id)
}

/// "<player1> v. <player2>", falling back to the raw id for players missing from the roster.
pub fn game_label(game: &Game, users: &[User]) -> String {
    format!(
        "{} v. {}",
        display_name(&game.player1, users),
        display_name(&game.player2, users)
    )
}

fn display_name(user_id: &UserId, users: &[User]) -> String {
    users
        .iter()
        .find(|user| &user.id == user_id)
        .map(|user| user.name.clone())
        .unwrap_or_else(|| user_id.to_string())
}
