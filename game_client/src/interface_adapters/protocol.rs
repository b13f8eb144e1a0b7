// Wire protocol DTOs for the push channel and the command endpoints.

use crate::domain::{Command, UserId};
use serde::Serialize;
use serde_json::{Map, Value};

pub const CREATE_GAME_PATH: &str = "/api/games";
pub const USERNAME_PATH: &str = "/api/username";

/// One push frame: a flat object of slot name to the slot's complete new value.
pub type PatchFrame = Map<String, Value>;

/// Parses a push frame. Anything but a JSON object is malformed.
pub fn decode_frame(text: &str) -> Result<PatchFrame, serde_json::Error> {
    serde_json::from_str::<PatchFrame>(text)
}

/// JSON body of one command endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandBody {
    /// `POST /api/games`
    CreateGame { player: UserId },
    /// `POST /api/games/{game_id}`
    MakeMove { location: usize },
    /// `POST /api/username`
    RenameUser { username: String },
}

/// Route and JSON body for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRequest {
    pub path: String,
    pub body: CommandBody,
}

impl From<&Command> for CommandRequest {
    fn from(command: &Command) -> Self {
        match command {
            Command::CreateGame { opponent } => Self {
                path: CREATE_GAME_PATH.to_string(),
                body: CommandBody::CreateGame {
                    player: opponent.clone(),
                },
            },
            Command::MakeMove { game_id, location } => Self {
                path: format!("{CREATE_GAME_PATH}/{game_id}"),
                body: CommandBody::MakeMove {
                    location: *location,
                },
            },
            Command::RenameUser { username } => Self {
                path: USERNAME_PATH.to_string(),
                body: CommandBody::RenameUser {
                    username: username.clone(),
                },
            },
        }
    }
}
