// Mutation requests the client can ask the server to perform.

use crate::domain::entities::{GameId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateGame { opponent: UserId },
    MakeMove { game_id: GameId, location: usize },
    RenameUser { username: String },
}

/// How a non-success reply is reported back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionPolicy {
    /// Show the server's error text interactively.
    Alert,
    /// Record the rejection in the log only.
    Log,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateGame { .. } => "create_game",
            Command::MakeMove { .. } => "make_move",
            Command::RenameUser { .. } => "rename_user",
        }
    }

    pub fn rejection_policy(&self) -> RejectionPolicy {
        match self {
            Command::CreateGame { .. } | Command::MakeMove { .. } => RejectionPolicy::Alert,
            // Rename rejections are never alerted.
            Command::RenameUser { .. } => RejectionPolicy::Log,
        }
    }
}
