// Command dispatch over the request/response channel.
// Success never touches local state; the push channel delivers the result later.

use crate::domain::{
    Command, CommandError, CommandTransport, GameId, Notifier, RejectionPolicy, UserId,
};
use tracing::{debug, warn};

/// Sends commands and applies the per-command rejection policy.
pub struct CommandDispatcher<T, N> {
    pub transport: T,
    pub notifier: N,
}

impl<T, N> CommandDispatcher<T, N>
where
    T: CommandTransport,
    N: Notifier,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    pub async fn create_game(&self, opponent: UserId) -> Result<(), CommandError> {
        self.execute(Command::CreateGame { opponent }).await
    }

    pub async fn make_move(&self, game_id: GameId, location: usize) -> Result<(), CommandError> {
        self.execute(Command::MakeMove { game_id, location }).await
    }

    pub async fn rename_user(&self, username: impl Into<String>) -> Result<(), CommandError> {
        self.execute(Command::RenameUser {
            username: username.into(),
        })
        .await
    }

    /// Sends one command exactly once. Transport failures are returned untouched for
    /// top-level reporting; rejections are surfaced here and then returned.
    pub async fn execute(&self, command: Command) -> Result<(), CommandError> {
        let reply = self.transport.send(&command).await?;

        if reply.is_success() {
            debug!(
                command = command.name(),
                status = reply.status,
                "command accepted; awaiting push"
            );
            return Ok(());
        }

        match command.rejection_policy() {
            RejectionPolicy::Alert => self.notifier.alert(&reply.body),
            RejectionPolicy::Log => warn!(
                command = command.name(),
                status = reply.status,
                body = %reply.body,
                "command rejected"
            ),
        }

        Err(CommandError::Rejected {
            status: reply.status,
            body: reply.body,
        })
    }
}
