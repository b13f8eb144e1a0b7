use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    BOARD_CELLS, Cell, Command, CommandReply, CommandTransport, Game, GameResult, Notifier,
    TransportError, User, UserId,
};

pub(crate) fn user(id: i64, name: &str) -> User {
    User {
        id: UserId::from(id),
        name: name.to_string(),
    }
}

pub(crate) fn empty_game(player1: i64, player2: i64) -> Game {
    Game {
        player1: UserId::from(player1),
        player2: UserId::from(player2),
        turn: UserId::from(player1),
        board: [Cell::Empty; BOARD_CELLS],
        result: GameResult::None,
    }
}

// Transport fake that records every command and answers with a fixed reply.
#[derive(Clone)]
pub(crate) struct RecordingTransport {
    sent: Arc<Mutex<Vec<Command>>>,
    reply: Result<CommandReply, TransportError>,
}

impl RecordingTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: Ok(CommandReply {
                status,
                body: body.to_string(),
            }),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: Err(TransportError::new(message)),
        }
    }

    pub(crate) fn sent(&self) -> Vec<Command> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl CommandTransport for RecordingTransport {
    async fn send(&self, command: &Command) -> Result<CommandReply, TransportError> {
        let mut guard = self.sent.lock().expect("sent mutex poisoned");
        guard.push(command.clone());
        self.reply.clone()
    }
}

#[derive(Clone)]
pub(crate) struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        let mut guard = self.alerts.lock().expect("alerts mutex poisoned");
        guard.push(message.to_string());
    }
}
