use async_trait::async_trait;

use crate::domain::errors::TransportError;
use crate::domain::commands::Command;

// Raw reply from a command endpoint; the dispatcher decides what a status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub status: u16,
    pub body: String,
}

impl CommandReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Port for the request/response channel. The dispatcher depends on this trait,
// not on the HTTP client.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn send(&self, command: &Command) -> Result<CommandReply, TransportError>;
}

// Port for interactive error surfacing (an alert the user has to see).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
