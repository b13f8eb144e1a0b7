use std::fmt;

// A request that never produced a response (connect, timeout, body read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

// Outcome of a command that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Transport(TransportError),
    Rejected { status: u16, body: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Transport(err) => write!(f, "{err}"),
            CommandError::Rejected { status, body } => {
                if body.is_empty() {
                    write!(f, "command rejected with status {status}")
                } else {
                    write!(f, "command rejected with status {status}: {body}")
                }
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl From<TransportError> for CommandError {
    fn from(err: TransportError) -> Self {
        CommandError::Transport(err)
    }
}

// A known slot whose pushed value does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for slot `{}`: {}", self.key, self.message)
    }
}

impl std::error::Error for PatchError {}
