// Domain layer: board-game entities, commands, errors, and the ports the use cases depend on.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod ports;

pub use commands::{Command, RejectionPolicy};
pub use entities::{BOARD_CELLS, Board, Cell, Game, GameId, GameResult, User, UserId};
pub use errors::{CommandError, PatchError, TransportError};
pub use ports::{CommandReply, CommandTransport, Notifier};
