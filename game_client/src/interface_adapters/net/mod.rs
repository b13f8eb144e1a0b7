// Network adapter for the server push channel.

pub mod push;

pub use push::{Connection, ConnectionError, ForwardReport, PatchReceiver, ReceiverStats, forward_frame};
