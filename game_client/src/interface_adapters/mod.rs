// Interface adapters: wire protocol, network handling, and the console presentation.

pub mod clients;
pub mod console;
pub mod net;
pub mod protocol;
