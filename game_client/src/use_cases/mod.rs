// Use cases layer: state mirroring, command dispatch, and view derivation.

pub mod dispatcher;
pub mod state_store;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::CommandDispatcher;
pub use state_store::{GAMES_SLOT, Patch, Snapshot, StateStore, USER_ID_SLOT, USERS_SLOT};
pub use view::{Dashboard, GameDetail, GameRow, Gesture, Presenter, View, ViewBinding};
