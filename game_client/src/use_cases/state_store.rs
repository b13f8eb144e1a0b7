// Local mirror of server-pushed state. Every slot is replaced wholesale.

use crate::domain::{Game, PatchError, User, UserId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub const USER_ID_SLOT: &str = "userId";
pub const USERS_SLOT: &str = "users";
pub const GAMES_SLOT: &str = "games";

/// A single slot replacement, typed by slot name.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    UserId(Option<UserId>),
    Users(Vec<User>),
    Games(Vec<Game>),
    /// Slots this client has no schema for; kept as pushed.
    Opaque { key: String, value: Value },
}

impl Patch {
    /// Decodes a pushed `(key, value)` pair. Unknown keys never fail.
    pub fn decode(key: &str, value: Value) -> Result<Self, PatchError> {
        match key {
            USER_ID_SLOT => decode_slot(key, value).map(Patch::UserId),
            USERS_SLOT => decode_slot(key, value).map(Patch::Users),
            GAMES_SLOT => decode_slot(key, value).map(Patch::Games),
            _ => Ok(Patch::Opaque {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Patch::UserId(_) => USER_ID_SLOT,
            Patch::Users(_) => USERS_SLOT,
            Patch::Games(_) => GAMES_SLOT,
            Patch::Opaque { key, .. } => key,
        }
    }
}

fn decode_slot<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, PatchError> {
    serde_json::from_value(value).map_err(|err| PatchError {
        key: key.to_string(),
        message: err.to_string(),
    })
}

/// Full view of the mirrored state. `None` slots were never pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    user_id: Option<Option<UserId>>,
    users: Option<Vec<User>>,
    games: Option<Vec<Game>>,
    opaque: BTreeMap<String, Value>,
}

impl Snapshot {
    /// The locally authenticated user id, if the server has pushed one.
    pub fn current_user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref().and_then(Option::as_ref)
    }

    pub fn users(&self) -> &[User] {
        self.users.as_deref().unwrap_or_default()
    }

    pub fn games(&self) -> &[Game] {
        self.games.as_deref().unwrap_or_default()
    }

    pub fn opaque(&self, key: &str) -> Option<&Value> {
        self.opaque.get(key)
    }

    /// True once any patch for `key` has been applied.
    pub fn has_slot(&self, key: &str) -> bool {
        match key {
            USER_ID_SLOT => self.user_id.is_some(),
            USERS_SLOT => self.users.is_some(),
            GAMES_SLOT => self.games.is_some(),
            _ => self.opaque.contains_key(key),
        }
    }

    fn replace(&mut self, patch: Patch) {
        match patch {
            Patch::UserId(user_id) => self.user_id = Some(user_id),
            Patch::Users(users) => self.users = Some(users),
            Patch::Games(games) => self.games = Some(games),
            Patch::Opaque { key, value } => {
                self.opaque.insert(key, value);
            }
        }
    }
}

/// Single-writer store. Subscribers observe each new snapshot as soon as a patch lands.
pub struct StateStore {
    snapshot_tx: watch::Sender<Arc<Snapshot>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        let (snapshot_tx, _snapshot_rx) = watch::channel(Arc::new(Snapshot::default()));
        Self { snapshot_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Decodes and applies one pushed slot. A rejected value leaves the store untouched.
    pub fn apply_patch(&mut self, key: &str, value: Value) -> Result<(), PatchError> {
        let patch = Patch::decode(key, value)?;
        self.apply(patch);
        Ok(())
    }

    /// Last write wins: the slot is overwritten and subscribers are notified.
    pub fn apply(&mut self, patch: Patch) {
        debug!(slot = patch.key(), "applying patch");
        self.snapshot_tx
            .send_modify(|snapshot| Arc::make_mut(snapshot).replace(patch));
    }
}
