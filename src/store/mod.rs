//! Owning store for sessions and the key value storage they persist to.
//!
//! The analysis code only ever reads sessions, through `SessionSource`. All
//! mutation goes through `SessionStore`, which the caller saves back to its
//! `KeyValueStorage` after each change. Every change reads the latest
//! snapshot and writes it back synchronously, so there is never more than one
//! writer.

use crate::session::Session;

/// Key value storage backends.
mod storage;
/// Export the storage trait and implementations
pub use self::storage::{DirectoryStorage, KeyValueStorage, MemoryStorage};

/// The session store and live session bookkeeping.
mod session_store;
/// Export `SessionStore` and friends
pub use self::session_store::{LiveState, SessionStore, SessionUpdate};
#[cfg(feature = "serde")]
pub use self::session_store::{LEGACY_GAMES_KEY, SESSIONS_KEY, STATE_KEY};

/// Read only access to sessions.
pub trait SessionSource {
    /// Look up a single session by id.
    fn get_session(&self, id: &str) -> Option<&Session>;

    /// All sessions, in storage order.
    fn get_sessions(&self) -> &[Session];
}

impl SessionSource for [Session] {
    fn get_session(&self, id: &str) -> Option<&Session> {
        self.iter().find(|s| s.id() == id)
    }

    fn get_sessions(&self) -> &[Session] {
        self
    }
}

impl SessionSource for Vec<Session> {
    fn get_session(&self, id: &str) -> Option<&Session> {
        self.as_slice().get_session(id)
    }

    fn get_sessions(&self) -> &[Session] {
        self
    }
}
