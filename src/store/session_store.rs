use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tracing::{debug, instrument, warn};

use super::SessionSource;
#[cfg(feature = "serde")]
use super::KeyValueStorage;
use crate::core::{Result, TrackerError};
use crate::holdem::HandShape;
use crate::session::{DealtHand, Session};

/// Storage key holding the JSON array of sessions.
#[cfg(feature = "serde")]
pub const SESSIONS_KEY: &str = "poker-tracker-sessions";
/// Storage key holding the live session bookkeeping.
#[cfg(feature = "serde")]
pub const STATE_KEY: &str = "poker-tracker-state";
/// Storage key from an older layout, dropped whenever sessions are loaded.
#[cfg(feature = "serde")]
pub const LEGACY_GAMES_KEY: &str = "poker-tracker-games";

/// Which session, if any, is currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LiveState {
    pub live_session_id: Option<String>,
    pub live_session_start: Option<DateTime<Utc>>,
}

/// A partial edit of a session. Only the fields that are `Some` are changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub name: Option<String>,
    pub buy_in: Option<f64>,
    pub cash_out: Option<f64>,
    pub small_blind: Option<f64>,
    pub big_blind: Option<f64>,
    pub location: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: Option<TimeDelta>,
    pub session_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Owns every session plus the live session bookkeeping.
///
/// Mutations only change the in memory snapshot; call `save` afterwards to
/// persist it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    live: LiveState,
}

impl SessionSource for SessionStore {
    fn get_session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    fn get_sessions(&self) -> &[Session] {
        &self.sessions
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store around already validated sessions.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            live: LiveState::default(),
        }
    }

    pub fn live_state(&self) -> &LiveState {
        &self.live
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut Session> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| TrackerError::UnknownSession(id.to_string()))
    }

    /// Create a session that isn't being played yet.
    pub fn create_session(&mut self, buy_in: Option<f64>) -> &Session {
        let mut session = Session::new();
        session.buy_in = buy_in.filter(|b| b.is_finite());
        debug!(id = session.id(), "Created session");
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// Start a new live session, ending whichever session was live before.
    pub fn create_live_session(&mut self, buy_in: Option<f64>, now: DateTime<Utc>) -> &Session {
        self.end_active_session(None, now);

        let mut session = Session::new();
        session.buy_in = buy_in.filter(|b| b.is_finite());
        session.start(now);

        self.live = LiveState {
            live_session_id: Some(session.id().to_string()),
            live_session_start: Some(now),
        };
        debug!(id = session.id(), "Created live session");
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// The session currently being played.
    pub fn active_session(&self) -> Option<&Session> {
        let id = self.live.live_session_id.as_deref()?;
        self.get_session(id)
    }

    /// End a session, by default the live one.
    ///
    /// A session without a start time picks up the live start time. Ending
    /// the live session clears the live state.
    #[instrument(level = "debug", skip(self))]
    pub fn end_active_session(
        &mut self,
        session_id: Option<&str>,
        end_time: DateTime<Utc>,
    ) -> Option<&Session> {
        let target = session_id
            .map(str::to_string)
            .or_else(|| self.live.live_session_id.clone())?;
        let is_live = self.live.live_session_id.as_deref() == Some(target.as_str());
        let live_start = self.live.live_session_start;

        if is_live {
            self.live = LiveState::default();
        }

        let idx = self.sessions.iter().position(|s| s.id() == target);
        let Some(idx) = idx else {
            warn!(%target, "Asked to end a session that doesn't exist");
            return None;
        };

        let session = &mut self.sessions[idx];
        if session.started_at.is_none() {
            if let Some(start) = live_start.filter(|_| is_live) {
                session.start(start);
            }
        }
        session.end(end_time);
        Some(&self.sessions[idx])
    }

    /// Apply a partial edit to a session.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownSession` if there's no such session.
    pub fn update_session(&mut self, id: &str, update: SessionUpdate) -> Result<&Session> {
        let session = self.session_mut(id)?;

        if update.name.is_some() {
            session.name = update.name;
        }
        if let Some(buy_in) = update.buy_in.filter(|v| v.is_finite()) {
            session.buy_in = Some(buy_in);
        }
        if let Some(cash_out) = update.cash_out.filter(|v| v.is_finite()) {
            session.cash_out = Some(cash_out);
        }
        if update.small_blind.is_some() || update.big_blind.is_some() {
            let small_blind = update.small_blind.or(session.small_blind());
            let big_blind = update.big_blind.or(session.big_blind());
            session.set_stakes(small_blind, big_blind);
        }
        if update.location.is_some() {
            session.location = update.location;
        }
        if let Some(started_at) = update.started_at {
            session.start(started_at);
        }
        if let Some(ended_at) = update.ended_at {
            session.end(ended_at);
        }
        if update.duration.is_some() {
            session.duration = update.duration;
        }
        if update.session_date.is_some() {
            session.session_date = update.session_date;
        }
        if update.notes.is_some() {
            session.notes = update.notes;
        }

        let ended = session.is_completed();
        let started_at = session.started_at;

        // Keep the live bookkeeping in step with the edit.
        if self.live.live_session_id.as_deref() == Some(id) {
            if ended {
                debug!(%id, "Live session ended by update");
                self.live = LiveState::default();
            } else if started_at.is_some() {
                self.live.live_session_start = started_at;
            }
        }

        self.get_session(id)
            .ok_or_else(|| TrackerError::UnknownSession(id.to_string()))
    }

    /// Remove a session for good.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownSession` if there's no such session.
    pub fn delete_session(&mut self, id: &str) -> Result<Session> {
        let idx = self
            .sessions
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| TrackerError::UnknownSession(id.to_string()))?;

        if self.live.live_session_id.as_deref() == Some(id) {
            self.live = LiveState::default();
        }
        debug!(%id, "Deleting session");
        Ok(self.sessions.remove(idx))
    }

    /// Log a dealt hand in a session.
    pub fn add_hand(
        &mut self,
        session_id: &str,
        shape: HandShape,
        played: bool,
        at: DateTime<Utc>,
    ) -> Result<&DealtHand> {
        let session = self.session_mut(session_id)?;
        Ok(session.add_hand(shape, played, at))
    }

    /// Mark a hand in a session as played or folded.
    pub fn set_hand_played(&mut self, session_id: &str, hand_id: &str, played: bool) -> Result<()> {
        self.session_mut(session_id)?
            .set_hand_played(hand_id, played)
    }

    /// Replace the notes on a hand in a session.
    pub fn set_hand_notes(
        &mut self,
        session_id: &str,
        hand_id: &str,
        notes: Option<String>,
    ) -> Result<()> {
        self.session_mut(session_id)?
            .set_hand_notes(hand_id, notes)
    }

    /// Remove the last logged hand of a session, if it has any.
    pub fn undo_last_hand(&mut self, session_id: &str) -> Result<Option<DealtHand>> {
        Ok(self.session_mut(session_id)?.undo_last_hand())
    }

    /// Remove a hand from a session and renumber the rest.
    pub fn delete_hand(&mut self, session_id: &str, hand_id: &str) -> Result<DealtHand> {
        self.session_mut(session_id)?.delete_hand(hand_id)
    }

    /// Throw away the hand history and notes of a session, keeping its money
    /// and timing.
    pub fn clear_session_hands(&mut self, session_id: &str) -> Result<()> {
        let session = self.session_mut(session_id)?;
        session.clear_hands();
        session.notes = None;
        Ok(())
    }

    /// Forget everything.
    pub fn clear_all(&mut self) {
        debug!(sessions = self.sessions.len(), "Clearing all sessions");
        self.sessions.clear();
        self.live = LiveState::default();
    }

    /// A synthetic session holding every hand from every session, or `None`
    /// when there are no sessions at all.
    pub fn merged_session(&self) -> Option<Session> {
        if self.sessions.is_empty() {
            None
        } else {
            Some(Session::merged(&self.sessions))
        }
    }

    /// Read sessions and live state from storage.
    ///
    /// Documents that can't be parsed are treated as empty so that a broken
    /// save never locks the user out; only storage I/O errors are returned.
    #[cfg(feature = "serde")]
    #[instrument(level = "debug", skip(storage))]
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &mut S) -> Result<Self> {
        if storage.get_item(LEGACY_GAMES_KEY)?.is_some() {
            debug!("Removing legacy games key");
            storage.remove_item(LEGACY_GAMES_KEY)?;
        }

        let sessions = match storage.get_item(SESSIONS_KEY)? {
            Some(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => crate::session::normalize_sessions(&value),
                Err(e) => {
                    warn!(error = %e, "Failed to parse sessions from storage");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let live = match storage.get_item(STATE_KEY)? {
            Some(raw) => serde_json::from_str::<LiveState>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to parse app state from storage");
                LiveState::default()
            }),
            None => LiveState::default(),
        };

        let mut store = Self { sessions, live };
        // A live id pointing at a deleted session is stale.
        if let Some(id) = store.live.live_session_id.clone() {
            if store.get_session(&id).is_none() {
                warn!(%id, "Live session no longer exists");
                store.live = LiveState::default();
            }
        }

        debug!(sessions = store.sessions.len(), "Loaded session store");
        Ok(store)
    }

    /// Write sessions and live state back to storage.
    #[cfg(feature = "serde")]
    #[instrument(level = "debug", skip(self, storage), fields(sessions = self.sessions.len()))]
    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        let stored: Vec<crate::session::StoredSession> = self
            .sessions
            .iter()
            .map(crate::session::StoredSession::from)
            .collect();
        storage.set_item(SESSIONS_KEY, &serde_json::to_string(&stored)?)?;
        storage.set_item(STATE_KEY, &serde_json::to_string(&self.live)?)?;
        Ok(())
    }
}
