//! The boundary between typed sessions and the loosely shaped JSON they are
//! persisted as.
//!
//! Stored sessions come from the user's own earlier edits, possibly written
//! by older versions of the tracker. Nothing read here is allowed to fail:
//! wrong types, missing fields and unknown hand keys are coerced to defaults
//! or dropped, with a warning, so that a corrupted record can never block the
//! caller. Everything past this module works on validated `Session` values.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::tracked::clean_text;
use super::{DealtHand, Session};
use crate::holdem::HandShape;

/// Longest explicit duration accepted from storage, one year.
const MAX_STORED_DURATION_SECONDS: f64 = 366.0 * 24.0 * 3600.0;

/// Serialized form of a session, in the camelCase layout the tracker has
/// always stored.
///
/// The counters (`total`, `totalPlayed`, `vpip`, `counts`, `playedCounts`)
/// are written for older readers but are never trusted on load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub id: String,
    pub name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub buy_in: Option<f64>,
    pub cash_out: Option<f64>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Length in seconds, millisecond precision. Preferred on load.
    pub duration_seconds: Option<f64>,
    /// The same length in fractional minutes, for older readers.
    pub duration_minutes: Option<f64>,
    pub location: Option<String>,
    pub small_blind: Option<f64>,
    pub big_blind: Option<f64>,
    pub notes: String,
    pub hand_history: Vec<StoredHand>,
    pub counts: BTreeMap<String, usize>,
    pub played_counts: BTreeMap<String, usize>,
    pub total: usize,
    pub total_played: usize,
    pub vpip: f64,
}

/// Serialized form of a dealt hand. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredHand {
    pub id: String,
    pub key: HandShape,
    pub timestamp: i64,
    pub played: bool,
    pub position: usize,
    pub notes: String,
}

impl From<&DealtHand> for StoredHand {
    fn from(hand: &DealtHand) -> Self {
        Self {
            id: hand.id().to_string(),
            key: hand.shape(),
            timestamp: hand.timestamp().timestamp_millis(),
            played: hand.played(),
            position: hand.position(),
            notes: hand.notes().unwrap_or_default().to_string(),
        }
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        let mut counts = BTreeMap::new();
        let mut played_counts = BTreeMap::new();
        for (shape, count) in session.shape_counts() {
            counts.insert(shape.to_notation(), count.dealt);
            if count.played > 0 {
                played_counts.insert(shape.to_notation(), count.played);
            }
        }

        Self {
            id: session.id().to_string(),
            name: session.name.clone(),
            created: session.created_at,
            buy_in: session.buy_in,
            cash_out: session.cash_out,
            session_date: session.session_date,
            start_time: session.started_at,
            end_time: session.ended_at,
            duration_seconds: session
                .duration
                .map(|d| d.num_milliseconds() as f64 / 1000.0),
            duration_minutes: session
                .duration
                .map(|d| d.num_milliseconds() as f64 / 60_000.0),
            location: session.location.clone(),
            small_blind: session.small_blind(),
            big_blind: session.big_blind(),
            notes: session.notes.clone().unwrap_or_default(),
            hand_history: session.hands().iter().map(StoredHand::from).collect(),
            counts,
            played_counts,
            total: session.total_hands(),
            total_played: session.total_played(),
            vpip: session.vpip_percent(),
        }
    }
}

/// Normalize a stored JSON array of sessions.
///
/// Anything that isn't an array yields no sessions, and array entries that
/// aren't objects are skipped.
pub fn normalize_sessions(value: &Value) -> Vec<Session> {
    let Some(entries) = value.as_array() else {
        warn!("Stored sessions are not an array, ignoring them");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry.as_object() {
            Some(fields) => Some(session_from_fields(fields)),
            None => {
                warn!(?entry, "Skipping stored session that is not an object");
                None
            }
        })
        .collect()
}

/// Normalize one stored session. Never fails; a value that isn't an object
/// becomes an empty session with a fresh id.
pub fn normalize_session(value: &Value) -> Session {
    match value.as_object() {
        Some(fields) => session_from_fields(fields),
        None => {
            warn!(?value, "Stored session is not an object");
            Session::with_id(Uuid::now_v7().to_string())
        }
    }
}

fn session_from_fields(fields: &Map<String, Value>) -> Session {
    let id = text(fields.get("id")).unwrap_or_else(|| {
        let id = Uuid::now_v7().to_string();
        warn!(%id, "Stored session has no id, generated one");
        id
    });

    let mut session = Session::with_id(id);
    session.name = text(fields.get("name"));
    session.created_at = timestamp(fields.get("created"));
    session.buy_in = number(fields.get("buyIn"));
    session.cash_out = number(fields.get("cashOut"));
    session.started_at = timestamp(fields.get("startTime"));
    session.ended_at = timestamp(fields.get("endTime"));
    session.duration = duration(fields);
    session.session_date = date(fields.get("sessionDate"))
        .or_else(|| session.started_at.map(|start| start.date_naive()));
    session.location = text(fields.get("location"));
    session.notes = text(fields.get("notes"));
    session.set_stakes(
        number(fields.get("smallBlind")),
        number(fields.get("bigBlind")),
    );

    // Older sessions kept the history under `hands`.
    let history = fields
        .get("handHistory")
        .or_else(|| fields.get("hands"))
        .and_then(Value::as_array);

    let mut last_seen = session
        .started_at
        .or(session.created_at)
        .unwrap_or_default();
    let mut dropped = 0;
    for entry in history.into_iter().flatten() {
        match hand_from_value(entry, last_seen) {
            Some(hand) => {
                last_seen = hand.timestamp();
                session.push_hand(hand);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(session = session.id(), dropped, "Dropped unreadable hands");
    }
    debug!(
        session = session.id(),
        hands = session.total_hands(),
        "Normalized stored session"
    );
    session
}

fn hand_from_value(value: &Value, fallback_time: DateTime<Utc>) -> Option<DealtHand> {
    let fields = value.as_object()?;
    let key = text(fields.get("key")).or_else(|| text(fields.get("hand")))?;
    let shape = match HandShape::from_notation(&key) {
        Ok(shape) => shape,
        Err(e) => {
            warn!(%key, error = %e, "Unknown hand key");
            return None;
        }
    };

    let id = text(fields.get("id")).unwrap_or_else(|| Uuid::now_v7().to_string());
    Some(DealtHand::new(
        id,
        shape,
        flag(fields.get("played")),
        // Positions are reassigned when pushed onto the session.
        0,
        timestamp(fields.get("timestamp")).unwrap_or(fallback_time),
        clean_text(text(fields.get("notes"))),
    ))
}

/// Explicit session length, from `durationSeconds` or else the older
/// `durationMinutes`. Non positive lengths are missing, and lengths past
/// `MAX_STORED_DURATION_SECONDS` are dropped as corrupt.
fn duration(fields: &Map<String, Value>) -> Option<TimeDelta> {
    let (field, seconds) = match number(fields.get("durationSeconds")) {
        Some(seconds) => ("durationSeconds", seconds),
        None => ("durationMinutes", number(fields.get("durationMinutes"))? * 60.0),
    };
    if seconds <= 0.0 {
        return None;
    }

    let delta = Some(seconds)
        .filter(|s| *s <= MAX_STORED_DURATION_SECONDS)
        .and_then(|s| TimeDelta::try_milliseconds((s * 1000.0).round() as i64));
    if delta.is_none() {
        warn!(field, seconds, "Stored duration is out of range, ignoring it");
    }
    delta
}

/// Numbers may be stored as JSON numbers or numeric strings.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Non blank strings, trimmed. Numbers are accepted as their text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => clean_text(Some(s.clone())),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// RFC 3339 strings, `datetime-local` style strings without an offset
/// (taken as UTC), or epoch milliseconds.
fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|naive| naive.and_utc())
                })
        }
        _ => None,
    }
}

fn date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .or_else(|| timestamp(value).map(|dt| dt.date_naive())),
        other => timestamp(Some(other)).map(|dt| dt.date_naive()),
    }
}
