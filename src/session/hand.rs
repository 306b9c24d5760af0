use chrono::{DateTime, Utc};

use crate::holdem::HandShape;

/// One hand dealt during a session.
///
/// The shape, position and timestamp are fixed once the hand is logged.
/// Only the played flag and the notes can be edited, and that goes through
/// the owning `Session` so its counters stay consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct DealtHand {
    id: String,
    shape: HandShape,
    played: bool,
    position: usize,
    timestamp: DateTime<Utc>,
    notes: Option<String>,
}

impl DealtHand {
    pub(crate) fn new(
        id: String,
        shape: HandShape,
        played: bool,
        position: usize,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            shape,
            played,
            position,
            timestamp,
            notes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The starting hand shape that was dealt.
    pub fn shape(&self) -> HandShape {
        self.shape
    }

    /// Was money voluntarily put in the pot with this hand.
    pub fn played(&self) -> bool {
        self.played
    }

    /// 1-based position of this hand within its session.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Strength rank of the dealt shape, 0 strongest and 100 weakest.
    pub fn strength(&self) -> u8 {
        self.shape.strength()
    }

    pub(crate) fn set_played(&mut self, played: bool) {
        self.played = played;
    }

    pub(crate) fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}
