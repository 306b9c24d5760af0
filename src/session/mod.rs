/// A single dealt hand record.
mod hand;
/// Export `DealtHand`
pub use self::hand::DealtHand;

/// Session records with their hand history and money/timing fields.
mod tracked;
/// Export `Session` and `ShapeCount`
pub use self::tracked::{ALL_SESSIONS_ID, Session, ShapeCount};

/// VPIP based play style buckets.
mod play_style;
/// Export `PlayStyle`
pub use self::play_style::PlayStyle;

/// Conversion between typed sessions and the loose JSON they are stored as.
#[cfg(feature = "serde")]
mod stored;
/// Export the storage normalization boundary
#[cfg(feature = "serde")]
pub use self::stored::{StoredHand, StoredSession, normalize_session, normalize_sessions};
