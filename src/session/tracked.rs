use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tracing::{debug, trace};
use uuid::Uuid;

use super::{DealtHand, PlayStyle};
use crate::core::{Result, TrackerError};
use crate::holdem::HandShape;

/// Id used for the synthetic session that merges every stored session.
pub const ALL_SESSIONS_ID: &str = "__all__";

/// Seconds in an hour, used for all hour conversions.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// How often a single shape was dealt and played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeCount {
    pub dealt: usize,
    pub played: usize,
}

/// A poker session: the ordered hands dealt in it, plus optional money and
/// timing information.
///
/// The hand counters are always derived from the hand list, so the number of
/// hands and the VPIP can never drift from the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: String,
    hands: Vec<DealtHand>,
    small_blind: Option<f64>,
    big_blind: Option<f64>,

    /// Optional display name.
    pub name: Option<String>,
    /// When the session record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// Money brought to the table.
    pub buy_in: Option<f64>,
    /// Money taken off the table.
    pub cash_out: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Explicitly entered length of the session. Preferred over
    /// `ended_at - started_at` when present.
    pub duration: Option<TimeDelta>,
    /// Calendar day the session was played.
    pub session_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with a fresh id.
    pub fn new() -> Self {
        let mut session = Self::with_id(Uuid::now_v7().to_string());
        session.created_at = Some(Utc::now());
        session
    }

    /// Create an empty session with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hands: Vec::new(),
            small_blind: None,
            big_blind: None,
            name: None,
            created_at: None,
            buy_in: None,
            cash_out: None,
            started_at: None,
            ended_at: None,
            duration: None,
            session_date: None,
            location: None,
            notes: None,
        }
    }

    /// Build a view that merges the hands of every given session.
    ///
    /// Hands are ordered by timestamp and renumbered from 1. Money and timing
    /// are left unset since they don't add up in a meaningful way; use the
    /// aggregate statistics for those.
    pub fn merged<'a>(sessions: impl IntoIterator<Item = &'a Session>) -> Self {
        let mut merged = Self::with_id(ALL_SESSIONS_ID);
        merged.name = Some("All Sessions".to_string());

        merged.hands = sessions
            .into_iter()
            .flat_map(|s| s.hands.iter().cloned())
            .collect();
        // Stable so hands with the same timestamp keep their session order.
        merged.hands.sort_by_key(|h| h.timestamp());
        merged.renumber();

        debug!(hands = merged.hands.len(), "Merged sessions");
        merged
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The hands of this session in the order they were dealt.
    pub fn hands(&self) -> &[DealtHand] {
        &self.hands
    }

    /// Look up a hand by id.
    pub fn hand(&self, hand_id: &str) -> Option<&DealtHand> {
        self.hands.iter().find(|h| h.id() == hand_id)
    }

    /// Log a newly dealt hand at the end of the history.
    pub fn add_hand(&mut self, shape: HandShape, played: bool, at: DateTime<Utc>) -> &DealtHand {
        let position = self.hands.len() + 1;
        let hand = DealtHand::new(Uuid::now_v7().to_string(), shape, played, position, at, None);
        trace!(session = %self.id, %shape, played, position, "Adding hand");
        self.hands.push(hand);
        &self.hands[position - 1]
    }

    /// Append an already built hand, keeping its id, timestamp and notes.
    /// The position is reassigned.
    pub(crate) fn push_hand(&mut self, mut hand: DealtHand) {
        hand.set_position(self.hands.len() + 1);
        self.hands.push(hand);
    }

    /// Mark a hand as played or folded.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownHand` if no hand has that id.
    pub fn set_hand_played(&mut self, hand_id: &str, played: bool) -> Result<()> {
        let hand = self.hand_mut(hand_id)?;
        hand.set_played(played);
        Ok(())
    }

    /// Replace the notes on a hand. Blank notes clear them.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownHand` if no hand has that id.
    pub fn set_hand_notes(&mut self, hand_id: &str, notes: Option<String>) -> Result<()> {
        let hand = self.hand_mut(hand_id)?;
        hand.set_notes(clean_text(notes));
        Ok(())
    }

    /// Remove the most recently logged hand.
    pub fn undo_last_hand(&mut self) -> Option<DealtHand> {
        let removed = self.hands.pop();
        if let Some(hand) = &removed {
            trace!(session = %self.id, hand = hand.id(), "Undid last hand");
        }
        removed
    }

    /// Remove a hand anywhere in the history and renumber the rest.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownHand` if no hand has that id.
    pub fn delete_hand(&mut self, hand_id: &str) -> Result<DealtHand> {
        let idx = self
            .hands
            .iter()
            .position(|h| h.id() == hand_id)
            .ok_or_else(|| self.unknown_hand(hand_id))?;
        let removed = self.hands.remove(idx);
        self.renumber();
        Ok(removed)
    }

    /// Drop every hand from the history.
    pub fn clear_hands(&mut self) {
        self.hands.clear();
    }

    /// Number of hands dealt.
    pub fn total_hands(&self) -> usize {
        self.hands.len()
    }

    /// Number of hands voluntarily played.
    pub fn total_played(&self) -> usize {
        self.hands.iter().filter(|h| h.played()).count()
    }

    /// Percentage of dealt hands that were played. 0 with no hands.
    pub fn vpip_percent(&self) -> f64 {
        let total = self.total_hands();
        if total == 0 {
            0.0
        } else {
            (self.total_played() as f64 / total as f64) * 100.0
        }
    }

    pub fn play_style(&self) -> PlayStyle {
        PlayStyle::from_vpip(self.vpip_percent())
    }

    /// Dealt and played counts per shape.
    pub fn shape_counts(&self) -> HashMap<HandShape, ShapeCount> {
        let mut counts: HashMap<HandShape, ShapeCount> = HashMap::new();
        for hand in &self.hands {
            let count = counts.entry(hand.shape()).or_default();
            count.dealt += 1;
            if hand.played() {
                count.played += 1;
            }
        }
        counts
    }

    /// Does the session have both a buy in and a cash out.
    pub fn has_financials(&self) -> bool {
        self.buy_in.is_some() && self.cash_out.is_some()
    }

    /// Cash out minus buy in, when both are known.
    pub fn profit(&self) -> Option<f64> {
        match (self.buy_in, self.cash_out) {
            (Some(buy_in), Some(cash_out)) => Some(cash_out - buy_in),
            _ => None,
        }
    }

    /// Measured length of the session in hours.
    ///
    /// The explicit duration wins, then the span between start and end.
    /// Zero or negative spans are treated as missing.
    pub fn duration_hours(&self) -> Option<f64> {
        let explicit = self.duration.map(|d| d.num_seconds() as f64 / SECONDS_PER_HOUR);
        let measured = match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds() as f64 / SECONDS_PER_HOUR),
            _ => None,
        };

        explicit
            .filter(|hours| *hours > 0.0)
            .or_else(|| measured.filter(|hours| *hours > 0.0))
    }

    /// Profit per measured hour. 0 when either is unknown.
    pub fn hourly_rate(&self) -> f64 {
        match (self.profit(), self.duration_hours()) {
            (Some(profit), Some(hours)) => profit / hours,
            _ => 0.0,
        }
    }

    /// Record the start of play.
    pub fn start(&mut self, at: DateTime<Utc>) {
        self.started_at = Some(at);
        if self.session_date.is_none() {
            self.session_date = Some(at.date_naive());
        }
    }

    /// Finalize the session timing.
    pub fn end(&mut self, at: DateTime<Utc>) {
        debug!(session = %self.id, %at, "Ending session");
        self.ended_at = Some(at);
    }

    /// Started but not yet ended.
    pub fn is_live(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn small_blind(&self) -> Option<f64> {
        self.small_blind
    }

    pub fn big_blind(&self) -> Option<f64> {
        self.big_blind
    }

    /// Set the blinds. Values that are not positive finite numbers are
    /// stored as missing, the rest are rounded to cents.
    pub fn set_stakes(&mut self, small_blind: Option<f64>, big_blind: Option<f64>) {
        self.small_blind = small_blind.and_then(clean_stake);
        self.big_blind = big_blind.and_then(clean_stake);
    }

    /// Stakes in the usual "sb/bb" form.
    pub fn stake(&self) -> Option<String> {
        match (self.small_blind, self.big_blind) {
            (Some(sb), Some(bb)) => Some(format!("{}/{}", sb, bb)),
            _ => None,
        }
    }

    /// Profit expressed in big blinds, rounded to the nearest one.
    pub fn big_blinds_won(&self) -> Option<i64> {
        let bb = self.big_blind?;
        let profit = self.profit()?;
        Some((profit / bb).round() as i64)
    }

    /// Best guess at when the session happened, for ordering: start time,
    /// then the session day, then the end time.
    pub fn sort_time(&self) -> Option<DateTime<Utc>> {
        self.started_at
            .or_else(|| {
                self.session_date
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            })
            .or(self.ended_at)
    }

    fn hand_mut(&mut self, hand_id: &str) -> Result<&mut DealtHand> {
        match self.hands.iter().position(|h| h.id() == hand_id) {
            Some(idx) => Ok(&mut self.hands[idx]),
            None => Err(self.unknown_hand(hand_id)),
        }
    }

    fn unknown_hand(&self, hand_id: &str) -> TrackerError {
        TrackerError::UnknownHand {
            session_id: self.id.clone(),
            hand_id: hand_id.to_string(),
        }
    }

    fn renumber(&mut self) {
        for (idx, hand) in self.hands.iter_mut().enumerate() {
            hand.set_position(idx + 1);
        }
    }
}

/// Trim free text, mapping blank text to `None`.
pub(crate) fn clean_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Positive finite stakes rounded to cents.
pub(crate) fn clean_stake(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some((value * 100.0).round() / 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    use super::*;

    fn shape(notation: &str) -> HandShape {
        HandShape::from_notation(notation).unwrap()
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 20, minute, 0).unwrap()
    }

    #[test]
    fn test_counters_follow_history() {
        let mut session = Session::new();
        assert_eq!(session.total_hands(), 0);
        assert_eq!(session.vpip_percent(), 0.0);

        session.add_hand(shape("AA"), true, at(0));
        session.add_hand(shape("72o"), false, at(1));
        session.add_hand(shape("T9s"), true, at(2));
        session.add_hand(shape("AA"), false, at(3));

        assert_eq!(session.total_hands(), 4);
        assert_eq!(session.total_played(), 2);
        assert_relative_eq!(session.vpip_percent(), 50.0);
        assert_eq!(session.play_style(), PlayStyle::Maniac);

        let counts = session.shape_counts();
        assert_eq!(counts[&shape("AA")], ShapeCount { dealt: 2, played: 1 });
        assert_eq!(counts[&shape("72o")], ShapeCount { dealt: 1, played: 0 });
    }

    #[test]
    fn test_positions_are_sequential() {
        let mut session = Session::new();
        for minute in 0..5 {
            session.add_hand(shape("KQo"), false, at(minute));
        }
        let positions: Vec<_> = session.hands().iter().map(|h| h.position()).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_edit_played_and_notes() {
        let mut session = Session::new();
        let id = session.add_hand(shape("JJ"), false, at(0)).id().to_string();

        session.set_hand_played(&id, true).unwrap();
        assert_eq!(session.total_played(), 1);

        session
            .set_hand_notes(&id, Some("  flopped a set ".to_string()))
            .unwrap();
        assert_eq!(session.hand(&id).unwrap().notes(), Some("flopped a set"));

        session.set_hand_notes(&id, Some("   ".to_string())).unwrap();
        assert_eq!(session.hand(&id).unwrap().notes(), None);

        assert!(matches!(
            session.set_hand_played("missing", true),
            Err(TrackerError::UnknownHand { .. })
        ));
    }

    #[test]
    fn test_undo_last_hand() {
        let mut session = Session::new();
        assert!(session.undo_last_hand().is_none());

        session.add_hand(shape("AKs"), true, at(0));
        session.add_hand(shape("32o"), false, at(1));

        let undone = session.undo_last_hand().unwrap();
        assert_eq!(undone.shape(), shape("32o"));
        assert_eq!(session.total_hands(), 1);
        assert_eq!(session.total_played(), 1);
    }

    #[test]
    fn test_delete_hand_renumbers() {
        let mut session = Session::new();
        session.add_hand(shape("AA"), true, at(0));
        let middle = session.add_hand(shape("KK"), true, at(1)).id().to_string();
        session.add_hand(shape("QQ"), false, at(2));

        let removed = session.delete_hand(&middle).unwrap();
        assert_eq!(removed.shape(), shape("KK"));
        assert_eq!(session.total_hands(), 2);
        assert_eq!(session.hands()[1].shape(), shape("QQ"));
        assert_eq!(session.hands()[1].position(), 2);

        assert!(session.delete_hand(&middle).is_err());
    }

    #[test]
    fn test_profit_and_duration() {
        let mut session = Session::new();
        assert_eq!(session.profit(), None);
        assert_eq!(session.hourly_rate(), 0.0);

        session.buy_in = Some(100.0);
        session.cash_out = Some(250.0);
        assert_eq!(session.profit(), Some(150.0));

        // No timing yet
        assert_eq!(session.duration_hours(), None);
        assert_eq!(session.hourly_rate(), 0.0);

        session.start(Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap());
        assert!(session.is_live());
        session.end(Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap());
        assert!(!session.is_live());
        assert!(session.is_completed());

        assert_relative_eq!(session.duration_hours().unwrap(), 3.0);
        assert_relative_eq!(session.hourly_rate(), 50.0);

        // Explicit duration wins
        session.duration = Some(TimeDelta::minutes(90));
        assert_relative_eq!(session.duration_hours().unwrap(), 1.5);
        assert_relative_eq!(session.hourly_rate(), 100.0);
    }

    #[test]
    fn test_negative_span_is_ignored() {
        let mut session = Session::new();
        session.started_at = Some(at(30));
        session.ended_at = Some(at(10));
        assert_eq!(session.duration_hours(), None);

        session.ended_at = session.started_at;
        assert_eq!(session.duration_hours(), None);

        session.duration = Some(TimeDelta::zero());
        assert_eq!(session.duration_hours(), None);
    }

    #[test]
    fn test_start_sets_session_date() {
        let mut session = Session::new();
        session.start(at(0));
        assert_eq!(session.session_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(session.sort_time(), Some(at(0)));
    }

    #[test]
    fn test_sort_time_falls_back_to_date() {
        let mut session = Session::with_id("s1");
        assert_eq!(session.sort_time(), None);

        session.session_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(
            session.sort_time(),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_stakes() {
        let mut session = Session::new();
        assert_eq!(session.stake(), None);
        assert_eq!(session.big_blinds_won(), None);

        session.set_stakes(Some(1.0), Some(2.004));
        assert_eq!(session.big_blind(), Some(2.0));
        assert_eq!(session.stake(), Some("1/2".to_string()));

        session.buy_in = Some(200.0);
        session.cash_out = Some(351.0);
        assert_eq!(session.big_blinds_won(), Some(76));

        session.set_stakes(Some(-1.0), Some(f64::NAN));
        assert_eq!(session.small_blind(), None);
        assert_eq!(session.big_blind(), None);
    }

    #[test]
    fn test_merged_orders_by_time() {
        let mut first = Session::with_id("a");
        first.add_hand(shape("AA"), true, at(0));
        first.add_hand(shape("KK"), false, at(10));

        let mut second = Session::with_id("b");
        second.add_hand(shape("QQ"), true, at(5));

        let merged = Session::merged([&first, &second]);
        assert_eq!(merged.id(), ALL_SESSIONS_ID);
        assert_eq!(merged.total_hands(), 3);
        assert_eq!(merged.total_played(), 2);

        let order: Vec<_> = merged.hands().iter().map(|h| h.shape()).collect();
        assert_eq!(order, vec![shape("AA"), shape("QQ"), shape("KK")]);

        let positions: Vec<_> = merged.hands().iter().map(|h| h.position()).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}
