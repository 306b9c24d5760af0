use std::fmt;
use std::str::FromStr;

use crate::core::{TrackerError, Value};

/// How the two cards of a starting hand relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suitedness {
    /// Both cards have the same value. 6 combinations.
    Pair,
    /// Two different values of the same suit. 4 combinations.
    Suited,
    /// Two different values of different suits. 12 combinations.
    Offsuit,
}

impl Suitedness {
    /// The number of concrete two card combinations from a 52 card deck that
    /// realize a single shape of this kind.
    pub fn combinations(self) -> u32 {
        match self {
            Suitedness::Pair => 6,
            Suitedness::Suited => 4,
            Suitedness::Offsuit => 12,
        }
    }
}

/// One of the 169 canonical starting hands in Texas Hold'em.
///
/// - 13 pocket pairs (e.g., AA, KK, 22)
/// - 78 suited hands (e.g., AKs, T9s)
/// - 78 offsuit hands (e.g., AKo, 72o)
///
/// # Examples
///
/// ```
/// use rs_poker_tracker::core::Value;
/// use rs_poker_tracker::holdem::HandShape;
///
/// let aks = HandShape::new(Value::Ace, Value::King, true);
/// assert_eq!(aks.to_notation(), "AKs");
/// assert_eq!(aks.combinations(), 4);
///
/// let ako = HandShape::from_notation("AKo").unwrap();
/// assert!(!ako.suited());
/// assert_eq!(ako.combinations(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct HandShape {
    /// Higher or equal value card
    high: Value,
    /// Lower or equal value card
    low: Value,
    /// true = suited, false = offsuit (pairs always false)
    suited: bool,
}

impl HandShape {
    /// Create a new HandShape from two values and suitedness.
    ///
    /// Values are automatically ordered so that `high >= low`.
    /// Pairs always have `suited = false` regardless of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::core::Value;
    /// use rs_poker_tracker::holdem::HandShape;
    ///
    /// let hand1 = HandShape::new(Value::King, Value::Ace, true);
    /// let hand2 = HandShape::new(Value::Ace, Value::King, true);
    /// assert_eq!(hand1, hand2);
    ///
    /// let pair = HandShape::new(Value::Ace, Value::Ace, true);
    /// assert!(!pair.suited());
    /// ```
    pub fn new(v1: Value, v2: Value, suited: bool) -> Self {
        let (high, low) = if v1 >= v2 { (v1, v2) } else { (v2, v1) };
        // Pairs can't be suited
        let suited = if high == low { false } else { suited };
        Self { high, low, suited }
    }

    /// Returns true if this is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// Returns true if this hand is suited.
    ///
    /// Pairs always return false.
    pub fn suited(&self) -> bool {
        self.suited
    }

    /// Returns the high card value.
    pub fn high(&self) -> Value {
        self.high
    }

    /// Returns the low card value.
    pub fn low(&self) -> Value {
        self.low
    }

    /// Pair, suited or offsuit.
    pub fn suitedness(&self) -> Suitedness {
        if self.is_pair() {
            Suitedness::Pair
        } else if self.suited {
            Suitedness::Suited
        } else {
            Suitedness::Offsuit
        }
    }

    /// Combinatorial weight of this shape: 6 for pairs, 4 for suited and 12
    /// for offsuit hands.
    ///
    /// Summed over all 169 shapes this is 1,326, the number of distinct two
    /// card combinations in a 52 card deck.
    pub fn combinations(&self) -> u32 {
        self.suitedness().combinations()
    }

    /// Row and column of this shape in the usual 13x13 grid.
    ///
    /// Ace is row/column 0. Pairs sit on the diagonal, suited hands above it
    /// and offsuit hands below it.
    pub fn grid_position(&self) -> (usize, usize) {
        let high = self.high.grid_index();
        let low = self.low.grid_index();
        if self.suited {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// The 2 or 3 character key of this shape: two value characters, high
    /// first, then `s` for suited or `o` for offsuit. Pairs have no suffix.
    pub fn to_notation(&self) -> String {
        let mut notation = String::with_capacity(3);
        notation.push(self.high.to_char());
        notation.push(self.low.to_char());
        match self.suitedness() {
            Suitedness::Pair => {}
            Suitedness::Suited => notation.push('s'),
            Suitedness::Offsuit => notation.push('o'),
        }
        notation
    }

    /// Parse a shape key such as `"QQ"`, `"T9s"` or `"A2o"`.
    ///
    /// Value characters and the suffix are case insensitive and the values
    /// may come in either order. Two different values need a suffix, and a
    /// pair must not have one.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidHandNotation` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::core::Value;
    /// use rs_poker_tracker::holdem::HandShape;
    ///
    /// let aces = HandShape::from_notation("AA").unwrap();
    /// assert!(aces.is_pair());
    /// assert_eq!(aces.high(), Value::Ace);
    ///
    /// assert!(HandShape::from_notation("AK").is_err());
    /// assert!(HandShape::from_notation("KKs").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Self, TrackerError> {
        let invalid = || TrackerError::InvalidHandNotation(s.to_string());

        let mut chars = s.chars();
        let first = chars.next().and_then(Value::from_char).ok_or_else(invalid)?;
        let second = chars.next().and_then(Value::from_char).ok_or_else(invalid)?;
        let suffix = chars.next().map(|c| c.to_ascii_lowercase());
        if chars.next().is_some() {
            return Err(invalid());
        }

        let suited = match (first == second, suffix) {
            (true, None) => false,
            (false, Some('s')) => true,
            (false, Some('o')) => false,
            _ => return Err(invalid()),
        };

        Ok(Self::new(first, second, suited))
    }

    /// Every one of the 169 shapes, strongest values first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::holdem::HandShape;
    ///
    /// assert_eq!(HandShape::all().len(), 169);
    /// ```
    pub fn all() -> Vec<Self> {
        let values = Value::values();
        values
            .iter()
            .enumerate()
            .rev()
            .flat_map(|(idx, &high)| {
                values[..=idx].iter().rev().flat_map(move |&low| {
                    let offsuit = Self::new(high, low, false);
                    let suited = (high != low).then(|| Self::new(high, low, true));
                    std::iter::once(offsuit).chain(suited)
                })
            })
            .collect()
    }
}

impl fmt::Display for HandShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl FromStr for HandShape {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl TryFrom<String> for HandShape {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl From<HandShape> for String {
    fn from(hand: HandShape) -> Self {
        hand.to_notation()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_hand_shape_ordering() {
        let hand1 = HandShape::new(Value::King, Value::Ace, true);
        let hand2 = HandShape::new(Value::Ace, Value::King, true);
        assert_eq!(hand1, hand2);
        assert_eq!(hand1.high(), Value::Ace);
        assert_eq!(hand1.low(), Value::King);
    }

    #[test]
    fn test_pair_not_suited() {
        let pair = HandShape::new(Value::King, Value::King, true);
        assert!(!pair.suited());
        assert_eq!(pair.suitedness(), Suitedness::Pair);
    }

    #[test]
    fn test_all_count() {
        let all = HandShape::all();
        assert_eq!(all.len(), 169);

        let pairs = all.iter().filter(|h| h.is_pair()).count();
        let suited = all.iter().filter(|h| h.suited()).count();
        let offsuit = all
            .iter()
            .filter(|h| h.suitedness() == Suitedness::Offsuit)
            .count();

        assert_eq!(pairs, 13);
        assert_eq!(suited, 78);
        assert_eq!(offsuit, 78);

        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 169);
    }

    #[test]
    fn test_combination_weights() {
        let mut total = 0;
        for hand in HandShape::all() {
            let expected = match hand.to_notation().len() {
                2 => 6,
                _ if hand.to_notation().ends_with('s') => 4,
                _ => 12,
            };
            assert_eq!(hand.combinations(), expected, "Bad weight for {}", hand);
            total += hand.combinations();
        }
        assert_eq!(total, 6 * 13 + 4 * 78 + 12 * 78);
        assert_eq!(total, 1326);
    }

    #[test]
    fn test_notation() {
        assert_eq!(HandShape::new(Value::Ace, Value::Ace, false).to_notation(), "AA");
        assert_eq!(HandShape::new(Value::Ten, Value::Nine, true).to_notation(), "T9s");
        assert_eq!(HandShape::new(Value::Seven, Value::Two, false).to_notation(), "72o");

        // Either order, any case.
        assert_eq!(HandShape::from_notation("9ts").unwrap().to_notation(), "T9s");
        assert_eq!(HandShape::all()[0].to_notation(), "AA");
        assert_eq!(HandShape::all()[168].to_notation(), "22");
    }

    #[test]
    fn test_notation_roundtrip_all() {
        for hand in HandShape::all() {
            let notation = hand.to_notation();
            let parsed: HandShape = notation.parse().unwrap();
            assert_eq!(hand, parsed, "Failed roundtrip for {}", notation);
        }
    }

    #[test]
    fn test_notation_invalid() {
        assert!(HandShape::from_notation("").is_err());
        assert!(HandShape::from_notation("A").is_err());
        assert!(HandShape::from_notation("AKso").is_err());
        assert!(HandShape::from_notation("XKs").is_err());
        assert!(HandShape::from_notation("AK").is_err());
        assert!(HandShape::from_notation("AAs").is_err());
        assert!(HandShape::from_notation("AAo").is_err());
        assert!(HandShape::from_notation("AKx").is_err());
    }

    #[test]
    fn test_grid_position_matches_layout() {
        let aa = HandShape::from_notation("AA").unwrap();
        assert_eq!(aa.grid_position(), (0, 0));

        let aks = HandShape::from_notation("AKs").unwrap();
        assert_eq!(aks.grid_position(), (0, 1));

        let ako = HandShape::from_notation("AKo").unwrap();
        assert_eq!(ako.grid_position(), (1, 0));

        let seven_two = HandShape::from_notation("72o").unwrap();
        assert_eq!(seven_two.grid_position(), (12, 7));

        let positions: HashSet<_> = HandShape::all()
            .iter()
            .map(|h| h.grid_position())
            .collect();
        assert_eq!(positions.len(), 169);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_notation() {
        let aks = HandShape::from_notation("AKs").unwrap();
        let json = serde_json::to_string(&aks).unwrap();
        assert_eq!(json, "\"AKs\"");

        let back: HandShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aks);

        assert!(serde_json::from_str::<HandShape>("\"AK\"").is_err());
    }
}
