/// Card rank values, lowest to highest.
///
/// Suits never matter for the statistics in this crate, only the value of
/// each card and whether two cards share a suit.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values, in ascending order.
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value.
    ///
    /// Anything above 12 saturates to `Value::Ace`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::core::Value;
    /// assert_eq!(Value::Four, Value::from_u8(2));
    /// ```
    pub fn from_u8(v: u8) -> Self {
        VALUES[usize::from(v.min(12))]
    }

    /// Get all of the `Value`'s that are possible, lowest first.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(Some(Value::Ace), Value::from_char('A'));
    /// assert_eq!(None, Value::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// Position of this value in the descending A..2 ordering used by the
    /// 13x13 starting hand grid. Ace is 0 and two is 12.
    pub(crate) fn grid_index(self) -> usize {
        12 - self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_saturates() {
        assert_eq!(Value::Two, Value::from_u8(0));
        assert_eq!(Value::Ace, Value::from_u8(12));
        assert_eq!(Value::Ace, Value::from_u8(200));
    }

    #[test]
    fn test_char_roundtrip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_char(v.to_char()));
            assert_eq!(Some(v), Value::from_char(v.to_char().to_ascii_lowercase()));
        }
    }

    #[test]
    fn test_values_ascending() {
        let values = Value::values();
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_grid_index() {
        assert_eq!(0, Value::Ace.grid_index());
        assert_eq!(4, Value::Ten.grid_index());
        assert_eq!(12, Value::Two.grid_index());
    }
}
