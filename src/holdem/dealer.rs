use rand::Rng;

use super::HandShape;
use crate::core::Value;

/// Number of cards in a full deck.
const DECK_SIZE: u8 = 52;

/// Deal two distinct cards from a freshly shuffled 52 card deck and return
/// the starting hand shape they make.
///
/// Every concrete two card combination is equally likely, so each shape
/// comes up in proportion to its `combinations()` weight. Useful for
/// simulating dealt samples that should run exactly as expected.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use rs_poker_tracker::holdem::deal_hand_shape;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let shape = deal_hand_shape(&mut rng);
/// assert!(shape.strength() <= 100);
/// ```
pub fn deal_hand_shape<R: Rng + ?Sized>(rng: &mut R) -> HandShape {
    let first = rng.random_range(0..DECK_SIZE);
    // Pick from the 51 remaining cards by skipping over the first one.
    let mut second = rng.random_range(0..DECK_SIZE - 1);
    if second >= first {
        second += 1;
    }

    let (first_value, first_suit) = (first / 4, first % 4);
    let (second_value, second_suit) = (second / 4, second % 4);

    HandShape::new(
        Value::from_u8(first_value),
        Value::from_u8(second_value),
        first_suit == second_suit,
    )
}
