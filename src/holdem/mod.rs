/// Module with the 169 starting hand shapes.
mod hand_shape;
/// Export `HandShape` and `Suitedness`
pub use self::hand_shape::{HandShape, Suitedness};

/// Module with the fixed pre-flop strength table.
mod strength;
/// Export the strength bounds
pub use self::strength::{STRONGEST, WEAKEST};

/// Module for dealing random starting hands from a full deck.
mod dealer;
/// Export `deal_hand_shape`
pub use self::dealer::deal_hand_shape;
