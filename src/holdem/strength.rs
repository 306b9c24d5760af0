use super::HandShape;

/// Strength rank of the best starting hand (AA).
pub const STRONGEST: u8 = 0;
/// Strength rank of the worst starting hand (72o).
pub const WEAKEST: u8 = 100;

/// Pre-flop strength rank for every starting hand, laid out in the 13x13
/// grid used by `HandShape::grid_position`. Lower is stronger.
///
/// Rows and columns run A, K, Q, J, T, 9 .. 2. The diagonal holds pairs,
/// above it the suited hands and below it the offsuit hands.
#[rustfmt::skip]
const STRENGTH_GRID: [[u8; 13]; 13] = [
    //A   K    Q    J    T    9    8    7    6    5    4    3    2
    [  0,   2,   2,   3,   5,   8,  10,  13,  14,  12,  14,  14,  17], // A
    [  5,   1,   3,   3,   6,  10,  16,  19,  24,  25,  25,  26,  26], // K
    [  8,   9,   1,   5,   6,  10,  19,  26,  28,  29,  29,  30,  31], // Q
    [ 12,  14,  15,   2,   6,  11,  17,  27,  33,  35,  37,  37,  38], // J
    [ 18,  20,  22,  21,   4,  10,  16,  25,  31,  40,  40,  41,  41], // T
    [ 32,  35,  36,  34,  31,   7,  17,  24,  29,  38,  47,  47,  49], // 9
    [ 39,  50,  53,  48,  43,  42,   9,  21,  27,  33,  40,  53,  54], // 8
    [ 45,  57,  66,  64,  59,  55,  52,  12,  25,  28,  37,  45,  56], // 7
    [ 51,  60,  71,  80,  74,  68,  61,  57,  16,  27,  29,  38,  49], // 6
    [ 44,  63,  75,  82,  89,  83,  73,  65,  58,  20,  28,  32,  39], // 5
    [ 46,  67,  76,  82,  90,  95,  88,  78,  70,  62,  23,  36,  41], // 4
    [ 49,  67,  77,  86,  92,  96,  98,  93,  81,  72,  76,  23,  46], // 3
    [ 54,  69,  79,  87,  94,  97,  99, 100,  95,  84,  86,  91,  24], // 2
];

impl HandShape {
    /// Fixed strength rank in `[0, 100]`, where 0 is the strongest starting
    /// hand and 100 the weakest.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::holdem::HandShape;
    ///
    /// assert_eq!(HandShape::from_notation("AA").unwrap().strength(), 0);
    /// assert_eq!(HandShape::from_notation("72o").unwrap().strength(), 100);
    /// ```
    pub fn strength(&self) -> u8 {
        let (row, col) = self.grid_position();
        STRENGTH_GRID[row][col]
    }
}
