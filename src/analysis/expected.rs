use crate::holdem::HandShape;

/// Mean and standard deviation of strength over every possible two card
/// holding, the baseline a dealt sample is compared against.
///
/// Each shape counts as many times as there are concrete card combinations
/// making it, so offsuit hands weigh twice as much as pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpectedDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl ExpectedDistribution {
    /// The distribution over all 169 starting hand shapes.
    pub fn standard() -> Self {
        Self::from_weighted(
            HandShape::all()
                .into_iter()
                .map(|shape| (shape.combinations(), shape.strength())),
        )
    }

    /// Weighted population mean and standard deviation of `(weight,
    /// strength)` pairs.
    ///
    /// With no weight at all this returns a mean of 0 and a standard
    /// deviation of 1, so later divisions stay finite.
    pub fn from_weighted(entries: impl IntoIterator<Item = (u32, u8)>) -> Self {
        let entries: Vec<(f64, f64)> = entries
            .into_iter()
            .map(|(weight, strength)| (f64::from(weight), f64::from(strength)))
            .collect();

        let total_weight: f64 = entries.iter().map(|(w, _)| w).sum();
        if total_weight <= 0.0 {
            return Self {
                mean: 0.0,
                std_dev: 1.0,
            };
        }

        let mean = entries.iter().map(|(w, s)| w * s).sum::<f64>() / total_weight;
        let variance = entries
            .iter()
            .map(|(w, s)| w * (s - mean).powi(2))
            .sum::<f64>()
            / total_weight;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

impl Default for ExpectedDistribution {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compute the expected strength distribution of a random deal.
pub fn compute_expected_distribution() -> ExpectedDistribution {
    ExpectedDistribution::standard()
}
