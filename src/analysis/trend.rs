use super::Averaging;
use crate::session::DealtHand;

/// One point of a trend series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrendPoint {
    /// Range of 1-based hand positions covered, e.g. "11-20".
    pub label: String,
    /// Hands averaged into this point.
    pub hands: usize,
    /// How many of those were played.
    pub played: usize,
    pub average_strength: f64,
    pub played_percent: f64,
}

/// Chart ready series of average strength and played percentage over the
/// course of a hand sequence.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    /// Flat reference line drawn next to the averages.
    pub expected_mean: f64,
}

impl TrendSeries {
    /// Build a series from `hands` in the order given.
    ///
    /// Batched points cover consecutive runs of `bucket_size` hands, the
    /// last one possibly shorter. Rolling points are one per hand, each
    /// averaging up to `bucket_size` hands ending at that hand.
    pub(crate) fn build(
        hands: &[DealtHand],
        bucket_size: usize,
        averaging: Averaging,
        expected_mean: f64,
    ) -> Self {
        let bucket_size = bucket_size.max(1);
        let points = match averaging {
            Averaging::Batched => hands
                .chunks(bucket_size)
                .enumerate()
                .map(|(idx, bucket)| point(bucket, idx * bucket_size + 1))
                .collect(),
            Averaging::Rolling => (0..hands.len())
                .map(|end| {
                    let start = (end + 1).saturating_sub(bucket_size);
                    point(&hands[start..=end], start + 1)
                })
                .collect(),
        };

        Self {
            points,
            expected_mean,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn average_strengths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.average_strength).collect()
    }

    pub fn played_percents(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.played_percent).collect()
    }
}

/// Caller guarantees `hands` is not empty.
fn point(hands: &[DealtHand], first_position: usize) -> TrendPoint {
    let count = hands.len();
    let played = hands.iter().filter(|h| h.played()).count();
    let total_strength: f64 = hands.iter().map(|h| f64::from(h.strength())).sum();

    TrendPoint {
        label: format!("{}-{}", first_position, first_position + count - 1),
        hands: count,
        played,
        average_strength: total_strength / count as f64,
        played_percent: played as f64 / count as f64 * 100.0,
    }
}
