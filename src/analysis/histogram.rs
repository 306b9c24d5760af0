use crate::holdem::WEAKEST;

/// Counts of dealt strengths across equal width bins of the 0-100 range.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StrengthHistogram {
    /// Bin ranges such as "0-5".
    pub labels: Vec<String>,
    /// Number of hands that fell in each bin.
    pub counts: Vec<usize>,
    /// 3 point moving average of `counts`. The edges repeat their own value
    /// in place of the missing neighbour.
    pub trend: Vec<f64>,
    /// Flat count per bin if strengths were spread evenly.
    pub uniform: Vec<f64>,
}

impl StrengthHistogram {
    /// Caller guarantees `bins` is at least 1.
    pub(crate) fn build(strengths: &[u8], bins: usize) -> Self {
        let bins = bins.max(1);
        let width = f64::from(WEAKEST) / bins as f64;

        let mut counts = vec![0; bins];
        for &strength in strengths {
            let idx = (f64::from(strength) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        let trend = (0..bins)
            .map(|i| {
                let left = if i > 0 { counts[i - 1] } else { counts[i] };
                let right = if i + 1 < bins { counts[i + 1] } else { counts[i] };
                (left + counts[i] + right) as f64 / 3.0
            })
            .collect();

        let labels = (0..bins)
            .map(|i| format!("{}-{}", fmt_edge(i as f64 * width), fmt_edge((i + 1) as f64 * width)))
            .collect();

        Self {
            labels,
            counts,
            trend,
            uniform: vec![strengths.len() as f64 / bins as f64; bins],
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Whole numbers without a decimal point, anything else with one digit.
fn fmt_edge(edge: f64) -> String {
    if edge.fract().abs() < 1e-9 {
        format!("{}", edge.round() as u32)
    } else {
        format!("{:.1}", edge)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_default_bins() {
        let histogram = StrengthHistogram::build(&[0, 4, 5, 99, 100, 50], 20);
        assert_eq!(histogram.counts.len(), 20);
        assert_eq!(histogram.labels[0], "0-5");
        assert_eq!(histogram.labels[19], "95-100");
        assert_eq!(histogram.counts[0], 2);
        assert_eq!(histogram.counts[1], 1);
        assert_eq!(histogram.counts[10], 1);
        // 100 lands in the last bin rather than a 21st one.
        assert_eq!(histogram.counts[19], 2);
        assert_eq!(histogram.total(), 6);
        assert_relative_eq!(histogram.uniform[7], 0.3);
    }

    #[test]
    fn test_trend_repeats_edges() {
        let histogram = StrengthHistogram::build(&[0, 0, 0, 10, 99], 4);
        assert_eq!(histogram.counts, vec![4, 0, 0, 1]);
        assert_relative_eq!(histogram.trend[0], (4.0 + 4.0 + 0.0) / 3.0);
        assert_relative_eq!(histogram.trend[1], (4.0 + 0.0 + 0.0) / 3.0);
        assert_relative_eq!(histogram.trend[3], (0.0 + 1.0 + 1.0) / 3.0);
        assert_eq!(histogram.labels, vec!["0-25", "25-50", "50-75", "75-100"]);
    }

    #[test]
    fn test_fractional_labels() {
        let histogram = StrengthHistogram::build(&[], 3);
        assert_eq!(histogram.labels, vec!["0-33.3", "33.3-66.7", "66.7-100"]);
        assert_eq!(histogram.total(), 0);
        assert!(histogram.uniform.iter().all(|u| *u == 0.0));
    }
}
