use std::fmt;

use super::ExpectedDistribution;

/// Verdict on whether a sample of dealt hands is stronger or weaker than a
/// random deal would give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LuckLabel {
    /// Dealt hands are significantly stronger than expected.
    Hot,
    /// Dealt hands are significantly weaker than expected.
    Cold,
    /// Within normal variance.
    Expected,
    /// Too few hands to say anything.
    InsufficientData,
}

impl fmt::Display for LuckLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LuckLabel::Hot => "running hot",
            LuckLabel::Cold => "running cold",
            LuckLabel::Expected => "within expected variance",
            LuckLabel::InsufficientData => "insufficient data",
        };
        write!(f, "{s}")
    }
}

/// Result of classifying a sample of dealt hands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Classification {
    pub label: LuckLabel,
    /// Plain average strength of the sample.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Standard errors between the sample mean and the expected mean.
    /// Negative means stronger hands than expected.
    pub z_score: f64,
    pub sample_size: usize,
    /// Human readable summary of the above.
    pub explanation: String,
}

/// Summary statistics of a sample of strength ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SampleStats {
    pub mean: f64,
    pub std_dev: f64,
    pub z_score: f64,
}

impl SampleStats {
    /// Caller guarantees `strengths` is not empty.
    pub(crate) fn compute(strengths: &[u8], expected: &ExpectedDistribution) -> Self {
        let n = strengths.len() as f64;
        let mean = strengths.iter().map(|&s| f64::from(s)).sum::<f64>() / n;

        let std_dev = if strengths.len() > 1 {
            let sum_sq: f64 = strengths
                .iter()
                .map(|&s| (f64::from(s) - mean).powi(2))
                .sum();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let std_error = expected.std_dev / n.sqrt();
        let z_score = if std_error == 0.0 {
            0.0
        } else {
            (mean - expected.mean) / std_error
        };

        Self {
            mean,
            std_dev,
            z_score,
        }
    }
}

impl Classification {
    /// The result for a sample smaller than `min_sample_size`.
    pub(crate) fn insufficient(sample_size: usize, min_sample_size: usize) -> Self {
        Self {
            label: LuckLabel::InsufficientData,
            mean: 0.0,
            std_dev: 0.0,
            z_score: 0.0,
            sample_size,
            explanation: format!(
                "Only {sample_size} qualifying hands. Add at least {} more for a reliable read on variance.",
                min_sample_size.saturating_sub(sample_size)
            ),
        }
    }

    /// Label a computed sample. Strength ranks run from strong to weak, so
    /// a z-score at or below `-threshold` is a hot run.
    pub(crate) fn from_stats(
        stats: SampleStats,
        sample_size: usize,
        expected: &ExpectedDistribution,
        threshold: f64,
    ) -> Self {
        let (label, summary) = if stats.z_score <= -threshold {
            (
                LuckLabel::Hot,
                "You're getting significantly better hands than expected.",
            )
        } else if stats.z_score >= threshold {
            (
                LuckLabel::Cold,
                "You're catching significantly weaker hands than expected.",
            )
        } else {
            (
                LuckLabel::Expected,
                "Your dealt hands are within normal variance.",
            )
        };

        let direction = if stats.z_score > 0.0 { "above" } else { "below" };
        let explanation = format!(
            "{summary} Average strength {:.1} (std dev {:.1}) over {sample_size} hands vs expected {:.1}. \
             That is {:.2} standard errors {direction} expectation.",
            stats.mean,
            stats.std_dev,
            expected.mean,
            stats.z_score.abs(),
        );

        Self {
            label,
            mean: stats.mean,
            std_dev: stats.std_dev,
            z_score: stats.z_score,
            sample_size,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_single_value_has_no_spread() {
        let stats = SampleStats::compute(&[40], &ExpectedDistribution::standard());
        assert_eq!(stats.mean, 40.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_bessel_corrected_std_dev() {
        let expected = ExpectedDistribution {
            mean: 50.0,
            std_dev: 10.0,
        };
        let stats = SampleStats::compute(&[40, 50, 60, 50], &expected);
        assert_relative_eq!(stats.mean, 50.0);
        // Squared deviations sum to 200, over n - 1 = 3.
        assert_relative_eq!(stats.std_dev, (200.0_f64 / 3.0).sqrt());
        assert_relative_eq!(stats.z_score, 0.0);
    }

    #[test]
    fn test_zero_standard_error() {
        let expected = ExpectedDistribution {
            mean: 50.0,
            std_dev: 0.0,
        };
        let stats = SampleStats::compute(&[0, 0, 0], &expected);
        assert_eq!(stats.z_score, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let expected = ExpectedDistribution {
            mean: 50.0,
            std_dev: 10.0,
        };
        let at_threshold = SampleStats {
            mean: 45.0,
            std_dev: 0.0,
            z_score: -1.5,
        };
        let c = Classification::from_stats(at_threshold, 4, &expected, 1.5);
        assert_eq!(c.label, LuckLabel::Hot);

        let cold = SampleStats {
            z_score: 1.5,
            ..at_threshold
        };
        assert_eq!(
            Classification::from_stats(cold, 4, &expected, 1.5).label,
            LuckLabel::Cold
        );

        let inside = SampleStats {
            z_score: 1.49,
            ..at_threshold
        };
        assert_eq!(
            Classification::from_stats(inside, 4, &expected, 1.5).label,
            LuckLabel::Expected
        );
    }

    #[test]
    fn test_insufficient() {
        let c = Classification::insufficient(3, 5);
        assert_eq!(c.label, LuckLabel::InsufficientData);
        assert_eq!(c.sample_size, 3);
        assert_eq!(c.z_score, 0.0);
        assert!(c.explanation.contains("2 more"));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(LuckLabel::Hot.to_string(), "running hot");
        assert_eq!(LuckLabel::InsufficientData.to_string(), "insufficient data");
    }
}
