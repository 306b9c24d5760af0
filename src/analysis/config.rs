use crate::core::{Result, TrackerError};

/// How trend series points are built from the hand sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Averaging {
    /// Consecutive buckets that never share a hand.
    #[default]
    Batched,
    /// One point per hand, averaging a trailing window of hands.
    Rolling,
}

/// Tuning knobs for the `HandLuckAnalyzer`.
///
/// The luck threshold and the minutes per hand estimate are product tuning
/// constants, not derived statistics. The defaults are the values the
/// tracker has always shipped with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyzerConfig {
    /// Hands per trend bucket, or the window length when rolling
    pub bucket_size: usize,
    /// Batched or rolling trend points
    pub averaging: Averaging,
    /// Fewest qualifying hands before a sample gets classified
    pub min_sample_size: usize,
    /// Number of standard errors away from the expected mean that counts as
    /// running hot or cold
    pub luck_threshold: f64,
    /// Estimated minutes per hand for sessions without timing
    pub minutes_per_hand: f64,
    /// Number of bins across the 0-100 strength range
    pub histogram_bins: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            bucket_size: 10,
            averaging: Averaging::Batched,
            min_sample_size: 5,
            luck_threshold: 1.5,
            minutes_per_hand: 2.0,
            histogram_bins: 20,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the analyzer configuration
    pub fn validate(&self) -> Result<()> {
        if self.bucket_size == 0 {
            return Err(TrackerError::InvalidConfig(
                "bucket_size must be at least 1".to_string(),
            ));
        }

        if self.min_sample_size == 0 {
            return Err(TrackerError::InvalidConfig(
                "min_sample_size must be at least 1".to_string(),
            ));
        }

        if !self.luck_threshold.is_finite() || self.luck_threshold <= 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "luck_threshold ({}) must be a positive number",
                self.luck_threshold
            )));
        }

        if !self.minutes_per_hand.is_finite() || self.minutes_per_hand < 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "minutes_per_hand ({}) cannot be negative",
                self.minutes_per_hand
            )));
        }

        // More bins than strength values would leave bins that can never fill.
        if self.histogram_bins == 0 || self.histogram_bins > 101 {
            return Err(TrackerError::InvalidConfig(format!(
                "histogram_bins ({}) must be between 1 and 101",
                self.histogram_bins
            )));
        }

        Ok(())
    }
}
