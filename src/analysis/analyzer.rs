use tracing::{debug, instrument};

use super::{
    AggregateStats, AnalyzerConfig, Averaging, BankrollSeries, Classification,
    ExpectedDistribution, SampleStats, StrengthHistogram, TrendSeries,
};
use crate::core::Result;
use crate::session::{DealtHand, Session};
use crate::store::SessionSource;

/// Turns dealt hands into a luck classification and chart series, and
/// sessions into bankroll figures.
///
/// The expected distribution is computed once when the analyzer is built.
/// Everything else is a pure function of the inputs, so one analyzer can be
/// shared by every view that needs it.
#[derive(Debug, Clone)]
pub struct HandLuckAnalyzer {
    config: AnalyzerConfig,
    expected: ExpectedDistribution,
}

impl Default for HandLuckAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            expected: ExpectedDistribution::standard(),
        }
    }
}

impl HandLuckAnalyzer {
    /// Build an analyzer after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let expected = ExpectedDistribution::standard();
        debug!(?config, ?expected, "Created hand luck analyzer");
        Ok(Self { config, expected })
    }

    /// The validated configuration in use.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Baseline mean and standard deviation of a random deal.
    pub fn expected(&self) -> &ExpectedDistribution {
        &self.expected
    }

    /// Classify whether `hands` are stronger or weaker than chance.
    ///
    /// With `played_only` only voluntarily played hands are considered.
    /// The result only depends on which strengths are in the sample, not on
    /// their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use rs_poker_tracker::analysis::{HandLuckAnalyzer, LuckLabel};
    /// use rs_poker_tracker::holdem::HandShape;
    /// use rs_poker_tracker::session::Session;
    ///
    /// let analyzer = HandLuckAnalyzer::default();
    /// let mut session = Session::new();
    /// for notation in ["AA", "72o", "T9s"] {
    ///     let shape = HandShape::from_notation(notation).unwrap();
    ///     session.add_hand(shape, false, Utc::now());
    /// }
    ///
    /// let result = analyzer.analyze_sample(session.hands(), false);
    /// assert_eq!(result.label, LuckLabel::InsufficientData);
    /// assert_eq!(result.sample_size, 3);
    /// ```
    #[instrument(level = "trace", skip(self, hands), fields(hands = hands.len()))]
    pub fn analyze_sample(&self, hands: &[DealtHand], played_only: bool) -> Classification {
        let strengths: Vec<u8> = hands
            .iter()
            .filter(|h| !played_only || h.played())
            .map(DealtHand::strength)
            .collect();

        if strengths.len() < self.config.min_sample_size {
            debug!(
                sample = strengths.len(),
                min = self.config.min_sample_size,
                "Not enough hands to classify"
            );
            return Classification::insufficient(strengths.len(), self.config.min_sample_size);
        }

        let stats = SampleStats::compute(&strengths, &self.expected);
        let classification = Classification::from_stats(
            stats,
            strengths.len(),
            &self.expected,
            self.config.luck_threshold,
        );
        debug!(
            label = ?classification.label,
            z_score = classification.z_score,
            "Classified sample"
        );
        classification
    }

    /// Trend series using the configured bucket size and averaging mode.
    pub fn build_trend_series(&self, hands: &[DealtHand]) -> TrendSeries {
        self.build_trend_series_with(hands, self.config.bucket_size, self.config.averaging)
    }

    /// Trend series with an explicit bucket size and averaging mode. A
    /// bucket size of 0 is treated as 1.
    pub fn build_trend_series_with(
        &self,
        hands: &[DealtHand],
        bucket_size: usize,
        averaging: Averaging,
    ) -> TrendSeries {
        TrendSeries::build(hands, bucket_size, averaging, self.expected.mean)
    }

    /// Histogram of dealt strengths, optionally only over played hands.
    pub fn strength_histogram(&self, hands: &[DealtHand], played_only: bool) -> StrengthHistogram {
        let strengths: Vec<u8> = hands
            .iter()
            .filter(|h| !played_only || h.played())
            .map(DealtHand::strength)
            .collect();
        StrengthHistogram::build(&strengths, self.config.histogram_bins)
    }

    /// Profit, win rate, hours and VPIP across `sessions`.
    pub fn aggregate_session_stats(&self, sessions: &[Session]) -> AggregateStats {
        AggregateStats::compute(sessions, self.config.minutes_per_hand)
    }

    /// Aggregate statistics over every session `source` holds.
    pub fn aggregate_source<S: SessionSource + ?Sized>(&self, source: &S) -> AggregateStats {
        self.aggregate_session_stats(source.get_sessions())
    }

    /// Classify one session by id, `None` if `source` doesn't have it.
    pub fn analyze_session<S: SessionSource + ?Sized>(
        &self,
        source: &S,
        session_id: &str,
        played_only: bool,
    ) -> Option<Classification> {
        source
            .get_session(session_id)
            .map(|session| self.analyze_sample(session.hands(), played_only))
    }

    /// Cumulative profit per session, oldest first.
    pub fn bankroll_series(&self, sessions: &[Session]) -> BankrollSeries {
        BankrollSeries::compute(sessions)
    }
}
