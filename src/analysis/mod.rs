//! Statistics over dealt hands and sessions.
//!
//! Strength ranks run from 0 (AA) to 100 (72o), so a lower average means a
//! stronger run of cards. A sample is compared against the strength of a
//! random deal, where each starting hand shape counts as many times as there
//! are card combinations making it.
//!
//! `HandLuckAnalyzer` is the entry point. It produces plain data
//! (`Classification`, `TrendSeries`, `StrengthHistogram`, `AggregateStats`,
//! `BankrollSeries`) for a renderer to draw, and `ChartSlot` manages the
//! lifetime of whatever the renderer draws.

/// Analyzer configuration.
mod config;
/// Export `AnalyzerConfig` and `Averaging`
pub use self::config::{AnalyzerConfig, Averaging};

/// The strength distribution of a random deal.
mod expected;
/// Export `ExpectedDistribution`
pub use self::expected::{ExpectedDistribution, compute_expected_distribution};

/// Luck classification of a sample.
mod luck;
pub(crate) use self::luck::SampleStats;
/// Export `Classification` and `LuckLabel`
pub use self::luck::{Classification, LuckLabel};

/// Batched and rolling trend series.
mod trend;
/// Export the trend series types
pub use self::trend::{TrendPoint, TrendSeries};

/// Strength histogram.
mod histogram;
/// Export `StrengthHistogram`
pub use self::histogram::StrengthHistogram;

/// Bankroll statistics across sessions.
mod aggregate;
/// Export `AggregateStats` and the bankroll series
pub use self::aggregate::{AggregateStats, BankrollPoint, BankrollSeries};

/// The analyzer itself.
mod analyzer;
/// Export `HandLuckAnalyzer`
pub use self::analyzer::HandLuckAnalyzer;

/// Owned chart handles.
mod chart;
/// Export the chart lifecycle types
pub use self::chart::{Chart, ChartBackend, ChartSlot};
