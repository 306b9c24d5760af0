//! rs_poker_tracker is a library for recording the hands a player is dealt
//! over live poker sessions and turning them into statistics.
//!
//! The crate is split into a few modules:
//!
//! - `core` holds the card values and the crate error type.
//! - `holdem` holds the 169 starting hand shapes and their strength table.
//! - `session` holds the typed session and dealt hand records, plus the
//!   normalization boundary for loosely shaped stored data.
//! - `store` owns sessions, applies hand logging actions and reads/writes the
//!   key value storage the sessions are persisted in.
//! - `analysis` holds the `HandLuckAnalyzer` that classifies a sample of dealt
//!   hands as running hot, cold or as expected, and builds chart series.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rs_poker_tracker::analysis::{HandLuckAnalyzer, LuckLabel};
//! use rs_poker_tracker::holdem::HandShape;
//! use rs_poker_tracker::session::Session;
//!
//! let analyzer = HandLuckAnalyzer::default();
//! let mut session = Session::new();
//! let aces = HandShape::from_notation("AA").unwrap();
//! for _ in 0..10 {
//!     session.add_hand(aces, true, Utc::now());
//! }
//!
//! let result = analyzer.analyze_sample(session.hands(), true);
//! assert_eq!(result.label, LuckLabel::Hot);
//! ```
#![deny(clippy::all)]

/// Core card values and errors.
pub mod core;

/// Starting hand shapes and their strength.
pub mod holdem;

/// Sessions and the hands dealt in them.
pub mod session;

/// Owning store for sessions and the storage they persist to.
pub mod store;

/// Luck classification, chart series and bankroll statistics.
pub mod analysis;
