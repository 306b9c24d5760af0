/// Card values from two to ace.
mod value;
/// Export `Value`
pub use self::value::Value;

/// The crate wide error type.
mod error;
/// Export `TrackerError` and the `Result` alias.
pub use self::error::{Result, TrackerError};
