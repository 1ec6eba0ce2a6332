//! Error types for the pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during pricing and reconciliation.
//!
//! Restriction violations are deliberately NOT errors: an unsellable rate is
//! a normal outcome, reported through
//! [`RestrictionResult`](crate::restrictions::RestrictionResult) so that
//! several reasons can be surfaced together.

use thiserror::Error;

/// The main error type for the pricing engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use pricing_engine::error::EngineError;
///
/// let error = EngineError::UnresolvedMultiplier { adults: 3, children: 2 };
/// assert_eq!(
///     error.to_string(),
///     "No multiplier configured for occupancy 3 adults / 2 children"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No multiplier entry exists for an occupancy combination.
    ///
    /// This is a configuration gap, not an input problem: the room type's
    /// multiplier template is missing an entry for a combination the hotel
    /// sells. It must surface rather than silently defaulting to 1.0.
    #[error("No multiplier configured for occupancy {adults} adults / {children} children")]
    UnresolvedMultiplier {
        /// Number of adults in the combination.
        adults: u32,
        /// Number of children in the combination.
        children: u32,
    },

    /// A computed pricing result is missing required data.
    #[error("Pricing validation failed [{code}]: {message}")]
    ValidationFailure {
        /// Machine-readable failure code, e.g. `MISSING_PRICING_DATA` or
        /// `MISSING_PRICING_FIELD_ORIGINALTOTAL`.
        code: String,
        /// Human-readable description of the failure.
        message: String,
    },

    /// A price input was negative where only zero or positive is meaningful.
    #[error("Negative price for '{field}': {value}")]
    NegativePrice {
        /// The field carrying the negative value.
        field: &'static str,
        /// The offending value, rendered as a string.
        value: String,
    },

    /// A date range had a start on or after its end.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// Range start (inclusive).
        start: chrono::NaiveDate,
        /// Range end (exclusive).
        end: chrono::NaiveDate,
    },

    /// The backing inventory store failed to read or write.
    #[error("Inventory store error: {message}")]
    Store {
        /// A description of the underlying store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
