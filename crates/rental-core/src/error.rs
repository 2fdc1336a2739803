//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError        - Quote/line rule violations                     │
//! │  └── ValidationError  - Input and catalog-data validation failures     │
//! │                                                                         │
//! │  rental-quote errors (CLI crate)                                       │
//! │  └── CliError         - File, JSON, TOML and lookup failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - A day count no tier covers: resolved by the fallback, logged as a
//!   warning (see [`crate::tiers`])
//! - Non-numeric or non-positive quantity/day input: coerced to 1 at the
//!   boundary (see [`crate::validation::coerce_count`])

use thiserror::Error;

use crate::types::QuoteStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Quote composition errors.
///
/// These represent business rule violations while editing a quote. The
/// calculators themselves are total functions and never fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested more units than are currently unreserved.
    ///
    /// ## User Workflow
    /// ```text
    /// Set quantity (qty: 5)
    ///      │
    ///      ▼
    /// Check availability: available=3
    ///      │
    ///      ▼
    /// InsufficientAvailability { item: "GEN-100", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 GEN-100 available"
    /// ```
    #[error("Insufficient availability for {item}: available {available}, requested {requested}")]
    InsufficientAvailability {
        item: String,
        available: u32,
        requested: u32,
    },

    /// Line id is not part of the quote.
    #[error("Quote line not found: {0}")]
    LineNotFound(String),

    /// Quote is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Editing lines of an approved or rejected quote
    /// - Approving a quote that was never submitted
    #[error("Quote {quote_id} is {status}, cannot {operation}")]
    InvalidQuoteStatus {
        quote_id: String,
        status: QuoteStatus,
        operation: String,
    },

    /// Submitting a quote with no lines.
    #[error("Quote {0} has no lines")]
    EmptyQuote(String),

    /// Manual day-rate override attempted outside the staff flows.
    #[error("Price override is not allowed for guest catalog quotes")]
    PriceOverrideNotAllowed,

    /// Add-on id is not offered with the catalog item.
    #[error("Add-on {add_on} is not offered with {item}")]
    UnknownAddOn { item: String, add_on: String },

    /// Pricing configuration is inconsistent.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when authoring catalog data (tiers, add-ons) or when a caller
/// bypasses the coercing input boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Pricing tiers overlap, leave a gap, or are out of order.
    #[error("pricing tier {index} is inconsistent: {reason}")]
    InconsistentTiers { index: usize, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
