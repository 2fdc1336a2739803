//! # Validation Module
//!
//! Input coercion and validation for the quoting engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input boundary                                          │
//! │  ├── coerce_count / coerce_count_str                                   │
//! │  └── Non-numeric or <= 0 quantity/day values become 1                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Quote line rules                                             │
//! │  ├── validate_quantity (availability)                                  │
//! │  ├── validate_rental_days                                              │
//! │  └── validate_figure / validate_count (logistics, consumables)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculators                                                  │
//! │  └── Assume bounded non-negative inputs, never fail                   │
//! │                                                                         │
//! │  Catalog authoring: validate_item_name, validate_price,                │
//! │  validate_discount_percent, tiers::validate_tiers                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LINE_FIGURE, MAX_QUOTE_LINES, MAX_RENTAL_DAYS, MAX_UNIT_COUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Input Boundary Coercion
// =============================================================================

/// Coerces a raw quantity or day count to a safe positive value.
///
/// Zero and negative values become 1; values beyond `u32` saturate.
///
/// ```rust
/// use rental_core::validation::coerce_count;
///
/// assert_eq!(coerce_count(5), 5);
/// assert_eq!(coerce_count(0), 1);
/// assert_eq!(coerce_count(-3), 1);
/// ```
pub fn coerce_count(value: i64) -> u32 {
    if value <= 0 {
        return 1;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Coerces a raw form string to a safe positive count.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Quote line: change rental days                                         │
/// │                                                                         │
/// │  User types: "7"   ──► 7                                                │
/// │  User types: "2.5" ──► 2   (fraction dropped)                           │
/// │  User types: ""    ──► 1   (never blocks the form)                      │
/// │  User types: "abc" ──► 1                                                │
/// │  User types: "-4"  ──► 1                                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn coerce_count_str(raw: &str) -> u32 {
    let raw = raw.trim();

    if let Ok(value) = raw.parse::<i64>() {
        return coerce_count(value);
    }

    raw.parse::<Decimal>()
        .ok()
        .and_then(|d| d.trunc().to_i64())
        .map(coerce_count)
        .unwrap_or(1)
}

// =============================================================================
// Quote Line Validators
// =============================================================================

/// Validates a line quantity against the item's unreserved count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `available`
pub fn validate_quantity(qty: u32, available: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    let max = available.min(MAX_UNIT_COUNT);
    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: max as i64,
        });
    }

    Ok(())
}

/// Validates a rental period length in days.
pub fn validate_rental_days(days: u32) -> ValidationResult<()> {
    if days == 0 {
        return Err(ValidationError::MustBePositive {
            field: "rental_period_days".to_string(),
        });
    }

    if days > MAX_RENTAL_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "rental_period_days".to_string(),
            min: 1,
            max: MAX_RENTAL_DAYS as i64,
        });
    }

    Ok(())
}

/// Validates quote size (number of lines).
pub fn validate_quote_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_QUOTE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "quote lines".to_string(),
            min: 0,
            max: MAX_QUOTE_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a catalog item or add-on name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (bundled items).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > Money::from_units(MAX_LINE_FIGURE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_LINE_FIGURE,
        });
    }

    Ok(())
}

// =============================================================================
// Line Option Validators
// =============================================================================

/// Validates a rate, distance or consumption figure entered on a line.
///
/// ## Rules
/// - Must not be negative
/// - Must be at most [`MAX_LINE_FIGURE`]
///
/// Keeps every line total non-negative and every product of figures far
/// inside `Decimal` range.
pub fn validate_figure(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::from(MAX_LINE_FIGURE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_LINE_FIGURE,
        });
    }

    Ok(())
}

/// Validates a technician, trip or add-on count.
pub fn validate_count(field: &str, count: u32) -> ValidationResult<()> {
    if count > MAX_UNIT_COUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_UNIT_COUNT as i64,
        });
    }

    Ok(())
}

/// Validates a discount percentage (0 to 100).
pub fn validate_discount_percent(pct: Decimal) -> ValidationResult<()> {
    if pct.is_sign_negative() || pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a VAT rate in basis points (0% to 100%).
pub fn validate_vat_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
