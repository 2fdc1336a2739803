//! # Money Module
//!
//! Provides the `Money` type for monetary values in quotes.
//!
//! ## Integer Cents, Decimal Intermediates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HOW A PRICE FLOWS THROUGH THE ENGINE                                   │
//! │                                                                         │
//! │  Catalog price "85.71" ──► Money(8571)        (stored, exact cents)     │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  × (1 - 14.29%) × 2 × 5 ──► Decimal 857.1018  (exact base-10 math)      │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  round half away from zero ──► Money(85710)   (serialized "857.10")     │
//! │                                                                         │
//! │  Binary floats never touch a price: "0.1 + 0.2" problems cannot occur  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Money is serialized as a fixed 2-decimal string (`"1574.52"`), never as
//! a JSON number, so a quote saved and reloaded keeps identical totals.
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! let day_rate = Money::from_cents(8571); // 85.71
//! let doubled = day_rate * 2;
//! assert_eq!(doubled.to_string(), "171.42");
//! ```

use rust_decimal::prelude::*;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;
use crate::types::VatRate;

/// Number of decimal places every stored amount carries.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a decimal amount to 2 places, halves away from zero.
///
/// This is the rounding every stored amount goes through, matching the
/// historical `toFixed(2)` behaviour of saved quotes.
///
/// ```
/// use rust_decimal_macros::dec;
/// use rental_core::money::round_money;
///
/// assert_eq!(round_money(dec!(857.1018)), dec!(857.10));
/// assert_eq!(round_money(dec!(0.125)), dec!(0.13));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (grosze / cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction stays total; quotes never go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: Fixed 2-decimal string on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const MAX: Money = Money(i64::MAX);
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let price = Money::from_cents(11500);
    /// assert_eq!(price.to_string(), "115.00");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Creates a Money value from a decimal amount, rounding to cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use rental_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(dec!(323)).cents(), 32300);
    /// assert_eq!(Money::from_decimal(dec!(1574.523)).cents(), 157452);
    /// ```
    ///
    /// Amounts beyond the `i64` cent range saturate at `Money::MIN` or
    /// `Money::MAX`.
    pub fn from_decimal(amount: Decimal) -> Self {
        match round_money(amount)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
        {
            Some(cents) => Money(cents),
            None if amount.is_sign_negative() => Money::MIN,
            None => Money::MAX,
        }
    }

    /// Returns the value as an exact 2-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MONEY_DECIMAL_PLACES)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates the VAT on this (net) amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps ± 5000) / 10000`.
    /// Adding half the divisor before the truncating division rounds half
    /// away from zero, the same as rounding `net × rate` to cents with
    /// [`round_money`]. The sign of the offset follows the amount.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    /// use rental_core::types::VatRate;
    ///
    /// let net = Money::from_cents(128010); // 1280.10
    /// let vat = net.calculate_vat(VatRate::from_percent(23));
    /// // 1280.10 × 23% = 294.423 → 294.42
    /// assert_eq!(vat.cents(), 29442);
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        // i128 prevents overflow on large amounts
        let scaled = self.0 as i128 * rate.bps() as i128;
        let vat_cents = if scaled < 0 {
            (scaled - 5000) / 10000
        } else {
            (scaled + 5000) / 10000
        };
        Money::from_cents(vat_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Returns the gross amount: `net × (1 + vat/100)`, rounded to cents.
    pub fn with_vat(&self, rate: VatRate) -> Money {
        *self + self.calculate_vat(rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Fixed 2-decimal rendering, e.g. `857.10` or `-5.50`.
///
/// ## Note
/// No currency symbol: the engine works in a single currency and symbol
/// placement is a presentation concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.minor_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' is not a decimal amount", s),
        })?;
        Ok(Money::from_decimal(amount))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a count (quantity, days).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts `"857.10"` as written by [`Money`]'s serializer, and plain JSON
/// numbers from hand-written catalog files.
struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"857.10\"")
    }

    fn visit_str<E>(self, value: &str) -> Result<Money, E>
    where
        E: de::Error,
    {
        value.parse::<Money>().map_err(E::custom)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Money, E>
    where
        E: de::Error,
    {
        Ok(Money::from_decimal(Decimal::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Money, E>
    where
        E: de::Error,
    {
        Ok(Money::from_decimal(Decimal::from(value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Money, E>
    where
        E: de::Error,
    {
        Decimal::from_f64(value)
            .map(Money::from_decimal)
            .ok_or_else(|| E::custom(format!("{} is not a finite amount", value)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
