//! # Tiered Pricing Resolver
//!
//! Maps (pricing tiers, rental-day count) to a day rate and discount.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tiers: [1-2 @100.00/0%] [3-7 @85.71/14.29%] [30+ @42.86/57.14%]        │
//! │                                                                         │
//! │  days = 5   ──► scan by period_start ──► 3-7 matches ──► Matched{1}     │
//! │  days = 45  ──► 30+ (open) matches                   ──► Matched{2}     │
//! │  days = 10  ──► nothing covers 8-29                  ──► FirstTier      │
//! │  no tiers   ──► configured default (100.00 / 0%)     ──► Default        │
//! │                                                                         │
//! │  Fallbacks never block the user, but they are logged and visible on    │
//! │  the result so catalog data can be reviewed.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolved price is advisory: staff may override it on the quote line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FallbackPricing;
use crate::error::ValidationError;
use crate::money::{round_money, Money};
use crate::types::PricingTier;
use crate::validation::{validate_discount_percent, validate_price, ValidationResult};

// =============================================================================
// Resolution Result
// =============================================================================

/// Where a resolved day rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TierSource {
    /// A tier covering the day count; `index` is its position in the list.
    Matched { index: usize },
    /// No tier covered the day count; the first listed tier was used.
    FirstTier,
    /// The item has no tiers; the configured default rate was used.
    Default,
    /// Staff typed the day rate in by hand.
    Manual,
}

/// Day rate and discount for one rental length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResolution {
    pub price_per_day: Money,
    pub discount_percent: Decimal,
    pub source: TierSource,
}

impl TierResolution {
    /// Returns true if no tier matched and a fallback rate was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, TierSource::FirstTier | TierSource::Default)
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the day rate for a rental of `days` days.
///
/// Tiers are scanned in ascending `period_start` order and the first tier
/// with `days >= period_start` and (`period_end` open or `days <= period_end`)
/// wins. Tier consistency is a catalog-authoring invariant and is not
/// re-validated here (see [`validate_tiers`]).
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use rental_core::config::FallbackPricing;
/// use rental_core::money::Money;
/// use rental_core::tiers::resolve_tier;
/// use rental_core::types::PricingTier;
///
/// let tiers = vec![
///     PricingTier::bounded(1, 2, Money::from_units(100), dec!(0)),
///     PricingTier::bounded(3, 7, Money::from_cents(8571), dec!(14.29)),
///     PricingTier::open(30, Money::from_cents(4286), dec!(57.14)),
/// ];
///
/// let rate = resolve_tier(&tiers, 5, &FallbackPricing::default());
/// assert_eq!(rate.price_per_day, Money::from_cents(8571));
/// assert_eq!(rate.discount_percent, dec!(14.29));
/// ```
pub fn resolve_tier(
    tiers: &[PricingTier],
    days: u32,
    fallback: &FallbackPricing,
) -> TierResolution {
    let mut order: Vec<usize> = (0..tiers.len()).collect();
    order.sort_by_key(|&i| tiers[i].period_start);

    if let Some(index) = order.into_iter().find(|&i| tiers[i].covers(days)) {
        let tier = &tiers[index];
        debug!(days, index, price = %tier.price_per_day, "Resolved pricing tier");
        return TierResolution {
            price_per_day: tier.price_per_day,
            discount_percent: tier.discount_percent,
            source: TierSource::Matched { index },
        };
    }

    match tiers.first() {
        Some(first) => {
            warn!(
                days,
                tier_count = tiers.len(),
                price = %first.price_per_day,
                "No pricing tier covers rental period, falling back to first tier"
            );
            TierResolution {
                price_per_day: first.price_per_day,
                discount_percent: first.discount_percent,
                source: TierSource::FirstTier,
            }
        }
        None => {
            warn!(
                days,
                price = %fallback.price_per_day,
                "Item has no pricing tiers, using default day rate"
            );
            TierResolution {
                price_per_day: fallback.price_per_day,
                discount_percent: fallback.discount_percent,
                source: TierSource::Default,
            }
        }
    }
}

// =============================================================================
// Catalog Authoring Checks
// =============================================================================

/// Validates a tier list before it is saved to the catalog.
///
/// ## Rules
/// - At least one tier
/// - Every `period_start >= 1` and `period_end >= period_start`
/// - Sorted ascending and contiguous (each start = previous end + 1)
/// - Only the last tier may be open-ended
/// - Prices non-negative, discounts within 0-100
pub fn validate_tiers(tiers: &[PricingTier]) -> ValidationResult<()> {
    if tiers.is_empty() {
        return Err(ValidationError::Required {
            field: "pricing_tiers".to_string(),
        });
    }

    let inconsistent =
        |index: usize, reason: String| ValidationError::InconsistentTiers { index, reason };

    for (index, tier) in tiers.iter().enumerate() {
        validate_price("price_per_day", tier.price_per_day)?;
        validate_discount_percent(tier.discount_percent)?;

        if tier.period_start == 0 {
            return Err(inconsistent(index, "period_start must be at least 1".into()));
        }

        if let Some(end) = tier.period_end {
            if end < tier.period_start {
                return Err(inconsistent(
                    index,
                    format!("period_end {} is before period_start {}", end, tier.period_start),
                ));
            }
        } else if index + 1 != tiers.len() {
            return Err(inconsistent(index, "only the last tier may be open-ended".into()));
        }

        if index == 0 {
            continue;
        }

        // Every tier but the last is bounded, checked above
        let previous_end = tiers[index - 1].period_end.unwrap_or(u32::MAX);
        if tier.period_start <= previous_end {
            return Err(inconsistent(
                index,
                format!("overlaps previous tier ending on day {}", previous_end),
            ));
        }
        if tier.period_start != previous_end + 1 {
            return Err(inconsistent(
                index,
                format!("gap between day {} and day {}", previous_end, tier.period_start),
            ));
        }
    }

    Ok(())
}

/// A tier whose discount is smaller than the tier before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountWarning {
    pub index: usize,
    pub period_start: u32,
    pub discount_percent: Decimal,
    pub previous_discount_percent: Decimal,
}

impl std::fmt::Display for DiscountWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tier {} (from day {}) discounts {}% but the shorter tier discounts {}%",
            self.index, self.period_start, self.discount_percent, self.previous_discount_percent
        )
    }
}

/// Flags tiers whose discount decreases as the rental gets longer.
///
/// Longer rentals are expected to earn equal or bigger discounts; a
/// violation is a data-quality warning, never a pricing failure.
pub fn discount_warnings(tiers: &[PricingTier]) -> Vec<DiscountWarning> {
    let mut sorted: Vec<(usize, &PricingTier)> = tiers.iter().enumerate().collect();
    sorted.sort_by_key(|(_, tier)| tier.period_start);

    sorted
        .windows(2)
        .filter(|pair| pair[1].1.discount_percent < pair[0].1.discount_percent)
        .map(|pair| DiscountWarning {
            index: pair[1].0,
            period_start: pair[1].1.period_start,
            discount_percent: pair[1].1.discount_percent,
            previous_discount_percent: pair[0].1.discount_percent,
        })
        .collect()
}

/// Derives a tier's discount percent from the one-day base price.
///
/// ```rust
/// use rust_decimal_macros::dec;
/// use rental_core::money::Money;
/// use rental_core::tiers::discount_from_base;
///
/// let base = Money::from_units(100);
/// assert_eq!(discount_from_base(base, Money::from_cents(8571)), dec!(14.29));
/// assert_eq!(discount_from_base(base, Money::from_cents(4286)), dec!(57.14));
/// ```
pub fn discount_from_base(base_price: Money, tier_price: Money) -> Decimal {
    if base_price.is_zero() {
        return Decimal::ZERO;
    }

    let ratio = tier_price.to_decimal() / base_price.to_decimal();
    round_money((Decimal::ONE - ratio) * Decimal::ONE_HUNDRED)
}

// =============================================================================
// Unit Tests
// =============================================================================
