//! # Pricing Configuration
//!
//! The single shared record of pricing defaults injected into the
//! calculators. Loading it from files or the environment is the job of
//! the application shell; this module only defines the shape, the
//! defaults and validation.
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! rounding = "per_field"   # per_field | round_once
//! vat_rate_bps = 2300      # 23%
//!
//! [logistics]
//! service_rate_per_technician = "150"
//! travel_rate_per_km = "1.15"
//! technician_count = 1
//! number_of_trips = 1
//!
//! [consumables]
//! hours_per_day = "8"
//! days_per_month = 30
//!
//! [fallback]
//! price_per_day = "100.00"
//! discount_percent = "0"
//! ```
//!
//! ## Backward Compatibility
//! The logistics defaults (150 per technician, 1.15 per km, one technician,
//! one trip) and the fallback day rate (100, 0%) reproduce the totals of
//! previously saved quotes. Change them only for new deployments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::VatRate;
use crate::validation::{validate_count, validate_figure, validate_price};

// =============================================================================
// Rounding Mode
// =============================================================================

/// When line sub-costs are rounded to cents.
///
/// ## Mode Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PER_FIELD (Default)                │  ROUND_ONCE                       │
/// │  ───────────────────                │  ──────────                       │
/// │  • Each part rounded, then summed   │  • Raw parts summed, then rounded │
/// │  • Matches historical saved quotes  │  • No accumulated rounding drift  │
/// │  • Line total = Σ displayed parts   │  • Parts may differ by a cent     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round every sub-cost to 2 decimals before summation.
    #[default]
    PerField,
    /// Sum unrounded sub-costs and round the line total once.
    RoundOnce,
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingMode::PerField => write!(f, "per_field"),
            RoundingMode::RoundOnce => write!(f, "round_once"),
        }
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_field" | "legacy" => Ok(RoundingMode::PerField),
            "round_once" | "once" => Ok(RoundingMode::RoundOnce),
            other => Err(CoreError::InvalidConfig(format!(
                "Unknown rounding mode: '{}'. Valid options: per_field, round_once",
                other
            ))),
        }
    }
}

// =============================================================================
// Logistics Defaults
// =============================================================================

/// Defaults applied when a logistics option leaves a rate or count unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsDefaults {
    #[serde(default = "default_service_rate")]
    pub service_rate_per_technician: Decimal,

    #[serde(default = "default_travel_rate")]
    pub travel_rate_per_km: Decimal,

    #[serde(default = "default_one")]
    pub technician_count: u32,

    /// Trips for service visits; only the travel option multiplies by it.
    #[serde(default = "default_one")]
    pub number_of_trips: u32,
}

fn default_service_rate() -> Decimal {
    Decimal::new(150, 0)
}

fn default_travel_rate() -> Decimal {
    Decimal::new(115, 2)
}

fn default_one() -> u32 {
    1
}

impl Default for LogisticsDefaults {
    fn default() -> Self {
        LogisticsDefaults {
            service_rate_per_technician: default_service_rate(),
            travel_rate_per_km: default_travel_rate(),
            technician_count: default_one(),
            number_of_trips: default_one(),
        }
    }
}

// =============================================================================
// Consumable Defaults
// =============================================================================

/// Defaults for fuel and maintenance projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableDefaults {
    /// Operating hours per rental day for motohour-based fuel.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,

    /// Days counted as one month for month-based service intervals.
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,
}

fn default_hours_per_day() -> Decimal {
    Decimal::new(8, 0)
}

fn default_days_per_month() -> u32 {
    30
}

impl Default for ConsumableDefaults {
    fn default() -> Self {
        ConsumableDefaults {
            hours_per_day: default_hours_per_day(),
            days_per_month: default_days_per_month(),
        }
    }
}

// =============================================================================
// Fallback Pricing
// =============================================================================

/// Day rate used when an item has no pricing tiers at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPricing {
    #[serde(default = "default_fallback_price")]
    pub price_per_day: Money,

    #[serde(default)]
    pub discount_percent: Decimal,
}

fn default_fallback_price() -> Money {
    Money::from_units(100)
}

impl Default for FallbackPricing {
    fn default() -> Self {
        FallbackPricing {
            price_per_day: default_fallback_price(),
            discount_percent: Decimal::ZERO,
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete pricing configuration shared by every equipment domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Default VAT for new quotes, in basis points.
    #[serde(default = "default_vat_bps")]
    pub vat_rate_bps: u32,

    #[serde(default)]
    pub logistics: LogisticsDefaults,

    #[serde(default)]
    pub consumables: ConsumableDefaults,

    #[serde(default)]
    pub fallback: FallbackPricing,
}

fn default_vat_bps() -> u32 {
    VatRate::default().bps()
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            rounding: RoundingMode::default(),
            vat_rate_bps: default_vat_bps(),
            logistics: LogisticsDefaults::default(),
            consumables: ConsumableDefaults::default(),
            fallback: FallbackPricing::default(),
        }
    }
}

impl PricingConfig {
    /// Returns the default VAT rate for new quotes.
    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_bps(self.vat_rate_bps)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.vat_rate_bps > 10000 {
            return Err(CoreError::InvalidConfig(format!(
                "vat_rate_bps must be between 0 and 10000, got {}",
                self.vat_rate_bps
            )));
        }

        let logistics = &self.logistics;
        let invalid = |e: crate::error::ValidationError| CoreError::InvalidConfig(e.to_string());
        validate_figure(
            "service_rate_per_technician",
            logistics.service_rate_per_technician,
        )
        .map_err(invalid)?;
        validate_figure("travel_rate_per_km", logistics.travel_rate_per_km).map_err(invalid)?;
        validate_count("technician_count", logistics.technician_count).map_err(invalid)?;
        validate_count("number_of_trips", logistics.number_of_trips).map_err(invalid)?;
        if logistics.technician_count == 0 || logistics.number_of_trips == 0 {
            return Err(CoreError::InvalidConfig(
                "technician_count and number_of_trips must be greater than 0".into(),
            ));
        }

        if self.consumables.hours_per_day <= Decimal::ZERO
            || self.consumables.hours_per_day > Decimal::new(24, 0)
        {
            return Err(CoreError::InvalidConfig(format!(
                "hours_per_day must be within (0, 24], got {}",
                self.consumables.hours_per_day
            )));
        }
        if self.consumables.days_per_month == 0 {
            return Err(CoreError::InvalidConfig(
                "days_per_month must be greater than 0".into(),
            ));
        }

        validate_price("fallback.price_per_day", self.fallback.price_per_day).map_err(invalid)?;
        if self.fallback.discount_percent.is_sign_negative()
            || self.fallback.discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(CoreError::InvalidConfig(
                "fallback price must be non-negative and its discount within 0-100".into(),
            ));
        }

        Ok(())
    }
}
