//! # Consumable Cost Calculator
//!
//! Fuel and periodic-maintenance charges for engine-driven equipment.
//!
//! ## Fuel
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculation_type = "motohours"  (generators, compressors, lifts)       │
//! │    l/h at 75% load × hours_per_day (default 8) × days × price/liter     │
//! │                                                                         │
//! │  calculation_type = "kilometers" (vehicles)                             │
//! │    (l/100km ÷ 100) × km_per_day × days × price/liter                    │
//! │                                                                         │
//! │  The variant IS the switch: a line prices fuel one way or the other.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Maintenance
//! Charged once per line, when included and the expected usage over the
//! rental exceeds the service interval:
//! `Σ filters + oil + work_hours × work_rate + travel_km × travel_rate`.
//! Consumables are never discounted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConsumableDefaults, LogisticsDefaults};
use crate::money::Money;
use crate::validation::{validate_figure, validate_price, ValidationResult};

// =============================================================================
// Fuel
// =============================================================================

/// How fuel consumption is measured for the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculation_type", rename_all = "snake_case")]
pub enum FuelUsage {
    /// Engine hours; consumption in liters per hour at 75% load.
    Motohours {
        consumption_per_hour: Decimal,
        #[serde(default)]
        hours_per_day: Option<Decimal>,
    },
    /// Distance driven; consumption in liters per 100 km.
    Kilometers {
        consumption_per_100km: Decimal,
        kilometers_per_day: Decimal,
    },
}

/// Fuel charge parameters on a quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelOption {
    #[serde(default)]
    pub include: bool,
    pub usage: FuelUsage,
    #[serde(default)]
    pub fuel_price_per_liter: Decimal,
}

impl FuelOption {
    /// Rejects negative or oversized consumption and price figures.
    pub fn validate(&self) -> ValidationResult<()> {
        match &self.usage {
            FuelUsage::Motohours {
                consumption_per_hour,
                hours_per_day,
            } => {
                validate_figure("fuel.consumption_per_hour", *consumption_per_hour)?;
                if let Some(hours) = hours_per_day {
                    validate_figure("fuel.hours_per_day", *hours)?;
                }
            }
            FuelUsage::Kilometers {
                consumption_per_100km,
                kilometers_per_day,
            } => {
                validate_figure("fuel.consumption_per_100km", *consumption_per_100km)?;
                validate_figure("fuel.kilometers_per_day", *kilometers_per_day)?;
            }
        }
        validate_figure("fuel.fuel_price_per_liter", self.fuel_price_per_liter)
    }
}

// =============================================================================
// Maintenance
// =============================================================================

/// Unit a service interval is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Motohours,
    Kilometers,
    Months,
}

/// Service every `every` units of usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceInterval {
    pub unit: IntervalUnit,
    pub every: Decimal,
}

/// One filter replaced at service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCost {
    pub name: String,
    pub cost: Money,
}

/// Maintenance charge parameters on a quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceOption {
    #[serde(default)]
    pub include: bool,
    pub interval: ServiceInterval,
    /// Usage expected over the rental, in the interval's unit. Projected
    /// from the rental length when unset.
    #[serde(default)]
    pub expected_usage: Option<Decimal>,
    #[serde(default)]
    pub filters: Vec<FilterCost>,
    #[serde(default)]
    pub oil_cost: Money,
    #[serde(default)]
    pub service_work_hours: Decimal,
    #[serde(default)]
    pub service_work_rate_per_hour: Decimal,
    #[serde(default)]
    pub service_travel_distance_km: Decimal,
    /// Falls back to the logistics travel rate.
    #[serde(default)]
    pub service_travel_rate_per_km: Option<Decimal>,
}

impl MaintenanceOption {
    /// A maintenance option for `interval` with no parts or labour yet.
    pub fn new(interval: ServiceInterval) -> Self {
        MaintenanceOption {
            include: false,
            interval,
            expected_usage: None,
            filters: Vec::new(),
            oil_cost: Money::zero(),
            service_work_hours: Decimal::ZERO,
            service_work_rate_per_hour: Decimal::ZERO,
            service_travel_distance_km: Decimal::ZERO,
            service_travel_rate_per_km: None,
        }
    }

    /// Rejects negative or oversized parts, labour and travel figures.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_figure("maintenance.interval", self.interval.every)?;
        if let Some(usage) = self.expected_usage {
            validate_figure("maintenance.expected_usage", usage)?;
        }
        for filter in &self.filters {
            validate_price("maintenance.filter_cost", filter.cost)?;
        }
        validate_price("maintenance.oil_cost", self.oil_cost)?;
        validate_figure("maintenance.service_work_hours", self.service_work_hours)?;
        validate_figure(
            "maintenance.service_work_rate_per_hour",
            self.service_work_rate_per_hour,
        )?;
        validate_figure(
            "maintenance.service_travel_distance_km",
            self.service_travel_distance_km,
        )?;
        if let Some(rate) = self.service_travel_rate_per_km {
            validate_figure("maintenance.service_travel_rate_per_km", rate)?;
        }
        Ok(())
    }
}

/// Consumable options of one quote line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumableSelection {
    #[serde(default)]
    pub fuel: Option<FuelOption>,
    #[serde(default)]
    pub maintenance: Option<MaintenanceOption>,
}

impl ConsumableSelection {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(fuel) = &self.fuel {
            fuel.validate()?;
        }
        if let Some(maintenance) = &self.maintenance {
            maintenance.validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Unrounded consumable costs for one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumableCosts {
    pub fuel: Decimal,
    pub maintenance: Decimal,
}

impl ConsumableCosts {
    pub fn total(&self) -> Decimal {
        self.fuel + self.maintenance
    }
}

/// Computes fuel and maintenance charges.
#[derive(Debug, Clone, Copy)]
pub struct ConsumableCalculator<'a> {
    defaults: &'a ConsumableDefaults,
    logistics: &'a LogisticsDefaults,
}

impl<'a> ConsumableCalculator<'a> {
    pub fn new(defaults: &'a ConsumableDefaults, logistics: &'a LogisticsDefaults) -> Self {
        ConsumableCalculator { defaults, logistics }
    }

    /// Fuel burned over the rental, priced per liter; 0 when not included.
    ///
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use rental_core::config::{ConsumableDefaults, LogisticsDefaults};
    /// use rental_core::consumables::{ConsumableCalculator, FuelOption, FuelUsage};
    ///
    /// let defaults = ConsumableDefaults::default();
    /// let logistics = LogisticsDefaults::default();
    /// let calc = ConsumableCalculator::new(&defaults, &logistics);
    /// let fuel = FuelOption {
    ///     include: true,
    ///     usage: FuelUsage::Motohours { consumption_per_hour: dec!(2.5), hours_per_day: None },
    ///     fuel_price_per_liter: dec!(6.50),
    /// };
    /// // 2.5 l/h × 8 h × 3 days × 6.50
    /// assert_eq!(calc.fuel_cost(&fuel, 3), dec!(390));
    /// ```
    pub fn fuel_cost(&self, fuel: &FuelOption, days: u32) -> Decimal {
        if !fuel.include {
            return Decimal::ZERO;
        }

        let liters = match &fuel.usage {
            FuelUsage::Motohours {
                consumption_per_hour,
                hours_per_day,
            } => {
                let hours = hours_per_day.unwrap_or(self.defaults.hours_per_day);
                *consumption_per_hour * hours * Decimal::from(days)
            }
            FuelUsage::Kilometers {
                consumption_per_100km,
                kilometers_per_day,
            } => {
                *consumption_per_100km / Decimal::ONE_HUNDRED
                    * *kilometers_per_day
                    * Decimal::from(days)
            }
        };

        liters * fuel.fuel_price_per_liter
    }

    /// Usage the rental is expected to accumulate, in the interval's unit.
    pub fn projected_usage(
        &self,
        interval: &ServiceInterval,
        fuel: Option<&FuelOption>,
        days: u32,
    ) -> Decimal {
        let days = Decimal::from(days);

        match interval.unit {
            IntervalUnit::Motohours => {
                let hours_per_day = match fuel.map(|f| &f.usage) {
                    Some(FuelUsage::Motohours {
                        hours_per_day: Some(hours),
                        ..
                    }) => *hours,
                    _ => self.defaults.hours_per_day,
                };
                hours_per_day * days
            }
            IntervalUnit::Kilometers => match fuel.map(|f| &f.usage) {
                Some(FuelUsage::Kilometers {
                    kilometers_per_day, ..
                }) => *kilometers_per_day * days,
                _ => Decimal::ZERO,
            },
            IntervalUnit::Months => days / Decimal::from(self.defaults.days_per_month),
        }
    }

    /// Maintenance charge; 0 unless included and the interval is crossed.
    pub fn maintenance_cost(
        &self,
        maintenance: &MaintenanceOption,
        fuel: Option<&FuelOption>,
        days: u32,
    ) -> Decimal {
        if !maintenance.include {
            return Decimal::ZERO;
        }

        let usage = maintenance
            .expected_usage
            .unwrap_or_else(|| self.projected_usage(&maintenance.interval, fuel, days));

        if usage <= maintenance.interval.every {
            debug!(
                %usage,
                interval = %maintenance.interval.every,
                "Expected usage within service interval, no maintenance charge"
            );
            return Decimal::ZERO;
        }

        let filters: Decimal = maintenance
            .filters
            .iter()
            .map(|f| f.cost.to_decimal())
            .sum();
        let travel_rate = maintenance
            .service_travel_rate_per_km
            .unwrap_or(self.logistics.travel_rate_per_km);

        filters
            + maintenance.oil_cost.to_decimal()
            + maintenance.service_work_hours * maintenance.service_work_rate_per_hour
            + maintenance.service_travel_distance_km * travel_rate
    }

    /// Costs of a whole selection.
    pub fn selection_costs(&self, selection: &ConsumableSelection, days: u32) -> ConsumableCosts {
        let fuel = selection.fuel.as_ref();

        ConsumableCosts {
            fuel: fuel.map_or(Decimal::ZERO, |f| self.fuel_cost(f, days)),
            maintenance: selection
                .maintenance
                .as_ref()
                .map_or(Decimal::ZERO, |m| self.maintenance_cost(m, fuel, days)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
