//! # Logistics Cost Calculators
//!
//! One-time charges for getting equipment to and from site.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Installation : distance × travel_rate          + techs × service_rate  │
//! │  Disassembly  : distance × travel_rate          + techs × service_rate  │
//! │  Travel/visit : distance × travel_rate × trips  + techs × service_rate  │
//! │                                                                         │
//! │  Unset fields fall back to the shared LogisticsDefaults:               │
//! │    service_rate = 150   travel_rate = 1.15   techs = 1   trips = 1     │
//! │                                                                         │
//! │  None of these are multiplied by rental days. An option that is not    │
//! │  included costs exactly 0.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LogisticsDefaults;
use crate::validation::{validate_count, validate_figure, ValidationResult};

// =============================================================================
// Options
// =============================================================================

/// The three logistics charges a line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogisticsKind {
    Installation,
    Disassembly,
    /// Travel for service visits during the rental.
    Travel,
}

impl std::fmt::Display for LogisticsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogisticsKind::Installation => write!(f, "installation"),
            LogisticsKind::Disassembly => write!(f, "disassembly"),
            LogisticsKind::Travel => write!(f, "travel"),
        }
    }
}

/// Parameters of one logistics charge as entered on the quote line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogisticsOption {
    #[serde(default)]
    pub include: bool,

    #[serde(default)]
    pub distance_km: Decimal,

    #[serde(default)]
    pub travel_rate_per_km: Option<Decimal>,

    #[serde(default)]
    pub technician_count: Option<u32>,

    #[serde(default)]
    pub service_rate_per_technician: Option<Decimal>,

    /// Only honoured by [`LogisticsKind::Travel`].
    #[serde(default)]
    pub number_of_trips: Option<u32>,
}

impl LogisticsOption {
    /// An included option with only the distance set; everything else
    /// comes from the defaults.
    pub fn included(distance_km: Decimal) -> Self {
        LogisticsOption {
            include: true,
            distance_km,
            ..Default::default()
        }
    }

    /// Rejects negative or oversized figures. `kind` prefixes field names.
    pub fn validate(&self, kind: LogisticsKind) -> ValidationResult<()> {
        validate_figure(&format!("{}.distance_km", kind), self.distance_km)?;
        if let Some(rate) = self.travel_rate_per_km {
            validate_figure(&format!("{}.travel_rate_per_km", kind), rate)?;
        }
        if let Some(rate) = self.service_rate_per_technician {
            validate_figure(&format!("{}.service_rate_per_technician", kind), rate)?;
        }
        if let Some(count) = self.technician_count {
            validate_count(&format!("{}.technician_count", kind), count)?;
        }
        if let Some(trips) = self.number_of_trips {
            validate_count(&format!("{}.number_of_trips", kind), trips)?;
        }
        Ok(())
    }
}

/// All logistics options of one quote line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogisticsSelection {
    #[serde(default)]
    pub installation: LogisticsOption,
    #[serde(default)]
    pub disassembly: LogisticsOption,
    #[serde(default)]
    pub travel: LogisticsOption,
}

impl LogisticsSelection {
    pub fn option(&self, kind: LogisticsKind) -> &LogisticsOption {
        match kind {
            LogisticsKind::Installation => &self.installation,
            LogisticsKind::Disassembly => &self.disassembly,
            LogisticsKind::Travel => &self.travel,
        }
    }

    pub fn option_mut(&mut self, kind: LogisticsKind) -> &mut LogisticsOption {
        match kind {
            LogisticsKind::Installation => &mut self.installation,
            LogisticsKind::Disassembly => &mut self.disassembly,
            LogisticsKind::Travel => &mut self.travel,
        }
    }

    /// Validates every option, included or not.
    pub fn validate(&self) -> ValidationResult<()> {
        for kind in [
            LogisticsKind::Installation,
            LogisticsKind::Disassembly,
            LogisticsKind::Travel,
        ] {
            self.option(kind).validate(kind)?;
        }
        Ok(())
    }

    /// Toggles an option; the parameters are kept so re-enabling restores them.
    pub fn set_included(&mut self, kind: LogisticsKind, include: bool) {
        self.option_mut(kind).include = include;
    }
}

/// Which logistics charges an equipment domain offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsOffer {
    pub installation: bool,
    pub disassembly: bool,
    pub travel: bool,
}

impl LogisticsOffer {
    pub const ALL: LogisticsOffer = LogisticsOffer {
        installation: true,
        disassembly: true,
        travel: true,
    };

    pub const NONE: LogisticsOffer = LogisticsOffer {
        installation: false,
        disassembly: false,
        travel: false,
    };

    pub fn offers(&self, kind: LogisticsKind) -> bool {
        match kind {
            LogisticsKind::Installation => self.installation,
            LogisticsKind::Disassembly => self.disassembly,
            LogisticsKind::Travel => self.travel,
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Unrounded logistics costs for one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogisticsCosts {
    pub installation: Decimal,
    pub disassembly: Decimal,
    pub travel: Decimal,
}

impl LogisticsCosts {
    pub fn total(&self) -> Decimal {
        self.installation + self.disassembly + self.travel
    }
}

/// Computes logistics charges against the shared defaults record.
#[derive(Debug, Clone, Copy)]
pub struct LogisticsCalculator<'a> {
    defaults: &'a LogisticsDefaults,
}

impl<'a> LogisticsCalculator<'a> {
    pub fn new(defaults: &'a LogisticsDefaults) -> Self {
        LogisticsCalculator { defaults }
    }

    /// Cost of one option; 0 when it is not included.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use rental_core::config::LogisticsDefaults;
    /// use rental_core::logistics::{LogisticsCalculator, LogisticsKind, LogisticsOption};
    ///
    /// let defaults = LogisticsDefaults::default();
    /// let calc = LogisticsCalculator::new(&defaults);
    /// let install = LogisticsOption {
    ///     technician_count: Some(2),
    ///     ..LogisticsOption::included(dec!(20))
    /// };
    /// // 20 × 1.15 + 2 × 150
    /// assert_eq!(calc.cost(LogisticsKind::Installation, &install), dec!(323));
    /// ```
    pub fn cost(&self, kind: LogisticsKind, option: &LogisticsOption) -> Decimal {
        if !option.include {
            return Decimal::ZERO;
        }

        let travel_rate = option
            .travel_rate_per_km
            .unwrap_or(self.defaults.travel_rate_per_km);
        let technicians = option
            .technician_count
            .unwrap_or(self.defaults.technician_count);
        let service_rate = option
            .service_rate_per_technician
            .unwrap_or(self.defaults.service_rate_per_technician);

        let trips = match kind {
            LogisticsKind::Travel => option
                .number_of_trips
                .unwrap_or(self.defaults.number_of_trips),
            LogisticsKind::Installation | LogisticsKind::Disassembly => 1,
        };

        option.distance_km * travel_rate * Decimal::from(trips)
            + Decimal::from(technicians) * service_rate
    }

    pub fn installation_cost(&self, option: &LogisticsOption) -> Decimal {
        self.cost(LogisticsKind::Installation, option)
    }

    pub fn disassembly_cost(&self, option: &LogisticsOption) -> Decimal {
        self.cost(LogisticsKind::Disassembly, option)
    }

    pub fn travel_cost(&self, option: &LogisticsOption) -> Decimal {
        self.cost(LogisticsKind::Travel, option)
    }

    /// Costs of a whole selection, skipping options the domain does not offer.
    pub fn selection_costs(
        &self,
        selection: &LogisticsSelection,
        offer: LogisticsOffer,
    ) -> LogisticsCosts {
        let priced = |kind: LogisticsKind| {
            let option = selection.option(kind);
            if !offer.offers(kind) {
                if option.include {
                    debug!(%kind, "Logistics option not offered for this item, ignoring");
                }
                return Decimal::ZERO;
            }
            self.cost(kind, option)
        };

        LogisticsCosts {
            installation: priced(LogisticsKind::Installation),
            disassembly: priced(LogisticsKind::Disassembly),
            travel: priced(LogisticsKind::Travel),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_installation_with_explicit_rates() {
        let defaults = LogisticsDefaults::default();
        let calc = LogisticsCalculator::new(&defaults);
        let option = LogisticsOption {
            include: true,
            distance_km: dec!(20),
            travel_rate_per_km: Some(dec!(1.15)),
            technician_count: Some(2),
            service_rate_per_technician: Some(dec!(150)),
            number_of_trips: None,
        };

        assert_eq!(calc.installation_cost(&option), dec!(323.00));
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let defaults = LogisticsDefaults::default();
        let calc = LogisticsCalculator::new(&defaults);

        // 10 × 1.15 + 1 × 150
        assert_eq!(calc.disassembly_cost(&LogisticsOption::included(dec!(10))), dec!(161.5));
    }

    #[test]
    fn test_only_travel_multiplies_by_trips() {
        let defaults = LogisticsDefaults::default();
        let calc = LogisticsCalculator::new(&defaults);
        let option = LogisticsOption {
            number_of_trips: Some(3),
            ..LogisticsOption::included(dec!(40))
        };

        // 40 × 1.15 × 3 + 150
        assert_eq!(calc.travel_cost(&option), dec!(288));
        // trips ignored: 40 × 1.15 + 150
        assert_eq!(calc.installation_cost(&option), dec!(196));
    }

    #[test]
    fn test_not_included_costs_zero() {
        let defaults = LogisticsDefaults::default();
        let calc = LogisticsCalculator::new(&defaults);
        let mut selection = LogisticsSelection {
            installation: LogisticsOption::included(dec!(20)),
            ..Default::default()
        };
        assert_eq!(
            calc.selection_costs(&selection, LogisticsOffer::ALL).installation,
            dec!(173)
        );

        selection.set_included(LogisticsKind::Installation, false);
        let costs = calc.selection_costs(&selection, LogisticsOffer::ALL);
        assert_eq!(costs.installation, Decimal::ZERO);
        assert_eq!(costs.total(), Decimal::ZERO);
        // parameters survive the toggle
        assert_eq!(selection.installation.distance_km, dec!(20));
    }

    #[test]
    fn test_options_not_offered_are_ignored() {
        let defaults = LogisticsDefaults::default();
        let calc = LogisticsCalculator::new(&defaults);
        let selection = LogisticsSelection {
            installation: LogisticsOption::included(dec!(20)),
            travel: LogisticsOption::included(dec!(20)),
            ..Default::default()
        };
        let offer = LogisticsOffer {
            installation: false,
            disassembly: false,
            travel: true,
        };

        let costs = calc.selection_costs(&selection, offer);
        assert_eq!(costs.installation, Decimal::ZERO);
        assert_eq!(costs.travel, dec!(173));
    }

    #[test]
    fn test_custom_defaults_are_injected() {
        let defaults = LogisticsDefaults {
            service_rate_per_technician: dec!(200),
            travel_rate_per_km: dec!(2),
            technician_count: 2,
            number_of_trips: 2,
        };
        let calc = LogisticsCalculator::new(&defaults);

        // 10 × 2 × 2 + 2 × 200
        assert_eq!(calc.travel_cost(&LogisticsOption::included(dec!(10))), dec!(440));
    }

    #[test]
    fn test_validate_rejects_negative_and_oversized_figures() {
        let mut selection = LogisticsSelection {
            installation: LogisticsOption::included(dec!(20)),
            ..Default::default()
        };
        assert!(selection.validate().is_ok());

        selection.installation.distance_km = dec!(-1000);
        let err = selection.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "installation.distance_km must be between 0 and 1000000"
        );

        selection.installation.distance_km = dec!(20);
        selection.travel = LogisticsOption {
            number_of_trips: Some(100),
            ..LogisticsOption::included(Decimal::MAX)
        };
        assert!(selection.validate().is_err());

        selection.travel = LogisticsOption {
            service_rate_per_technician: Some(dec!(-150)),
            ..Default::default()
        };
        // excluded options are validated too, so re-enabling stays safe
        assert!(selection.validate().is_err());
    }
}
