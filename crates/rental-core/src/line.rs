//! # Quote Line Composer
//!
//! Combines the resolver and every calculator into one line total.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_total  = price_per_day × (1 − discount/100) × quantity × days     │
//! │  add-ons     = additional + accessories          (never discounted)     │
//! │  logistics   = installation + disassembly + travel   (one-time)         │
//! │  consumables = fuel + maintenance                    (never discounted) │
//! │                                                                         │
//! │  total_price = base + add-ons + logistics + consumables                 │
//! │                                                                         │
//! │  RoundingMode::PerField  : round every part to 2dp, then sum            │
//! │  RoundingMode::RoundOnce : sum unrounded parts, round the sum once      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`QuoteLine`] copies the item identity, its tiers and the selected
//! add-on prices when it is created, so later catalog edits never change
//! a saved quote. Every mutation recomputes the whole line; there is no
//! cached partial state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::addons::aggregate_add_ons;
use crate::config::{PricingConfig, RoundingMode};
use crate::consumables::{
    ConsumableCalculator, ConsumableSelection, FuelOption, MaintenanceOption,
};
use crate::domain::RentalItem;
use crate::error::{CoreError, CoreResult};
use crate::logistics::{LogisticsCalculator, LogisticsOffer, LogisticsSelection};
use crate::money::Money;
use crate::tiers::{resolve_tier, TierResolution, TierSource};
use crate::types::{EquipmentDomain, PricingTier, SelectedAddOn};
use crate::validation::{
    validate_count, validate_discount_percent, validate_price, validate_quantity,
    validate_rental_days,
};

// =============================================================================
// Pure Composition
// =============================================================================

/// Everything a line total depends on.
#[derive(Debug, Clone, Copy)]
pub struct LineInputs<'a> {
    pub price_per_day: Money,
    pub discount_percent: Decimal,
    pub quantity: u32,
    pub days: u32,
    pub add_ons: &'a [SelectedAddOn],
    pub logistics: &'a LogisticsSelection,
    pub logistics_offer: LogisticsOffer,
    pub consumables: &'a ConsumableSelection,
}

/// Rounded cost parts of one line and their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreakdown {
    pub base_total: Money,
    pub additional_cost: Money,
    pub accessories_cost: Money,
    pub installation_cost: Money,
    pub disassembly_cost: Money,
    pub travel_cost: Money,
    pub fuel_cost: Money,
    pub maintenance_cost: Money,
    pub total_price: Money,
}

/// Discounted rental cost before add-ons, unrounded.
pub fn base_total(
    price_per_day: Money,
    discount_percent: Decimal,
    quantity: u32,
    days: u32,
) -> Decimal {
    let discount = discount_percent / Decimal::ONE_HUNDRED;
    price_per_day.to_decimal()
        * (Decimal::ONE - discount)
        * Decimal::from(quantity)
        * Decimal::from(days)
}

/// Computes the breakdown of one line.
///
/// Pure and total: identical inputs always give an identical breakdown.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use rental_core::config::PricingConfig;
/// use rental_core::consumables::ConsumableSelection;
/// use rental_core::line::{compose_line, LineInputs};
/// use rental_core::logistics::{LogisticsOffer, LogisticsSelection};
/// use rental_core::money::Money;
///
/// let inputs = LineInputs {
///     price_per_day: Money::from_units(100),
///     discount_percent: dec!(14.29),
///     quantity: 2,
///     days: 5,
///     add_ons: &[],
///     logistics: &LogisticsSelection::default(),
///     logistics_offer: LogisticsOffer::ALL,
///     consumables: &ConsumableSelection::default(),
/// };
/// let line = compose_line(&inputs, &PricingConfig::default());
/// assert_eq!(line.total_price.to_string(), "857.10");
/// ```
pub fn compose_line(inputs: &LineInputs<'_>, config: &PricingConfig) -> LineBreakdown {
    let base = base_total(
        inputs.price_per_day,
        inputs.discount_percent,
        inputs.quantity,
        inputs.days,
    );
    let add_ons = aggregate_add_ons(inputs.add_ons, inputs.days);
    let logistics = LogisticsCalculator::new(&config.logistics)
        .selection_costs(inputs.logistics, inputs.logistics_offer);
    let consumables = ConsumableCalculator::new(&config.consumables, &config.logistics)
        .selection_costs(inputs.consumables, inputs.days);

    let raw = [
        base,
        add_ons.additional,
        add_ons.accessories,
        logistics.installation,
        logistics.disassembly,
        logistics.travel,
        consumables.fuel,
        consumables.maintenance,
    ];

    let total_price = match config.rounding {
        RoundingMode::PerField => raw.iter().map(|part| Money::from_decimal(*part)).sum(),
        RoundingMode::RoundOnce => Money::from_decimal(raw.iter().copied().sum()),
    };

    LineBreakdown {
        base_total: Money::from_decimal(base),
        additional_cost: Money::from_decimal(add_ons.additional),
        accessories_cost: Money::from_decimal(add_ons.accessories),
        installation_cost: Money::from_decimal(logistics.installation),
        disassembly_cost: Money::from_decimal(logistics.disassembly),
        travel_cost: Money::from_decimal(logistics.travel),
        fuel_cost: Money::from_decimal(consumables.fuel),
        maintenance_cost: Money::from_decimal(consumables.maintenance),
        total_price,
    }
}

// =============================================================================
// Quote Line
// =============================================================================

/// One selected catalog item within a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub id: Uuid,

    /// Catalog id at time of adding (frozen)
    pub item_id: String,

    /// Display name at time of adding (frozen)
    pub item_name: String,

    pub domain: EquipmentDomain,

    /// Unreserved units when the line was created
    pub available_quantity: u32,

    /// Tier list at time of adding (frozen); re-resolved on day changes
    pub pricing_tiers: Vec<PricingTier>,

    pub quantity: u32,
    pub rental_period_days: u32,
    pub price_per_day: Money,
    pub discount_percent: Decimal,
    pub price_overridden: bool,
    pub tier_source: TierSource,

    #[serde(default)]
    pub add_ons: Vec<SelectedAddOn>,

    pub logistics_offer: LogisticsOffer,

    #[serde(default)]
    pub logistics: LogisticsSelection,

    #[serde(default)]
    pub consumables: ConsumableSelection,

    pub breakdown: LineBreakdown,
}

impl QuoteLine {
    /// Creates a line for one unit over one day.
    ///
    /// ## Prefilled state
    /// - Tier resolved for 1 day
    /// - Non-optional add-ons selected with quantity 1
    /// - Fuel and maintenance options copied from the item's technical
    ///   data, not included until the user switches them on
    pub fn from_item<T: RentalItem + ?Sized>(
        item: &T,
        config: &PricingConfig,
    ) -> CoreResult<Self> {
        let available = item.available_quantity();
        if available == 0 {
            return Err(CoreError::InsufficientAvailability {
                item: item.item_id().to_string(),
                available,
                requested: 1,
            });
        }

        let tiers = item.pricing_tiers().to_vec();
        for tier in &tiers {
            validate_price("price_per_day", tier.price_per_day)?;
            validate_discount_percent(tier.discount_percent)?;
        }
        for add_on in item.add_ons() {
            validate_price("add_on price_per_day", add_on.price_per_day)?;
        }
        let TierResolution {
            price_per_day,
            discount_percent,
            source,
        } = resolve_tier(&tiers, 1, &config.fallback);

        let add_ons = item
            .add_ons()
            .iter()
            .filter(|a| !a.is_optional)
            .map(|a| a.snapshot(1))
            .collect();

        let consumables = ConsumableSelection {
            fuel: item.fuel_profile().map(|usage| FuelOption {
                include: false,
                usage,
                fuel_price_per_liter: Decimal::ZERO,
            }),
            maintenance: item.service_interval().map(MaintenanceOption::new),
        };

        let mut line = QuoteLine {
            id: Uuid::new_v4(),
            item_id: item.item_id().to_string(),
            item_name: item.display_name().to_string(),
            domain: item.domain(),
            available_quantity: available,
            pricing_tiers: tiers,
            quantity: 1,
            rental_period_days: 1,
            price_per_day,
            discount_percent,
            price_overridden: false,
            tier_source: source,
            add_ons,
            logistics_offer: item.logistics_offer(),
            logistics: LogisticsSelection::default(),
            consumables,
            breakdown: LineBreakdown::default(),
        };
        line.recompute(config);

        debug!(
            line_id = %line.id,
            item = %line.item_id,
            domain = %line.domain,
            "Created quote line"
        );
        Ok(line)
    }

    /// Line total (rounded).
    #[inline]
    pub fn total_price(&self) -> Money {
        self.breakdown.total_price
    }

    /// Inputs for [`compose_line`] borrowed from this line.
    pub fn inputs(&self) -> LineInputs<'_> {
        LineInputs {
            price_per_day: self.price_per_day,
            discount_percent: self.discount_percent,
            quantity: self.quantity,
            days: self.rental_period_days,
            add_ons: &self.add_ons,
            logistics: &self.logistics,
            logistics_offer: self.logistics_offer,
            consumables: &self.consumables,
        }
    }

    /// Recomputes the breakdown from scratch.
    pub fn recompute(&mut self, config: &PricingConfig) {
        self.breakdown = compose_line(&self.inputs(), config);
    }

    /// Sets the rented unit count.
    pub fn set_quantity(&mut self, quantity: u32, config: &PricingConfig) -> CoreResult<()> {
        if quantity > self.available_quantity {
            return Err(CoreError::InsufficientAvailability {
                item: self.item_id.clone(),
                available: self.available_quantity,
                requested: quantity,
            });
        }
        validate_quantity(quantity, self.available_quantity)?;

        self.quantity = quantity;
        self.recompute(config);
        Ok(())
    }

    /// Sets the rental length, re-resolving the tier unless the day rate
    /// was entered by hand.
    pub fn set_rental_days(&mut self, days: u32, config: &PricingConfig) -> CoreResult<()> {
        validate_rental_days(days)?;

        self.rental_period_days = days;
        if !self.price_overridden {
            self.apply_resolution(resolve_tier(&self.pricing_tiers, days, &config.fallback));
        }
        self.recompute(config);
        Ok(())
    }

    /// Replaces the resolved day rate and discount with manual values.
    ///
    /// Origin rules (guest quotes may not override) are enforced by
    /// [`crate::quote::Quote`].
    pub fn override_price(
        &mut self,
        price_per_day: Money,
        discount_percent: Decimal,
        config: &PricingConfig,
    ) -> CoreResult<()> {
        validate_price("price_per_day", price_per_day)?;
        validate_discount_percent(discount_percent)?;

        self.price_per_day = price_per_day;
        self.discount_percent = discount_percent;
        self.price_overridden = true;
        self.tier_source = TierSource::Manual;
        self.recompute(config);
        Ok(())
    }

    /// Drops a manual price and goes back to the tier for the current days.
    pub fn clear_price_override(&mut self, config: &PricingConfig) {
        self.price_overridden = false;
        self.apply_resolution(resolve_tier(
            &self.pricing_tiers,
            self.rental_period_days,
            &config.fallback,
        ));
        self.recompute(config);
    }

    /// Selects an add-on offered with `item`, or updates its quantity if
    /// already selected. The current catalog price is frozen on selection.
    pub fn select_add_on<T: RentalItem + ?Sized>(
        &mut self,
        item: &T,
        add_on_id: &str,
        quantity: u32,
        config: &PricingConfig,
    ) -> CoreResult<()> {
        validate_count("add_on quantity", quantity)?;
        let offered = item
            .find_add_on(add_on_id)
            .filter(|_| item.item_id() == self.item_id)
            .ok_or_else(|| CoreError::UnknownAddOn {
                item: self.item_id.clone(),
                add_on: add_on_id.to_string(),
            })?;

        match self.add_ons.iter_mut().find(|a| a.id == add_on_id) {
            Some(selected) => selected.quantity = quantity.max(1),
            None => self.add_ons.push(offered.snapshot(quantity)),
        }

        self.recompute(config);
        Ok(())
    }

    /// Removes a selected add-on. Returns false if it was not selected.
    pub fn deselect_add_on(&mut self, add_on_id: &str, config: &PricingConfig) -> bool {
        let before = self.add_ons.len();
        self.add_ons.retain(|a| a.id != add_on_id);
        let removed = self.add_ons.len() != before;

        if removed {
            self.recompute(config);
        }
        removed
    }

    /// Replaces the logistics selection. Negative or oversized figures are
    /// rejected and leave the line unchanged.
    pub fn set_logistics(
        &mut self,
        logistics: LogisticsSelection,
        config: &PricingConfig,
    ) -> CoreResult<()> {
        logistics.validate()?;
        self.logistics = logistics;
        self.recompute(config);
        Ok(())
    }

    /// Replaces the fuel and maintenance selection, validated like
    /// [`QuoteLine::set_logistics`].
    pub fn set_consumables(
        &mut self,
        consumables: ConsumableSelection,
        config: &PricingConfig,
    ) -> CoreResult<()> {
        consumables.validate()?;
        self.consumables = consumables;
        self.recompute(config);
        Ok(())
    }

    fn apply_resolution(&mut self, resolution: TierResolution) {
        self.price_per_day = resolution.price_per_day;
        self.discount_percent = resolution.discount_percent;
        self.tier_source = resolution.source;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElectricalDevice, PublicRentalItem};
    use crate::logistics::{LogisticsKind, LogisticsOption};
    use crate::money::round_money;
    use crate::types::{AddOnKind, AdditionalItem};
    use rust_decimal_macros::dec;

    fn generator() -> ElectricalDevice {
        ElectricalDevice {
            id: "GEN-100".to_string(),
            name: "Generator 100 kVA".to_string(),
            power_kva: Some(dec!(100)),
            quantity: 3,
            available_quantity: 3,
            pricing_tiers: vec![
                PricingTier::bounded(1, 2, Money::from_units(100), dec!(0)),
                PricingTier::bounded(3, 7, Money::from_cents(8571), dec!(14.29)),
                PricingTier::open(30, Money::from_cents(4286), dec!(57.14)),
            ],
            additional_items: vec![
                AdditionalItem {
                    id: "cable".to_string(),
                    kind: AddOnKind::Additional,
                    name: "Generator cable".to_string(),
                    price_per_day: Money::from_units(20),
                    is_optional: true,
                    position: 0,
                },
                AdditionalItem {
                    id: "grounding".to_string(),
                    kind: AddOnKind::Accessory,
                    name: "Grounding kit".to_string(),
                    price_per_day: Money::from_units(5),
                    is_optional: false,
                    position: 1,
                },
            ],
            fuel_consumption_75: Some(dec!(18.5)),
            service_interval: None,
        }
    }

    #[test]
    fn test_base_total() {
        assert_eq!(
            round_money(base_total(Money::from_units(100), dec!(14.29), 2, 5)),
            dec!(857.10)
        );
    }

    #[test]
    fn test_from_item_resolves_one_day() {
        let config = PricingConfig::default();
        let line = QuoteLine::from_item(&generator(), &config).unwrap();

        assert_eq!(line.quantity, 1);
        assert_eq!(line.rental_period_days, 1);
        assert_eq!(line.price_per_day, Money::from_units(100));
        assert_eq!(line.tier_source, TierSource::Matched { index: 0 });
        // required grounding kit preselected: 100 + 5
        assert_eq!(line.add_ons.len(), 1);
        assert_eq!(line.total_price(), Money::from_units(105));
        // fuel copied from the device but not charged
        assert!(line.consumables.fuel.as_ref().is_some_and(|f| !f.include));
        assert_eq!(line.breakdown.fuel_cost, Money::zero());
    }

    #[test]
    fn test_from_item_without_stock_fails() {
        let mut device = generator();
        device.available_quantity = 0;

        let err = QuoteLine::from_item(&device, &PricingConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientAvailability { available: 0, .. }));
    }

    #[test]
    fn test_set_rental_days_re_resolves_tier() {
        let config = PricingConfig::default();
        let item = generator();
        let mut line = QuoteLine::from_item(&item, &config).unwrap();
        line.deselect_add_on("grounding", &config);

        line.set_quantity(2, &config).unwrap();
        line.set_rental_days(5, &config).unwrap();

        assert_eq!(line.price_per_day, Money::from_cents(8571));
        assert_eq!(line.discount_percent, dec!(14.29));
        // 85.71 × 0.8571 × 10
        assert_eq!(line.breakdown.base_total, Money::from_cents(73462));
    }

    #[test]
    fn test_override_survives_day_changes() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();
        line.deselect_add_on("grounding", &config);

        line.override_price(Money::from_units(100), dec!(14.29), &config).unwrap();
        line.set_quantity(2, &config).unwrap();
        line.set_rental_days(5, &config).unwrap();

        assert_eq!(line.tier_source, TierSource::Manual);
        assert_eq!(line.total_price(), Money::from_cents(85710));

        line.clear_price_override(&config);
        assert!(!line.price_overridden);
        assert_eq!(line.price_per_day, Money::from_cents(8571));
    }

    #[test]
    fn test_override_rejects_invalid_values() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();

        assert!(line.override_price(Money::from_cents(-1), dec!(0), &config).is_err());
        assert!(line.override_price(Money::from_units(10), dec!(101), &config).is_err());
        assert!(!line.price_overridden);
    }

    #[test]
    fn test_quantity_limited_by_availability() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();

        let err = line.set_quantity(4, &config).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientAvailability { requested: 4, .. }));
        assert!(line.set_quantity(0, &config).is_err());
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_select_and_deselect_add_on() {
        let config = PricingConfig::default();
        let item = generator();
        let mut line = QuoteLine::from_item(&item, &config).unwrap();
        line.deselect_add_on("grounding", &config);
        line.set_quantity(2, &config).unwrap();
        line.set_rental_days(5, &config).unwrap();
        line.override_price(Money::from_units(100), dec!(14.29), &config).unwrap();

        line.select_add_on(&item, "cable", 1, &config).unwrap();
        assert_eq!(line.breakdown.additional_cost, Money::from_units(100));
        assert_eq!(line.total_price(), Money::from_cents(95710));

        line.select_add_on(&item, "cable", 2, &config).unwrap();
        assert_eq!(line.add_ons.len(), 1);
        assert_eq!(line.breakdown.additional_cost, Money::from_units(200));

        assert!(line.deselect_add_on("cable", &config));
        assert!(!line.deselect_add_on("cable", &config));
        assert_eq!(line.total_price(), Money::from_cents(85710));

        assert!(matches!(
            line.select_add_on(&item, "missing", 1, &config),
            Err(CoreError::UnknownAddOn { .. })
        ));
    }

    #[test]
    fn test_logistics_toggle_resets_cost() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();
        line.deselect_add_on("grounding", &config);

        let mut logistics = LogisticsSelection {
            installation: LogisticsOption {
                technician_count: Some(2),
                ..LogisticsOption::included(dec!(20))
            },
            ..Default::default()
        };
        line.set_logistics(logistics.clone(), &config).unwrap();
        assert_eq!(line.breakdown.installation_cost, Money::from_units(323));
        assert_eq!(line.total_price(), Money::from_units(423));

        logistics.set_included(LogisticsKind::Installation, false);
        line.set_logistics(logistics, &config).unwrap();
        assert_eq!(line.breakdown.installation_cost, Money::zero());
        assert_eq!(line.total_price(), Money::from_units(100));
    }

    #[test]
    fn test_public_items_ignore_logistics() {
        let config = PricingConfig::default();
        let tent = PublicRentalItem {
            id: "TENT".to_string(),
            title: "Tent".to_string(),
            quantity: 1,
            available_quantity: 1,
            pricing_tiers: vec![PricingTier::open(1, Money::from_units(60), dec!(0))],
            accessories: Vec::new(),
        };
        let mut line = QuoteLine::from_item(&tent, &config).unwrap();

        line.set_logistics(
            LogisticsSelection {
                travel: LogisticsOption::included(dec!(50)),
                ..Default::default()
            },
            &config,
        )
        .unwrap();
        assert_eq!(line.breakdown.travel_cost, Money::zero());
        assert_eq!(line.total_price(), Money::from_units(60));
    }

    #[test]
    fn test_rounding_modes_differ_on_fractional_parts() {
        let add_ons = [SelectedAddOn {
            id: "a".to_string(),
            kind: AddOnKind::Accessory,
            name: "Adapter".to_string(),
            price_per_day: Money::from_cents(1),
            quantity: 1,
        }];
        let logistics = LogisticsSelection {
            travel: LogisticsOption {
                travel_rate_per_km: Some(dec!(0.005)),
                technician_count: Some(0),
                ..LogisticsOption::included(dec!(1))
            },
            ..Default::default()
        };
        let consumables = ConsumableSelection::default();
        let inputs = LineInputs {
            price_per_day: Money::from_cents(1),
            discount_percent: dec!(50),
            quantity: 1,
            days: 1,
            add_ons: &add_ons,
            logistics: &logistics,
            logistics_offer: LogisticsOffer::ALL,
            consumables: &consumables,
        };

        // parts: base 0.005, accessory 0.01, travel 0.005
        let per_field = compose_line(&inputs, &PricingConfig::default());
        assert_eq!(per_field.total_price, Money::from_cents(3));

        let once = PricingConfig {
            rounding: RoundingMode::RoundOnce,
            ..PricingConfig::default()
        };
        let round_once = compose_line(&inputs, &once);
        assert_eq!(round_once.total_price, Money::from_cents(2));
        // parts are still reported rounded
        assert_eq!(round_once.base_total, Money::from_cents(1));
    }

    #[test]
    fn test_compose_line_is_idempotent() {
        let config = PricingConfig::default();
        let line = QuoteLine::from_item(&generator(), &config).unwrap();

        assert_eq!(compose_line(&line.inputs(), &config), compose_line(&line.inputs(), &config));
        assert_eq!(compose_line(&line.inputs(), &config), line.breakdown);
    }

    #[test]
    fn test_negative_logistics_is_rejected_and_line_unchanged() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();
        line.deselect_add_on("grounding", &config);
        let before = line.clone();

        let negative = LogisticsSelection {
            installation: LogisticsOption {
                technician_count: Some(0),
                ..LogisticsOption::included(dec!(-1000))
            },
            ..Default::default()
        };
        let err = line.set_logistics(negative, &config).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(line, before);
        assert_eq!(line.total_price(), Money::from_units(100));
    }

    #[test]
    fn test_negative_fuel_price_is_rejected() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();
        let mut consumables = line.consumables.clone();
        if let Some(fuel) = consumables.fuel.as_mut() {
            fuel.include = true;
            fuel.fuel_price_per_liter = dec!(-6.50);
        }

        assert!(line.set_consumables(consumables, &config).is_err());
        assert_eq!(line.breakdown.fuel_cost, Money::zero());
        assert!(!line.total_price().is_negative());
    }

    #[test]
    fn test_negative_catalog_price_is_rejected() {
        let config = PricingConfig::default();
        let mut item = generator();
        item.pricing_tiers[0].price_per_day = Money::from_units(-100);

        assert!(matches!(
            QuoteLine::from_item(&item, &config),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_add_on_quantity_is_bounded() {
        let config = PricingConfig::default();
        let item = generator();
        let mut line = QuoteLine::from_item(&item, &config).unwrap();

        assert!(line.select_add_on(&item, "cable", 10_001, &config).is_err());
        assert!(line.add_ons.iter().all(|a| a.id != "cable"));
        line.select_add_on(&item, "cable", 10_000, &config).unwrap();
    }

    #[test]
    fn test_rental_days_limit() {
        let config = PricingConfig::default();
        let mut line = QuoteLine::from_item(&generator(), &config).unwrap();

        line.set_rental_days(3650, &config).unwrap();
        assert_eq!(line.rental_period_days, 3650);
        assert!(line.total_price() > Money::zero());

        assert!(line.set_rental_days(3651, &config).is_err());
        assert_eq!(line.rental_period_days, 3650);
    }
}
