//! End-to-end pricing scenarios and engine-wide properties.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use rental_core::config::{FallbackPricing, PricingConfig, RoundingMode};
use rental_core::consumables::{
    ConsumableSelection, FuelOption, FuelUsage, IntervalUnit, MaintenanceOption, ServiceInterval,
};
use rental_core::domain::TechnicalSpecs;
use rental_core::line::{compose_line, LineInputs};
use rental_core::logistics::{LogisticsOffer, LogisticsOption, LogisticsSelection};
use rental_core::money::{round_money, Money};
use rental_core::tiers::{discount_warnings, resolve_tier, validate_tiers, TierSource};
use rental_core::{
    compose_totals, AddOnKind, AdditionalItem, ClientSnapshot, ElectricalDevice, Equipment,
    PricingTier, Quote, QuoteOrigin, RentalItem, SelectedAddOn, VatRate,
};

// =============================================================================
// Fixtures
// =============================================================================

fn scenario_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier::bounded(1, 2, Money::from_units(100), dec!(0)),
        PricingTier::bounded(3, 7, Money::from_cents(8571), dec!(14.29)),
        PricingTier::open(30, Money::from_cents(4286), dec!(57.14)),
    ]
}

fn contiguous_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier::bounded(1, 2, Money::from_units(100), dec!(0)),
        PricingTier::bounded(3, 7, Money::from_cents(8571), dec!(14.29)),
        PricingTier::bounded(8, 29, Money::from_cents(6429), dec!(35.71)),
        PricingTier::open(30, Money::from_cents(4286), dec!(57.14)),
    ]
}

fn generator() -> ElectricalDevice {
    ElectricalDevice {
        id: "GEN-100".to_string(),
        name: "Generator 100 kVA".to_string(),
        power_kva: Some(dec!(100)),
        quantity: 4,
        available_quantity: 3,
        pricing_tiers: scenario_tiers(),
        additional_items: vec![AdditionalItem {
            id: "cable".to_string(),
            kind: AddOnKind::Additional,
            name: "Generator cable".to_string(),
            price_per_day: Money::from_units(20),
            is_optional: true,
            position: 0,
        }],
        fuel_consumption_75: None,
        service_interval: None,
    }
}

fn switchboard() -> ElectricalDevice {
    ElectricalDevice {
        id: "RB-63".to_string(),
        name: "Distribution board 63A".to_string(),
        power_kva: None,
        quantity: 1,
        available_quantity: 1,
        pricing_tiers: vec![PricingTier::open(1, Money::zero(), dec!(0))],
        additional_items: Vec::new(),
        fuel_consumption_75: None,
        service_interval: None,
    }
}

fn installation(distance: Decimal, technicians: u32) -> LogisticsSelection {
    LogisticsSelection {
        installation: LogisticsOption {
            include: true,
            distance_km: distance,
            travel_rate_per_km: Some(dec!(1.15)),
            technician_count: Some(technicians),
            service_rate_per_technician: Some(dec!(150)),
            number_of_trips: None,
        },
        ..Default::default()
    }
}

fn delivery_van() -> Equipment {
    Equipment {
        id: "VAN-35".to_string(),
        name: "Delivery van 3.5t".to_string(),
        category: Some("transport".to_string()),
        quantity: 1,
        available_quantity: 1,
        pricing_tiers: vec![PricingTier::open(1, Money::from_units(50), dec!(0))],
        additional_items: Vec::new(),
        technical_specs: TechnicalSpecs {
            fuel_consumption_per_100km: Some(dec!(12)),
            service_interval: Some(ServiceInterval {
                unit: IntervalUnit::Kilometers,
                every: dec!(10000),
            }),
            ..Default::default()
        },
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_resolve_five_days() {
    let rate = resolve_tier(&scenario_tiers(), 5, &FallbackPricing::default());

    assert_eq!(rate.price_per_day.to_string(), "85.71");
    assert_eq!(rate.discount_percent, dec!(14.29));
    assert_eq!(rate.source, TierSource::Matched { index: 1 });
}

#[test]
fn scenario_quote_with_add_on_and_installation() {
    let config = PricingConfig::default();
    let device = generator();
    let board = switchboard();
    let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), VatRate::default());

    // base 100 × (1 − 0.1429) × 2 × 5 = 857.10
    let gen_line = quote.add_item(&device, &config).unwrap();
    quote
        .update_line(gen_line, |line| {
            line.set_quantity(2, &config)?;
            line.set_rental_days(5, &config)?;
            line.override_price(Money::from_units(100), dec!(14.29), &config)
        })
        .unwrap();
    assert_eq!(quote.line(gen_line).unwrap().breakdown.base_total.to_string(), "857.10");

    // cable 20 × 1 × 5 = 100.00
    quote
        .update_line(gen_line, |line| line.select_add_on(&device, "cable", 1, &config))
        .unwrap();
    let line = quote.line(gen_line).unwrap();
    assert_eq!(line.breakdown.additional_cost.to_string(), "100.00");
    assert_eq!(line.total_price().to_string(), "957.10");

    // installation 20 × 1.15 + 2 × 150 = 323.00
    let board_line = quote.add_item(&board, &config).unwrap();
    quote
        .update_line(board_line, |line| {
            line.set_logistics(installation(dec!(20), 2), &config)
        })
        .unwrap();
    let line = quote.line(board_line).unwrap();
    assert_eq!(line.breakdown.installation_cost.to_string(), "323.00");
    assert_eq!(line.total_price().to_string(), "323.00");

    assert_eq!(quote.total_net.to_string(), "1280.10");
    assert_eq!(quote.total_gross.to_string(), "1574.52");
}

#[test]
fn scenario_totals_from_line_values() {
    let totals = compose_totals(
        [Money::from_cents(95710), Money::from_cents(32300)],
        VatRate::from_percent(23),
    );

    assert_eq!(totals.total_net, Money::from_cents(128010));
    assert_eq!(totals.total_gross, Money::from_cents(157452));
}

#[test]
fn scenario_serialized_quote_uses_decimal_strings() {
    let config = PricingConfig::default();
    let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), VatRate::default());
    quote.add_item(&generator(), &config).unwrap();

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["total_net"], "100.00");
    assert_eq!(json["total_gross"], "123.00");
    assert_eq!(json["lines"][0]["breakdown"]["base_total"], "100.00");

    let restored: Quote = serde_json::from_value(json).unwrap();
    assert_eq!(restored, quote);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn property_every_day_count_matches_exactly_one_tier() {
    let tiers = contiguous_tiers();
    assert!(validate_tiers(&tiers).is_ok());

    for days in 1..=400 {
        let covering: Vec<usize> = (0..tiers.len()).filter(|&i| tiers[i].covers(days)).collect();
        assert_eq!(covering.len(), 1, "days = {}", days);

        let rate = resolve_tier(&tiers, days, &FallbackPricing::default());
        assert_eq!(rate.source, TierSource::Matched { index: covering[0] });
    }
}

#[test]
fn property_discounts_do_not_shrink_with_longer_rentals() {
    assert!(discount_warnings(&contiguous_tiers()).is_empty());
}

#[test]
fn property_compose_line_is_idempotent() {
    let config = PricingConfig::default();
    let logistics = installation(dec!(37.5), 3);
    let consumables = ConsumableSelection::default();
    let add_ons = [SelectedAddOn {
        id: "cable".to_string(),
        kind: AddOnKind::Additional,
        name: "Generator cable".to_string(),
        price_per_day: Money::from_cents(1999),
        quantity: 2,
    }];
    let inputs = LineInputs {
        price_per_day: Money::from_cents(8571),
        discount_percent: dec!(14.29),
        quantity: 3,
        days: 11,
        add_ons: &add_ons,
        logistics: &logistics,
        logistics_offer: LogisticsOffer::ALL,
        consumables: &consumables,
    };

    assert_eq!(compose_line(&inputs, &config), compose_line(&inputs, &config));
}

#[test]
fn property_bare_line_equals_discounted_base() {
    let config = PricingConfig::default();
    let logistics = LogisticsSelection::default();
    let consumables = ConsumableSelection::default();

    for (cents, discount, quantity, days) in [
        (8571, dec!(14.29), 2, 5),
        (4286, dec!(57.14), 1, 45),
        (12345, dec!(3.33), 7, 13),
        (1, dec!(50), 1, 1),
    ] {
        let inputs = LineInputs {
            price_per_day: Money::from_cents(cents),
            discount_percent: discount,
            quantity,
            days,
            add_ons: &[],
            logistics: &logistics,
            logistics_offer: LogisticsOffer::ALL,
            consumables: &consumables,
        };
        let expected = round_money(
            Money::from_cents(cents).to_decimal()
                * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
                * Decimal::from(quantity)
                * Decimal::from(days),
        );

        assert_eq!(compose_line(&inputs, &config).total_price.to_decimal(), expected);
    }
}

#[test]
fn property_vat_round_trip_within_one_cent() {
    for vat in [VatRate::from_percent(23), VatRate::from_percent(8), VatRate::from_bps(550)] {
        for cents in (0..200_000).step_by(997) {
            let totals = compose_totals([Money::from_cents(cents)], vat);
            let back = round_money(totals.total_gross.to_decimal() / vat.gross_multiplier());
            let diff = (back - totals.total_net.to_decimal()).abs();
            assert!(diff <= dec!(0.01), "net {} vat {}", cents, vat.bps());
        }
    }
}

#[test]
fn property_rounding_modes_stay_within_half_cent_per_part() {
    let per_field = PricingConfig::default();
    let round_once = PricingConfig {
        rounding: RoundingMode::RoundOnce,
        ..PricingConfig::default()
    };
    let logistics = installation(dec!(13.3), 1);
    let consumables = ConsumableSelection::default();
    let add_ons = [SelectedAddOn {
        id: "adapter".to_string(),
        kind: AddOnKind::Accessory,
        name: "Adapter".to_string(),
        price_per_day: Money::from_cents(333),
        quantity: 1,
    }];

    for days in 1..=60 {
        let inputs = LineInputs {
            price_per_day: Money::from_cents(8571),
            discount_percent: dec!(14.29),
            quantity: 1,
            days,
            add_ons: &add_ons,
            logistics: &logistics,
            logistics_offer: LogisticsOffer::ALL,
            consumables: &consumables,
        };
        let a = compose_line(&inputs, &per_field).total_price;
        let b = compose_line(&inputs, &round_once).total_price;

        // eight parts, each off by at most half a cent
        assert!((a.cents() - b.cents()).abs() <= 4, "days = {}", days);
    }
}

#[test]
fn property_catalog_price_change_does_not_touch_saved_line() {
    let config = PricingConfig::default();
    let mut device = generator();
    let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), VatRate::default());
    let id = quote.add_item(&device, &config).unwrap();
    quote
        .update_line(id, |line| line.select_add_on(&device, "cable", 1, &config))
        .unwrap();

    device.additional_items[0].price_per_day = Money::from_units(99);
    device.pricing_tiers[0].price_per_day = Money::from_units(999);
    quote
        .update_line(id, |line| line.set_rental_days(2, &config))
        .unwrap();

    let line = quote.line(id).unwrap();
    assert_eq!(device.display_name(), "Generator 100 kVA");
    assert_eq!(line.price_per_day, Money::from_units(100));
    assert_eq!(line.breakdown.additional_cost, Money::from_units(40));
}

#[test]
fn scenario_van_maintenance_projected_from_daily_kilometers() {
    let config = PricingConfig::default();
    let van = delivery_van();
    let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), VatRate::default());
    let id = quote.add_item(&van, &config).unwrap();

    let consumables = ConsumableSelection {
        fuel: Some(FuelOption {
            include: false,
            usage: FuelUsage::Kilometers {
                consumption_per_100km: dec!(12),
                kilometers_per_day: dec!(150),
            },
            fuel_price_per_liter: dec!(6.50),
        }),
        maintenance: Some(MaintenanceOption {
            include: true,
            oil_cost: Money::from_units(120),
            service_work_hours: dec!(2),
            service_work_rate_per_hour: dec!(90),
            ..MaintenanceOption::new(ServiceInterval {
                unit: IntervalUnit::Kilometers,
                every: dec!(10000),
            })
        }),
    };

    // 60 days × 150 km = 9000 km, no service due
    quote
        .update_line(id, |line| {
            line.set_rental_days(60, &config)?;
            line.set_consumables(consumables.clone(), &config)
        })
        .unwrap();
    let line = quote.line(id).unwrap();
    assert_eq!(line.breakdown.maintenance_cost, Money::zero());
    assert_eq!(line.total_price().to_string(), "3000.00");

    // 70 days × 150 km = 10500 km, oil 120 + 2 h × 90
    quote
        .update_line(id, |line| line.set_rental_days(70, &config))
        .unwrap();
    let line = quote.line(id).unwrap();
    assert_eq!(line.breakdown.maintenance_cost.to_string(), "300.00");
    assert_eq!(line.breakdown.fuel_cost, Money::zero());
    assert_eq!(line.total_price().to_string(), "3800.00");
}

#[test]
fn property_no_line_goes_negative() {
    let config = PricingConfig::default();
    let device = generator();
    let van = delivery_van();
    let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), VatRate::default());
    let gen_line = quote.add_item(&device, &config).unwrap();
    let van_line = quote.add_item(&van, &config).unwrap();

    let negative_installation = LogisticsSelection {
        installation: LogisticsOption {
            technician_count: Some(0),
            ..LogisticsOption::included(dec!(-1000))
        },
        ..Default::default()
    };
    assert!(quote
        .update_line(gen_line, |line| line.set_logistics(negative_installation, &config))
        .is_err());

    let negative_fuel = ConsumableSelection {
        fuel: Some(FuelOption {
            include: true,
            usage: FuelUsage::Kilometers {
                consumption_per_100km: dec!(12),
                kilometers_per_day: dec!(150),
            },
            fuel_price_per_liter: dec!(-6.50),
        }),
        maintenance: None,
    };
    assert!(quote
        .update_line(van_line, |line| line.set_consumables(negative_fuel, &config))
        .is_err());

    assert!(quote
        .update_line(gen_line, |line| {
            line.override_price(Money::from_units(-100), dec!(0), &config)
        })
        .is_err());

    for line in &quote.lines {
        let b = &line.breakdown;
        for part in [
            b.base_total,
            b.additional_cost,
            b.accessories_cost,
            b.installation_cost,
            b.disassembly_cost,
            b.travel_cost,
            b.fuel_cost,
            b.maintenance_cost,
            b.total_price,
        ] {
            assert!(!part.is_negative(), "line {} has a negative part", line.item_id);
        }
    }
    assert_eq!(quote.total_net.to_string(), "150.00");
    assert!(!quote.total_gross.is_negative());
}
