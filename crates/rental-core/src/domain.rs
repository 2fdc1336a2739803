//! # Equipment-Domain Adapter
//!
//! The catalog keeps three record shapes with their own field names. The
//! pricing engine sees all of them through [`RentalItem`], so one set of
//! formulas prices every domain.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Equipment          ElectricalDevice        PublicRentalItem           │
//! │   (machinery)        (generators, boards)    (public/guest catalog)     │
//! │       │                     │                       │                   │
//! │       └──────────┬──────────┴───────────┬───────────┘                   │
//! │                  ▼                      ▼                               │
//! │            impl RentalItem ──► QuoteLine::from_item ──► LineBreakdown   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::consumables::{FuelUsage, ServiceInterval};
use crate::logistics::LogisticsOffer;
use crate::tiers::validate_tiers;
use crate::types::{AdditionalItem, EquipmentDomain, PricingTier};
use crate::validation::{validate_item_name, validate_price, ValidationResult};

// =============================================================================
// Adapter Trait
// =============================================================================

/// Capability set the pricing engine needs from a catalog record.
pub trait RentalItem {
    fn item_id(&self) -> &str;

    fn display_name(&self) -> &str;

    fn domain(&self) -> EquipmentDomain;

    fn pricing_tiers(&self) -> &[PricingTier];

    fn add_ons(&self) -> &[AdditionalItem];

    /// Units not currently reserved.
    fn available_quantity(&self) -> u32;

    fn logistics_offer(&self) -> LogisticsOffer;

    /// Fuel consumption used to prefill a line's fuel option.
    fn fuel_profile(&self) -> Option<FuelUsage> {
        None
    }

    fn service_interval(&self) -> Option<ServiceInterval> {
        None
    }

    /// Looks up an offered add-on by id.
    fn find_add_on(&self, id: &str) -> Option<&AdditionalItem> {
        self.add_ons().iter().find(|a| a.id == id)
    }
}

// =============================================================================
// General Equipment
// =============================================================================

/// Technical attributes of engine-driven machinery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpecs {
    /// Liters per hour at 75% engine load.
    #[serde(default)]
    pub fuel_consumption_75: Option<Decimal>,
    #[serde(default)]
    pub fuel_consumption_per_100km: Option<Decimal>,
    /// Liters.
    #[serde(default)]
    pub fuel_tank_capacity: Option<Decimal>,
    #[serde(default)]
    pub service_interval: Option<ServiceInterval>,
}

/// General catalog record: construction and engine-driven machinery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: u32,
    pub available_quantity: u32,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub additional_items: Vec<AdditionalItem>,
    #[serde(default)]
    pub technical_specs: TechnicalSpecs,
}

impl RentalItem for Equipment {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn domain(&self) -> EquipmentDomain {
        EquipmentDomain::General
    }

    fn pricing_tiers(&self) -> &[PricingTier] {
        &self.pricing_tiers
    }

    fn add_ons(&self) -> &[AdditionalItem] {
        &self.additional_items
    }

    fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    fn logistics_offer(&self) -> LogisticsOffer {
        LogisticsOffer::ALL
    }

    /// Motohour consumption wins over per-distance consumption.
    fn fuel_profile(&self) -> Option<FuelUsage> {
        let specs = &self.technical_specs;
        if let Some(per_hour) = specs.fuel_consumption_75 {
            return Some(FuelUsage::Motohours {
                consumption_per_hour: per_hour,
                hours_per_day: None,
            });
        }
        specs
            .fuel_consumption_per_100km
            .map(|per_100km| FuelUsage::Kilometers {
                consumption_per_100km: per_100km,
                kilometers_per_day: Decimal::ZERO,
            })
    }

    fn service_interval(&self) -> Option<ServiceInterval> {
        self.technical_specs.service_interval
    }
}

// =============================================================================
// Electrical Devices
// =============================================================================

/// Electrical catalog record: generators, distribution boards, cabling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalDevice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub power_kva: Option<Decimal>,
    pub quantity: u32,
    pub available_quantity: u32,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub additional_items: Vec<AdditionalItem>,
    /// Liters per hour at 75% load; generators only.
    #[serde(default)]
    pub fuel_consumption_75: Option<Decimal>,
    #[serde(default)]
    pub service_interval: Option<ServiceInterval>,
}

impl RentalItem for ElectricalDevice {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn domain(&self) -> EquipmentDomain {
        EquipmentDomain::Electrical
    }

    fn pricing_tiers(&self) -> &[PricingTier] {
        &self.pricing_tiers
    }

    fn add_ons(&self) -> &[AdditionalItem] {
        &self.additional_items
    }

    fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    fn logistics_offer(&self) -> LogisticsOffer {
        LogisticsOffer::ALL
    }

    fn fuel_profile(&self) -> Option<FuelUsage> {
        self.fuel_consumption_75.map(|per_hour| FuelUsage::Motohours {
            consumption_per_hour: per_hour,
            hours_per_day: None,
        })
    }

    fn service_interval(&self) -> Option<ServiceInterval> {
        self.service_interval
    }
}

// =============================================================================
// Public Rental Catalog
// =============================================================================

/// Public catalog record: simple day-rate items with accessories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRentalItem {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub available_quantity: u32,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub accessories: Vec<AdditionalItem>,
}

impl RentalItem for PublicRentalItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn domain(&self) -> EquipmentDomain {
        EquipmentDomain::PublicRental
    }

    fn pricing_tiers(&self) -> &[PricingTier] {
        &self.pricing_tiers
    }

    fn add_ons(&self) -> &[AdditionalItem] {
        &self.accessories
    }

    fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    fn logistics_offer(&self) -> LogisticsOffer {
        LogisticsOffer::NONE
    }
}

// =============================================================================
// Catalog Validation
// =============================================================================

/// Authoring-time checks for any catalog record.
pub fn validate_catalog_item<T: RentalItem + ?Sized>(item: &T) -> ValidationResult<()> {
    validate_item_name(item.display_name())?;
    validate_tiers(item.pricing_tiers())?;

    for add_on in item.add_ons() {
        validate_item_name(&add_on.name)?;
        validate_price("add_on price_per_day", add_on.price_per_day)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
