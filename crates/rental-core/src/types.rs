//! # Domain Types
//!
//! Core value types shared by every pricing component.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingTier    │   │ AdditionalItem  │   │ SelectedAddOn   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  period_start   │   │  id             │   │  id (snapshot)  │       │
//! │  │  period_end?    │   │  kind           │──►│  name           │       │
//! │  │  price_per_day  │   │  price_per_day  │   │  price_per_day  │       │
//! │  │  discount %     │   │  position       │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    VatRate      │   │  QuoteStatus    │   │ EquipmentDomain │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Draft          │   │  General        │       │
//! │  │  2300 = 23%     │   │  Pending        │   │  Electrical     │       │
//! │  └─────────────────┘   │  Approved       │   │  PublicRental   │       │
//! │                        │  Rejected       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A selected add-on is copied into the quote line together with its price,
//! so a later catalog price change never mutates a saved quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 2300 bps = 23% (the default rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        VatRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a decimal percentage (23.00 for the default).
    pub fn percent(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Returns `1 + rate/100`, the net-to-gross multiplier.
    pub fn gross_multiplier(&self) -> Decimal {
        Decimal::ONE + Decimal::new(self.0 as i64, 4)
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::from_percent(23)
    }
}

// =============================================================================
// Quote Status & Origin
// =============================================================================

/// The lifecycle status of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Quote is being composed.
    #[default]
    Draft,
    /// Submitted, waiting for a decision.
    Pending,
    /// Accepted by staff.
    Approved,
    /// Declined by staff.
    Rejected,
}

impl QuoteStatus {
    /// Returns true if lines may still be added, edited or removed.
    pub fn is_editable(&self) -> bool {
        matches!(self, QuoteStatus::Draft | QuoteStatus::Pending)
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Pending => write!(f, "pending"),
            QuoteStatus::Approved => write!(f, "approved"),
            QuoteStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Who composed the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// Composed by an employee in the admin flows; prices may be overridden.
    #[default]
    Staff,
    /// Composed by a client through the self-service catalog.
    GuestCatalog,
}

impl QuoteOrigin {
    /// Manual day-rate overrides are a staff capability.
    pub fn allows_price_override(&self) -> bool {
        matches!(self, QuoteOrigin::Staff)
    }
}

// =============================================================================
// Client Snapshot
// =============================================================================

/// Client details frozen onto the quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    /// Company tax identifier (NIP) for invoicing.
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

// =============================================================================
// Equipment Domain
// =============================================================================

/// The catalog an item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentDomain {
    /// Construction and engine-driven machinery.
    General,
    /// Generators, distribution boards, cabling.
    Electrical,
    /// Public rental catalog, also browsed by guests.
    PublicRental,
}

impl std::fmt::Display for EquipmentDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentDomain::General => write!(f, "general"),
            EquipmentDomain::Electrical => write!(f, "electrical"),
            EquipmentDomain::PublicRental => write!(f, "public_rental"),
        }
    }
}

// =============================================================================
// Pricing Tier
// =============================================================================

/// A day-count range with its daily price and discount.
///
/// `period_end = None` is the open-ended long-term tier ("30+ days"); only
/// the last tier of an item may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// First day count this tier applies to (>= 1).
    pub period_start: u32,
    /// Last day count this tier applies to; `None` means unbounded.
    #[serde(default)]
    pub period_end: Option<u32>,
    pub price_per_day: Money,
    /// Discount percent (0-100) against the base day rate.
    #[serde(default)]
    pub discount_percent: Decimal,
}

impl PricingTier {
    /// Creates a bounded tier.
    pub fn bounded(start: u32, end: u32, price_per_day: Money, discount_percent: Decimal) -> Self {
        PricingTier {
            period_start: start,
            period_end: Some(end),
            price_per_day,
            discount_percent,
        }
    }

    /// Creates the open-ended tier.
    pub fn open(start: u32, price_per_day: Money, discount_percent: Decimal) -> Self {
        PricingTier {
            period_start: start,
            period_end: None,
            price_per_day,
            discount_percent,
        }
    }

    /// Checks whether a rental of `days` falls inside this tier.
    pub fn covers(&self, days: u32) -> bool {
        days >= self.period_start && self.period_end.map_or(true, |end| days <= end)
    }

    /// Returns true if this is the unbounded long-term tier.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.period_end.is_none()
    }
}

// =============================================================================
// Add-ons
// =============================================================================

/// Kind of add-on; both are billed identically but totalled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    /// Additional equipment rented alongside the main item.
    Additional,
    /// Accessories (cables, adapters, covers).
    Accessory,
}

/// An add-on offered with one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalItem {
    pub id: String,
    pub kind: AddOnKind,
    pub name: String,
    pub price_per_day: Money,
    #[serde(default = "default_true")]
    pub is_optional: bool,
    /// Display order within its kind.
    #[serde(default)]
    pub position: i32,
}

fn default_true() -> bool {
    true
}

impl AdditionalItem {
    /// Freezes this add-on into a quote-line snapshot.
    pub fn snapshot(&self, quantity: u32) -> SelectedAddOn {
        SelectedAddOn {
            id: self.id.clone(),
            kind: self.kind,
            name: self.name.clone(),
            price_per_day: self.price_per_day,
            quantity: quantity.max(1),
        }
    }
}

/// A selected add-on as captured on a quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedAddOn {
    pub id: String,
    pub kind: AddOnKind,
    pub name: String,
    /// Price at the time of selection (frozen).
    pub price_per_day: Money,
    #[serde(default = "default_add_on_quantity")]
    pub quantity: u32,
}

fn default_add_on_quantity() -> u32 {
    1
}

impl SelectedAddOn {
    /// Quantity used for billing; a zero left by a form counts as one.
    #[inline]
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
