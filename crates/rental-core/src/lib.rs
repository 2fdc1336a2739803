//! # rental-core: Pure Pricing Engine for Rental Quotes
//!
//! Turns (catalog item, rental length, quantity, add-ons, logistics and
//! consumable options) into deterministic, auditable net and gross totals.
//! Every function here is a pure computation over its arguments.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rental Quote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      Callers: admin quote forms, guest catalog, rental-quote    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   domain ──► tiers ──► line ◄── addons                          │   │
//! │  │                         ▲  ◄── logistics                        │   │
//! │  │                         └───── consumables                      │   │
//! │  │                         │                                       │   │
//! │  │                         ▼                                       │   │
//! │  │                 quote ──► totals ──► money (VAT)                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Shared value types (tiers, add-ons, VAT, status)
//! - [`money`] - Money in cents with 2-decimal wire format
//! - [`domain`] - `RentalItem` adapter over the three catalog record shapes
//! - [`tiers`] - Tiered pricing resolver and tier authoring checks
//! - [`addons`] - Add-on cost aggregation
//! - [`logistics`] - Installation, disassembly and travel charges
//! - [`consumables`] - Fuel and maintenance charges
//! - [`line`] - Quote line composer
//! - [`totals`] - Quote totals composer
//! - [`quote`] - Quote aggregate and status lifecycle
//! - [`config`] - Shared pricing defaults and rounding policy
//! - [`validation`] - Input coercion and business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use rental_core::{
//!     ClientSnapshot, PricingConfig, PricingTier, PublicRentalItem, Quote, QuoteOrigin,
//! };
//! use rental_core::money::Money;
//!
//! let config = PricingConfig::default();
//! let tent = PublicRentalItem {
//!     id: "TENT-6".into(),
//!     title: "Party tent 6x3".into(),
//!     quantity: 2,
//!     available_quantity: 2,
//!     pricing_tiers: vec![
//!         PricingTier::bounded(1, 2, Money::from_units(100), dec!(0)),
//!         PricingTier::open(3, Money::from_cents(8571), dec!(14.29)),
//!     ],
//!     accessories: vec![],
//! };
//!
//! let mut quote = Quote::new(QuoteOrigin::Staff, ClientSnapshot::default(), config.vat_rate());
//! let line = quote.add_item(&tent, &config).unwrap();
//! quote.update_line(line, |l| l.set_rental_days(2, &config)).unwrap();
//!
//! assert_eq!(quote.total_net.to_string(), "200.00");
//! assert_eq!(quote.total_gross.to_string(), "246.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod addons;
pub mod config;
pub mod consumables;
pub mod domain;
pub mod error;
pub mod line;
pub mod logistics;
pub mod money;
pub mod quote;
pub mod tiers;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{PricingConfig, RoundingMode};
pub use domain::{ElectricalDevice, Equipment, PublicRentalItem, RentalItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{LineBreakdown, QuoteLine};
pub use money::Money;
pub use quote::Quote;
pub use tiers::{resolve_tier, TierResolution, TierSource};
pub use totals::{compose_totals, QuoteTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest rental period a line accepts, in days (ten years).
pub const MAX_RENTAL_DAYS: u32 = 3650;

/// Maximum lines in a single quote
pub const MAX_QUOTE_LINES: usize = 100;

/// Largest price, rate, distance or consumption figure a line accepts.
pub const MAX_LINE_FIGURE: i64 = 1_000_000;

/// Largest unit count (line quantity, add-on quantity, technicians, trips).
pub const MAX_UNIT_COUNT: u32 = 10_000;
