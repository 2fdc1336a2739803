//! # Quote Draft
//!
//! The form state of a quote as a JSON file, and how it becomes a priced
//! [`Quote`].
//!
//! ## Draft Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  draft.json                                                             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  quantity / days  ──► coerce_count (non-numeric or <= 0 become 1)       │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  for each line:  catalog.require(item_id)                               │
//! │                  quote.add_item ──► set_quantity ──► set_rental_days    │
//! │                  ──► override_price? ──► select_add_on*                 │
//! │                  ──► set_logistics ──► set_consumables                  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Quote { lines, total_net, total_gross }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use rental_core::consumables::ConsumableSelection;
use rental_core::logistics::LogisticsSelection;
use rental_core::validation::{coerce_count, coerce_count_str};
use rental_core::{ClientSnapshot, Money, PricingConfig, Quote, QuoteOrigin, VatRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{CliError, CliResult};

// =============================================================================
// Draft Shapes
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    #[serde(default)]
    pub origin: QuoteOrigin,
    #[serde(default)]
    pub client: ClientSnapshot,
    /// Overrides the configured VAT for this quote.
    #[serde(default)]
    pub vat_rate_bps: Option<u32>,
    #[serde(default)]
    pub lines: Vec<DraftLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLine {
    pub item_id: String,
    #[serde(default = "one", deserialize_with = "form_count")]
    pub quantity: u32,
    #[serde(default = "one", deserialize_with = "form_count")]
    pub rental_period_days: u32,
    #[serde(default)]
    pub price_override: Option<PriceOverride>,
    #[serde(default)]
    pub add_ons: Vec<DraftAddOn>,
    #[serde(default)]
    pub logistics: LogisticsSelection,
    #[serde(default)]
    pub consumables: Option<ConsumableSelection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOverride {
    pub price_per_day: Money,
    #[serde(default)]
    pub discount_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftAddOn {
    pub id: String,
    #[serde(default = "one", deserialize_with = "form_count")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// Accepts whatever a form sends for a count and coerces it to >= 1.
fn form_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => coerce_count(i),
            None => coerce_count_str(&n.to_string()),
        },
        Value::String(s) => coerce_count_str(&s),
        _ => 1,
    })
}

impl QuoteDraft {
    /// Reads a draft JSON file.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Prices the draft against `catalog`.
    pub fn build(&self, catalog: &Catalog, config: &PricingConfig) -> CliResult<Quote> {
        let vat_rate = self
            .vat_rate_bps
            .map(VatRate::from_bps)
            .unwrap_or_else(|| config.vat_rate());
        let mut quote = Quote::new(self.origin, self.client.clone(), vat_rate);
        quote.set_vat_rate(vat_rate)?;

        for draft in &self.lines {
            let item = catalog.require(&draft.item_id)?;
            debug!(
                item = %draft.item_id,
                quantity = draft.quantity,
                days = draft.rental_period_days,
                "Adding draft line"
            );
            let line_id = quote.add_item(item, config)?;

            quote.update_line(line_id, |line| {
                line.set_quantity(draft.quantity, config)?;
                line.set_rental_days(draft.rental_period_days, config)?;

                if let Some(price) = &draft.price_override {
                    line.override_price(price.price_per_day, price.discount_percent, config)?;
                }

                for add_on in &draft.add_ons {
                    line.select_add_on(item, &add_on.id, add_on.quantity, config)?;
                }

                line.set_logistics(draft.logistics.clone(), config)?;

                // keep the catalog prefill unless the draft says otherwise
                if let Some(consumables) = &draft.consumables {
                    line.set_consumables(consumables.clone(), config)?;
                }
                Ok(())
            })?;
        }

        info!(
            quote_id = %quote.id,
            lines = quote.lines.len(),
            total_net = %quote.total_net,
            total_gross = %quote.total_gross,
            "Quote priced"
        );
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
