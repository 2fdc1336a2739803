//! # Quote Aggregate
//!
//! An ordered set of quote lines with a client snapshot, status and totals.
//!
//! ## Status Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────┐  submit   ┌─────────┐  approve  ┌──────────┐               │
//! │   │ Draft │ ────────► │ Pending │ ────────► │ Approved │               │
//! │   └───────┘           └─────────┘           └──────────┘               │
//! │       ▲                    │                                            │
//! │       │ reopen             │ reject                                     │
//! │       │               ┌──────────┐                                      │
//! │       └────────────── │ Rejected │ ◄────┘                               │
//! │                       └──────────┘                                      │
//! │                                                                         │
//! │   Lines and VAT may change in Draft and Pending only.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `total_net = Σ line.total_price`
//! - `total_gross = total_net × (1 + vat_rate/100)`, rounded to cents
//! - Totals are recomputed whenever the line set or a line changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::domain::RentalItem;
use crate::error::{CoreError, CoreResult};
use crate::line::QuoteLine;
use crate::money::Money;
use crate::totals::{compose_totals, QuoteTotals};
use crate::types::{ClientSnapshot, QuoteOrigin, QuoteStatus, VatRate};
use crate::validation::{validate_quote_size, validate_vat_rate_bps};

/// A rental quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub origin: QuoteOrigin,
    pub status: QuoteStatus,
    pub client: ClientSnapshot,
    pub lines: Vec<QuoteLine>,
    pub vat_rate: VatRate,
    pub total_net: Money,
    pub vat_amount: Money,
    pub total_gross: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Creates an empty draft quote.
    pub fn new(origin: QuoteOrigin, client: ClientSnapshot, vat_rate: VatRate) -> Self {
        let now = Utc::now();
        Quote {
            id: Uuid::new_v4(),
            origin,
            status: QuoteStatus::Draft,
            client,
            lines: Vec::new(),
            vat_rate,
            total_net: Money::zero(),
            vat_amount: Money::zero(),
            total_gross: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Lines
    // =========================================================================

    /// Appends a line and returns its id.
    pub fn add_line(&mut self, line: QuoteLine) -> CoreResult<Uuid> {
        self.ensure_editable("add lines")?;
        validate_quote_size(self.lines.len())?;
        if line.price_overridden && !self.origin.allows_price_override() {
            return Err(CoreError::PriceOverrideNotAllowed);
        }

        let id = line.id;
        debug!(quote_id = %self.id, line_id = %id, item = %line.item_id, "Adding quote line");
        self.lines.push(line);
        self.recompute_totals();
        Ok(id)
    }

    /// Creates a line from a catalog item and appends it.
    pub fn add_item<T: RentalItem + ?Sized>(
        &mut self,
        item: &T,
        config: &PricingConfig,
    ) -> CoreResult<Uuid> {
        self.ensure_editable("add lines")?;
        let line = QuoteLine::from_item(item, config)?;
        self.add_line(line)
    }

    pub fn line(&self, line_id: Uuid) -> Option<&QuoteLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Removes a line, returning it.
    pub fn remove_line(&mut self, line_id: Uuid) -> CoreResult<QuoteLine> {
        self.ensure_editable("remove lines")?;

        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        let removed = self.lines.remove(index);
        self.recompute_totals();
        Ok(removed)
    }

    /// Applies `edit` to one line and recomputes the totals.
    ///
    /// The edit runs on a copy: if it fails, or it sets a manual price on
    /// a guest quote, the line is left as it was.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// quote.update_line(line_id, |line| line.set_rental_days(5, &config))?;
    /// ```
    pub fn update_line<F>(&mut self, line_id: Uuid, edit: F) -> CoreResult<()>
    where
        F: FnOnce(&mut QuoteLine) -> CoreResult<()>,
    {
        self.ensure_editable("edit lines")?;

        let allows_override = self.origin.allows_price_override();
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        let mut edited = line.clone();
        edit(&mut edited)?;
        if edited.price_overridden && !line.price_overridden && !allows_override {
            return Err(CoreError::PriceOverrideNotAllowed);
        }

        *line = edited;
        self.recompute_totals();
        Ok(())
    }

    /// Changes the VAT rate applied to the net total.
    pub fn set_vat_rate(&mut self, vat_rate: VatRate) -> CoreResult<()> {
        self.ensure_editable("change VAT")?;
        validate_vat_rate_bps(vat_rate.bps())?;

        self.vat_rate = vat_rate;
        self.recompute_totals();
        Ok(())
    }

    /// Recomputes every line against `config`, then the totals.
    pub fn reprice(&mut self, config: &PricingConfig) -> CoreResult<()> {
        self.ensure_editable("reprice")?;
        for line in &mut self.lines {
            line.recompute(config);
        }
        self.recompute_totals();
        Ok(())
    }

    /// Recomputes net, VAT and gross from the current lines.
    pub fn recompute_totals(&mut self) {
        let totals = self.totals();
        self.total_net = totals.total_net;
        self.vat_amount = totals.vat_amount;
        self.total_gross = totals.total_gross;
        self.updated_at = Utc::now();
    }

    /// Totals computed from the current lines.
    pub fn totals(&self) -> QuoteTotals {
        compose_totals(self.lines.iter().map(QuoteLine::total_price), self.vat_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // =========================================================================
    // Status Transitions
    // =========================================================================

    /// Draft → Pending. An empty quote cannot be submitted.
    pub fn submit(&mut self) -> CoreResult<()> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyQuote(self.id.to_string()));
        }
        self.transition(QuoteStatus::Draft, QuoteStatus::Pending, "submit")
    }

    /// Pending → Approved.
    pub fn approve(&mut self) -> CoreResult<()> {
        self.transition(QuoteStatus::Pending, QuoteStatus::Approved, "approve")
    }

    /// Pending → Rejected.
    pub fn reject(&mut self) -> CoreResult<()> {
        self.transition(QuoteStatus::Pending, QuoteStatus::Rejected, "reject")
    }

    /// Rejected → Draft, for rework.
    pub fn reopen(&mut self) -> CoreResult<()> {
        self.transition(QuoteStatus::Rejected, QuoteStatus::Draft, "reopen")
    }

    fn transition(
        &mut self,
        from: QuoteStatus,
        to: QuoteStatus,
        operation: &str,
    ) -> CoreResult<()> {
        if self.status != from {
            return Err(self.invalid_status(operation));
        }

        info!(quote_id = %self.id, from = %from, to = %to, "Quote status changed");
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn ensure_editable(&self, operation: &str) -> CoreResult<()> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(self.invalid_status(operation))
        }
    }

    fn invalid_status(&self, operation: &str) -> CoreError {
        CoreError::InvalidQuoteStatus {
            quote_id: self.id.to_string(),
            status: self.status,
            operation: operation.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
