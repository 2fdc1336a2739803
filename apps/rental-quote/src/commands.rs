//! # CLI Commands
//!
//! One function per subcommand. Each returns the text to print on stdout so
//! the commands stay testable without capturing the process output.
//!
//! ```text
//! ┌───────────────┬──────────────────────────────┬────────────────────────┐
//! │ Command       │ Inputs                       │ Output                 │
//! ├───────────────┼──────────────────────────────┼────────────────────────┤
//! │ price         │ catalog.json + draft.json    │ priced quote (JSON)    │
//! │ resolve       │ catalog.json + item + days   │ tier resolution (JSON) │
//! │ check-catalog │ catalog.json                 │ report (JSON)          │
//! │ config        │ -                            │ effective config (TOML)│
//! └───────────────┴──────────────────────────────┴────────────────────────┘
//! ```

use std::path::Path;

use rental_core::validation::coerce_count_str;
use rental_core::{resolve_tier, PricingConfig};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::draft::QuoteDraft;
use crate::error::{CliError, CliResult};

/// Prices a draft against a catalog.
pub fn price(catalog_path: &Path, draft_path: &Path, config: &PricingConfig) -> CliResult<String> {
    let catalog = Catalog::from_path(catalog_path)?;
    let draft = QuoteDraft::from_path(draft_path)?;

    let quote = draft.build(&catalog, config)?;
    Ok(serde_json::to_string_pretty(&quote)?)
}

/// Resolves the day rate of one catalog item for a rental length.
///
/// `days` is taken as typed; anything that is not a positive count
/// resolves for a one-day rental.
pub fn resolve(
    catalog_path: &Path,
    item_id: &str,
    days: &str,
    config: &PricingConfig,
) -> CliResult<String> {
    let catalog = Catalog::from_path(catalog_path)?;
    let item = catalog.require(item_id)?;

    let days = coerce_count_str(days);
    let resolution = resolve_tier(item.pricing_tiers(), days, &config.fallback);
    info!(item = %item_id, days, source = ?resolution.source, "Day rate resolved");

    Ok(serde_json::to_string_pretty(&resolution)?)
}

/// Validates every catalog record.
///
/// The report is returned alongside the outcome so the caller can print it
/// even when the catalog is invalid.
pub fn check_catalog(catalog_path: &Path) -> (String, CliResult<()>) {
    let catalog = match Catalog::from_path(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => return (String::new(), Err(e)),
    };

    let report = catalog.check();
    for issue in &report.warnings {
        warn!(item = %issue.item_id, "{}", issue.message);
    }

    let rendered = match serde_json::to_string_pretty(&report) {
        Ok(rendered) => rendered,
        Err(e) => return (String::new(), Err(e.into())),
    };

    if report.is_valid() {
        (rendered, Ok(()))
    } else {
        (rendered, Err(CliError::InvalidCatalog(report.errors.len())))
    }
}

/// Renders the effective configuration.
pub fn show_config(config: &PricingConfig) -> CliResult<String> {
    Ok(toml::to_string_pretty(config)?)
}
