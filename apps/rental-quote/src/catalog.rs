//! # Catalog File
//!
//! Read-only catalog records, one list per equipment domain.
//!
//! ```json
//! {
//!   "equipment":     [ { "id": "EXC-3T", "name": "...", ... } ],
//!   "electrical":    [ { "id": "GEN-100", "name": "...", "power_kva": "100", ... } ],
//!   "public_rental": [ { "id": "TENT-6", "title": "...", ... } ]
//! }
//! ```

use std::path::Path;

use rental_core::domain::validate_catalog_item;
use rental_core::tiers::{discount_warnings, DiscountWarning};
use rental_core::{ElectricalDevice, Equipment, EquipmentDomain, PublicRentalItem, RentalItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub electrical: Vec<ElectricalDevice>,
    #[serde(default)]
    pub public_rental: Vec<PublicRentalItem>,
}

impl Catalog {
    /// Reads a catalog JSON file.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog: Catalog = serde_json::from_str(&contents).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        info!(?path, items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// All records, general equipment first.
    pub fn items(&self) -> impl Iterator<Item = &dyn RentalItem> + '_ {
        let equipment = self.equipment.iter().map(|i| i as &dyn RentalItem);
        let electrical = self.electrical.iter().map(|i| i as &dyn RentalItem);
        let public = self.public_rental.iter().map(|i| i as &dyn RentalItem);
        equipment.chain(electrical).chain(public)
    }

    pub fn len(&self) -> usize {
        self.equipment.len() + self.electrical.len() + self.public_rental.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a record by id across all domains.
    pub fn find(&self, item_id: &str) -> Option<&dyn RentalItem> {
        self.items().find(|item| item.item_id() == item_id)
    }

    /// Like [`Catalog::find`] but an unknown id is an error.
    pub fn require(&self, item_id: &str) -> CliResult<&dyn RentalItem> {
        self.find(item_id)
            .ok_or_else(|| CliError::UnknownItem(item_id.to_string()))
    }

    /// Runs authoring checks on every record.
    pub fn check(&self) -> CatalogReport {
        let mut report = CatalogReport::default();

        for item in self.items() {
            let id = item.item_id().to_string();
            debug!(item = %id, domain = %item.domain(), "Checking catalog item");

            if let Err(e) = validate_catalog_item(item) {
                report.errors.push(ItemIssue {
                    item_id: id.clone(),
                    domain: item.domain(),
                    message: e.to_string(),
                });
            }

            report.warnings.extend(
                discount_warnings(item.pricing_tiers())
                    .iter()
                    .map(|w: &DiscountWarning| ItemIssue {
                        item_id: id.clone(),
                        domain: item.domain(),
                        message: w.to_string(),
                    }),
            );
            report.checked += 1;
        }

        report
    }
}

/// One finding of [`Catalog::check`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemIssue {
    pub item_id: String,
    pub domain: EquipmentDomain,
    pub message: String,
}

/// Result of checking a whole catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    pub checked: usize,
    /// Invalid records; pricing them relies on fallbacks.
    pub errors: Vec<ItemIssue>,
    /// Data-quality findings that never block pricing.
    pub warnings: Vec<ItemIssue>,
}

impl CatalogReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
