//! Add-on cost aggregation.
//!
//! Every selected add-on costs `price_per_day × quantity × days`. Both kinds
//! are summed the same way but kept in separate running totals so a quote
//! line can show additional equipment and accessories apart. Add-ons are
//! never discounted; tier discounts apply to the base day rate only.

use rust_decimal::Decimal;

use crate::types::{AddOnKind, SelectedAddOn};

/// Unrounded add-on costs for one line, split by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOnTotals {
    pub additional: Decimal,
    pub accessories: Decimal,
}

impl AddOnTotals {
    pub fn total(&self) -> Decimal {
        self.additional + self.accessories
    }
}

/// Cost of one selected add-on over the rental period.
pub fn add_on_cost(add_on: &SelectedAddOn, days: u32) -> Decimal {
    add_on.price_per_day.to_decimal()
        * Decimal::from(add_on.effective_quantity())
        * Decimal::from(days)
}

/// Sums selected add-on costs over `days`, per kind.
///
/// ```rust
/// use rental_core::addons::aggregate_add_ons;
/// use rental_core::money::Money;
/// use rental_core::types::{AddOnKind, SelectedAddOn};
/// use rust_decimal_macros::dec;
///
/// let cable = SelectedAddOn {
///     id: "cable".into(),
///     kind: AddOnKind::Additional,
///     name: "Generator cable".into(),
///     price_per_day: Money::from_units(20),
///     quantity: 1,
/// };
/// let totals = aggregate_add_ons(&[cable], 5);
/// assert_eq!(totals.additional, dec!(100));
/// ```
pub fn aggregate_add_ons(selected: &[SelectedAddOn], days: u32) -> AddOnTotals {
    selected
        .iter()
        .fold(AddOnTotals::default(), |mut totals, add_on| {
            let cost = add_on_cost(add_on, days);
            match add_on.kind {
                AddOnKind::Additional => totals.additional += cost,
                AddOnKind::Accessory => totals.accessories += cost,
            }
            totals
        })
}
