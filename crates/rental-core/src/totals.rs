//! Quote totals composer.
//!
//! `total_net` is the sum of the already-rounded line totals and
//! `total_gross = total_net × (1 + vat/100)`, rounded to cents at the
//! point of computation.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::VatRate;

/// Quote-level money figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub total_net: Money,
    pub vat_amount: Money,
    pub total_gross: Money,
    pub vat_rate: VatRate,
}

/// Sums line totals and applies VAT. No lines gives all zeros.
///
/// ```rust
/// use rental_core::money::Money;
/// use rental_core::totals::compose_totals;
/// use rental_core::types::VatRate;
///
/// let totals = compose_totals(
///     [Money::from_cents(95710), Money::from_cents(32300)],
///     VatRate::default(),
/// );
/// assert_eq!(totals.total_net.to_string(), "1280.10");
/// assert_eq!(totals.total_gross.to_string(), "1574.52");
/// ```
pub fn compose_totals<I>(line_totals: I, vat_rate: VatRate) -> QuoteTotals
where
    I: IntoIterator<Item = Money>,
{
    let total_net: Money = line_totals.into_iter().sum();
    let vat_amount = total_net.calculate_vat(vat_rate);

    QuoteTotals {
        total_net,
        vat_amount,
        total_gross: total_net + vat_amount,
        vat_rate,
    }
}
