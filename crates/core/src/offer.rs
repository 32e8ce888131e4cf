//! Selected offers and alert deduplication keys.

use crate::{Fiat, FixedPoint};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The single best advertisement selected for one currency in one fetch
/// cycle. Immutable once produced; replaced wholesale on the next cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Currency the offer is priced in.
    pub fiat: Fiat,
    /// Unit price (fiat per asset unit).
    pub price: FixedPoint,
    /// Requested transaction size, in asset units.
    pub amount: FixedPoint,
    /// `price × amount` in the native currency.
    pub total: FixedPoint,
    /// Total converted into the reference unit. None when the FX rate was
    /// unavailable; such offers rank last but are never dropped.
    pub reference_total: Option<FixedPoint>,
    /// Merchant display name.
    pub merchant: CompactString,
    /// Merchant completion percentage.
    pub completion_pct: f64,
    /// Merchant orders completed this month.
    pub monthly_orders: u32,
    /// Accepted payment methods, filtered to the configured policy.
    pub payment_methods: Vec<CompactString>,
    /// Merchant's minimum transaction size.
    pub min_single_amount: FixedPoint,
    /// Merchant's maximum transaction size.
    pub max_single_amount: FixedPoint,
    /// Merchant's remaining supply.
    pub available: FixedPoint,
}

impl Offer {
    /// Price precision used for alert deduplication.
    pub const ALERT_PRICE_DECIMALS: u32 = 4;

    /// Deduplication identity for threshold alerts.
    pub fn alert_key(&self) -> AlertKey {
        AlertKey {
            fiat: self.fiat,
            price: self.price.round_dp(Self::ALERT_PRICE_DECIMALS),
        }
    }
}

/// Identity of an alert condition: currency plus the unit price rounded to a
/// fixed precision. Each key fires at most once per alert epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertKey {
    pub fiat: Fiat,
    pub price: FixedPoint,
}
