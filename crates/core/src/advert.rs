//! Venue advertisement rows.

use crate::{Fiat, FixedPoint};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One advertisement as returned by the venue search, already parsed out of
/// the wire format. Read-only input to selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advertisement {
    /// Fiat currency the advertisement is priced in.
    pub fiat: Fiat,
    /// Unit price (fiat per asset unit).
    pub price: FixedPoint,
    /// Smallest transaction the merchant accepts, in asset units.
    pub min_single_amount: FixedPoint,
    /// Largest transaction the merchant accepts, in asset units.
    pub max_single_amount: FixedPoint,
    /// Remaining supply, in asset units.
    pub available: FixedPoint,
    /// Merchant display name.
    pub merchant: CompactString,
    /// Fraction of the merchant's orders completed this month (0.0..=1.0).
    pub completion_rate: f64,
    /// Orders the merchant completed this month.
    pub monthly_orders: u32,
    /// Payment method labels the merchant accepts.
    pub payment_methods: Vec<CompactString>,
}

impl Advertisement {
    /// Whether a transaction of `amount` fits the merchant's bounds and
    /// remaining supply.
    pub fn accepts_amount(&self, amount: FixedPoint) -> bool {
        self.min_single_amount <= amount
            && amount <= self.max_single_amount
            && self.available >= amount
    }

    /// Completion rate as a percentage rounded to two decimals.
    pub fn completion_pct(&self) -> f64 {
        (self.completion_rate * 10_000.0).round() / 100.0
    }
}
