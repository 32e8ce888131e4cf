//! Best-advertisement selection for a single currency.

use crate::error::QuoteError;
use peerscout_core::{Advertisement, FixedPoint, Offer, PaymentPolicy, TradeDirection};
use std::cmp::Ordering;

/// Pick the single best tradable advertisement for one currency.
///
/// Filters by transaction bounds and remaining supply, then by payment
/// policy, then selects the price extremum for the direction: highest for
/// Sell (best payout), lowest for Buy (lowest cost). Advertisements at the
/// same extremal price are broken deterministically by merchant completion
/// rate, then monthly order count, both descending.
pub fn select_best(
    ads: &[Advertisement],
    amount: FixedPoint,
    direction: TradeDirection,
    policy: &PaymentPolicy,
) -> Result<Offer, QuoteError> {
    if ads.is_empty() {
        return Err(QuoteError::NoAds);
    }

    let in_range: Vec<&Advertisement> =
        ads.iter().filter(|ad| ad.accepts_amount(amount)).collect();
    if in_range.is_empty() {
        return Err(QuoteError::NoAdsInRange);
    }

    let Some(best) = in_range
        .into_iter()
        .filter(|ad| policy.permits_any(&ad.payment_methods))
        .max_by(|a, b| preference(a, b, direction))
    else {
        return Err(QuoteError::NoEligiblePayment);
    };

    let total = best.price.mul(amount);
    Ok(Offer {
        fiat: best.fiat,
        price: best.price,
        amount,
        total,
        reference_total: None,
        merchant: best.merchant.clone(),
        completion_pct: best.completion_pct(),
        monthly_orders: best.monthly_orders,
        payment_methods: policy.filter(&best.payment_methods),
        min_single_amount: best.min_single_amount,
        max_single_amount: best.max_single_amount,
        available: best.available,
    })
}

/// Ordering where the greater advertisement is the preferred one.
fn preference(a: &Advertisement, b: &Advertisement, direction: TradeDirection) -> Ordering {
    let by_price = match direction {
        TradeDirection::Sell => a.price.cmp(&b.price),
        TradeDirection::Buy => b.price.cmp(&a.price),
    };
    by_price
        .then_with(|| {
            a.completion_rate
                .partial_cmp(&b.completion_rate)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.monthly_orders.cmp(&b.monthly_orders))
}
