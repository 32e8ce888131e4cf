//! Plain-text rendering of fetch reports.

use chrono::Local;
use peerscout_core::{Fiat, FixedPoint, Offer};
use peerscout_engine::AlertEvent;

const TOP_OFFERS: usize = 10;

fn reference_or_na(value: Option<FixedPoint>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Ranked results table: best offer in detail, then the top of the list.
pub fn results(offers: &[Offer], reference: Fiat) -> String {
    if offers.is_empty() {
        return "No results found.".to_string();
    }

    let ts = Local::now().format("%d %b %Y %H:%M:%S");
    let best = &offers[0];
    let mut lines = vec![
        format!("Latest rates  {ts}"),
        String::new(),
        "BEST OFFER".to_string(),
        format!("  Currency : {}", best.fiat),
        format!("  Price    : {} {}", best.price, best.fiat),
        format!("  Total    : {} {}", best.total, best.fiat),
        format!(
            "  {:<9}: {}",
            reference.as_str(),
            reference_or_na(best.reference_total)
        ),
        format!(
            "  Merchant : {} ({:.2}%, {} orders/mo)",
            best.merchant, best.completion_pct, best.monthly_orders
        ),
        format!(
            "  Payment  : {}",
            best.payment_methods
                .iter()
                .take(3)
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!(
            "  Limits   : {} - {} ({} available)",
            best.min_single_amount, best.max_single_amount, best.available
        ),
        String::new(),
        format!("TOP {} OFFERS", offers.len().min(TOP_OFFERS)),
    ];

    for (i, offer) in offers.iter().take(TOP_OFFERS).enumerate() {
        lines.push(format!(
            "{:>2}. {}  price {}  = {} {}  | {}",
            i + 1,
            offer.fiat,
            offer.price,
            reference_or_na(offer.reference_total),
            reference,
            offer.merchant
        ));
    }

    lines.join("\n")
}

/// One-shot alert block.
pub fn alert(event: &AlertEvent, reference: Fiat) -> String {
    let ts = Local::now().format("%H:%M:%S");
    let offer = &event.offer;
    [
        format!("PRICE ALERT  {ts}"),
        format!("  Currency  : {}", offer.fiat),
        format!("  Price     : {} {}", offer.price, offer.fiat),
        format!("  Total     : {} {}", offer.total, offer.fiat),
        format!(
            "  {:<9} : {}",
            reference.as_str(),
            reference_or_na(offer.reference_total)
        ),
        format!("  Threshold : {} {}", event.threshold, reference),
        format!(
            "  Merchant  : {} ({:.2}%, {} orders/mo)",
            offer.merchant, offer.completion_pct, offer.monthly_orders
        ),
        format!(
            "  Payment   : {}",
            offer
                .payment_methods
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!(
            "  Limits    : {} - {} ({} available)",
            offer.min_single_amount, offer.max_single_amount, offer.available
        ),
    ]
    .join("\n")
}
