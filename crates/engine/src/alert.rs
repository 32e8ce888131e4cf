//! Threshold alerting with one-shot deduplication.

use peerscout_core::{AlertKey, FixedPoint, Offer, TradeDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// A threshold crossing that has not fired before in the current alert epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub offer: Offer,
    pub threshold: FixedPoint,
}

/// Evaluate ranked offers against the alert threshold.
///
/// An offer fires when its reference value beats the threshold for the
/// direction: above for Sell (payout better than wanted), below for Buy
/// (cost lower than wanted). Offers without a reference value never fire.
/// Each `AlertKey` fires at most once until the set is cleared by a
/// configuration change. No threshold means no evaluation at all.
pub fn evaluate(
    offers: &[Offer],
    threshold: Option<FixedPoint>,
    direction: TradeDirection,
    alerted: &mut HashSet<AlertKey>,
) -> Vec<AlertEvent> {
    let Some(threshold) = threshold else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for offer in offers {
        let Some(value) = offer.reference_total else {
            continue;
        };
        let crossed = match direction {
            TradeDirection::Sell => value > threshold,
            TradeDirection::Buy => value < threshold,
        };
        if !crossed {
            continue;
        }
        if !alerted.insert(offer.alert_key()) {
            continue;
        }
        info!(
            fiat = offer.fiat.as_str(),
            price = %offer.price,
            value = %value,
            threshold = %threshold,
            "price alert"
        );
        events.push(AlertEvent {
            offer: offer.clone(),
            threshold,
        });
    }
    events
}
