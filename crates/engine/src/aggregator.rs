//! Concurrent fan-out across currencies and cross-currency ranking.

use crate::config::EngineConfig;
use crate::error::QuoteError;
use crate::selector;
use futures_util::future::join_all;
use peerscout_core::{Fiat, FixedPoint, Offer, TradeDirection};
use peerscout_venue::{QuoteVenue, RateSource};
use std::cmp::Ordering;
use tokio::sync::Semaphore;
use tracing::debug;

/// Result of one full fan-out/fan-in pass across the configured currencies.
///
/// An empty `offers` list is a valid outcome, not an error; `failures` keeps
/// the per-currency reasons for callers that want diagnostics.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    /// Ranked offers for the currencies that produced one.
    pub offers: Vec<Offer>,
    /// Currencies that produced nothing this cycle, with the reason.
    pub failures: Vec<(Fiat, QuoteError)>,
}

/// Run one fetch cycle: query every configured currency concurrently
/// (bounded by `max_concurrent_fetches`), normalize each survivor into the
/// reference currency, and rank the result.
///
/// This is a full fan-out/fan-in barrier. Per-currency failures never cancel
/// or delay sibling lookups.
pub async fn run_cycle(
    venue: &dyn QuoteVenue,
    rates: &dyn RateSource,
    config: &EngineConfig,
    amount: FixedPoint,
    direction: TradeDirection,
) -> CycleOutcome {
    let limiter = Semaphore::new(config.max_concurrent_fetches.max(1));

    let tasks = config.fiats.iter().map(|&fiat| {
        let limiter = &limiter;
        async move {
            // The semaphore is never closed, so acquire cannot fail.
            let _permit = limiter.acquire().await.ok();
            let result = fetch_quote(venue, rates, config, fiat, amount, direction).await;
            (fiat, result)
        }
    });

    let results = join_all(tasks).await;

    let mut outcome = CycleOutcome::default();
    for (fiat, result) in results {
        match result {
            Ok(offer) => outcome.offers.push(offer),
            Err(err) => {
                debug!(fiat = fiat.as_str(), error = %err, "currency dropped from cycle");
                outcome.failures.push((fiat, err));
            }
        }
    }
    rank_offers(&mut outcome.offers, direction);
    outcome
}

/// Fetch, select, and normalize the best offer for one currency.
async fn fetch_quote(
    venue: &dyn QuoteVenue,
    rates: &dyn RateSource,
    config: &EngineConfig,
    fiat: Fiat,
    amount: FixedPoint,
    direction: TradeDirection,
) -> Result<Offer, QuoteError> {
    let ads = venue.search(fiat, direction, config.asset, amount).await?;
    let mut offer = selector::select_best(&ads, amount, direction, &config.payment_policy)?;
    offer.reference_total = normalize(rates, fiat, config.reference, offer.total).await;
    Ok(offer)
}

/// Convert a native-currency total into the reference unit. A missing rate
/// degrades the offer to unranked; it is never dropped.
async fn normalize(
    rates: &dyn RateSource,
    from: Fiat,
    reference: Fiat,
    total: FixedPoint,
) -> Option<FixedPoint> {
    if from == reference {
        return Some(total);
    }
    let rate = rates.rate(from, reference).await?;
    if rate <= 0.0 {
        return None;
    }
    Some(FixedPoint::from_f64(total.to_f64() * rate))
}

/// Sort offers by normalized value: best first for the direction, offers
/// without a reference value always last.
pub fn rank_offers(offers: &mut [Offer], direction: TradeDirection) {
    offers.sort_by(|a, b| match (a.reference_total, b.reference_total) {
        (Some(x), Some(y)) => match direction {
            TradeDirection::Sell => y.cmp(&x),
            TradeDirection::Buy => x.cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ad, MockRates, MockVenue};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering as AtomicOrdering;

    fn config_for(fiats: &[Fiat]) -> EngineConfig {
        EngineConfig {
            fiats: fiats.to_vec(),
            ..EngineConfig::default()
        }
    }

    fn amount(v: f64) -> FixedPoint {
        FixedPoint::from_f64(v)
    }

    #[tokio::test]
    async fn test_cycle_ranks_by_reference_value_descending_for_sell() {
        let venue = MockVenue::new()
            .with_ads(
                Fiat::EUR,
                vec![ad(Fiat::EUR, 0.92, 10.0, 1000.0, 500.0, "eur", &["Bank Transfer"])],
            )
            .with_ads(
                Fiat::GBP,
                vec![ad(Fiat::GBP, 0.79, 10.0, 1000.0, 500.0, "gbp", &["Bank Transfer"])],
            );
        // GBP converts richer than EUR
        let rates = MockRates::new().with_rate(Fiat::EUR, 52.0).with_rate(Fiat::GBP, 61.0);

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::EUR, Fiat::GBP]),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.offers.len(), 2);
        assert_eq!(outcome.offers[0].fiat, Fiat::GBP);
        let values: Vec<_> = outcome
            .offers
            .iter()
            .map(|o| o.reference_total.unwrap())
            .collect();
        assert!(values[0] >= values[1]);
    }

    #[tokio::test]
    async fn test_cycle_ranks_ascending_for_buy() {
        let venue = MockVenue::new()
            .with_ads(
                Fiat::EUR,
                vec![ad(Fiat::EUR, 0.92, 10.0, 1000.0, 500.0, "eur", &["Bank Transfer"])],
            )
            .with_ads(
                Fiat::GBP,
                vec![ad(Fiat::GBP, 0.79, 10.0, 1000.0, 500.0, "gbp", &["Bank Transfer"])],
            );
        let rates = MockRates::new().with_rate(Fiat::EUR, 52.0).with_rate(Fiat::GBP, 61.0);

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::EUR, Fiat::GBP]),
            amount(100.0),
            TradeDirection::Buy,
        )
        .await;

        // buying: cheapest reference cost first
        assert_eq!(outcome.offers[0].fiat, Fiat::EUR);
    }

    #[tokio::test]
    async fn test_missing_rate_ranks_last_but_survives() {
        let venue = MockVenue::new()
            .with_ads(
                Fiat::EUR,
                vec![ad(Fiat::EUR, 0.92, 10.0, 1000.0, 500.0, "eur", &["Bank Transfer"])],
            )
            .with_ads(
                Fiat::JPY,
                vec![ad(Fiat::JPY, 140.0, 10.0, 1000.0, 500.0, "jpy", &["Bank Transfer"])],
            );
        // no JPY rate configured
        let rates = MockRates::new().with_rate(Fiat::EUR, 52.0);

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::JPY, Fiat::EUR]),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert_eq!(outcome.offers.len(), 2);
        assert_eq!(outcome.offers[0].fiat, Fiat::EUR);
        assert_eq!(outcome.offers[1].fiat, Fiat::JPY);
        assert!(outcome.offers[1].reference_total.is_none());
    }

    #[tokio::test]
    async fn test_reference_currency_needs_no_rate() {
        let venue = MockVenue::new().with_ads(
            Fiat::EGP,
            vec![ad(Fiat::EGP, 48.15, 10.0, 1000.0, 500.0, "egp", &["Bank Transfer"])],
        );
        // empty rate table: the identity short-circuit must cover EGP
        let rates = MockRates::new();

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::EGP]),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert_eq!(
            outcome.offers[0].reference_total,
            Some(FixedPoint::from_f64(4815.0))
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let venue = MockVenue::new()
            .with_ads(
                Fiat::EUR,
                vec![ad(Fiat::EUR, 0.92, 10.0, 1000.0, 500.0, "eur", &["Bank Transfer"])],
            )
            .with_unavailable(Fiat::GBP);
        let rates = MockRates::new().with_rate(Fiat::EUR, 52.0);

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::GBP, Fiat::EUR, Fiat::USD]),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert_eq!(outcome.offers.len(), 1);
        assert_eq!(outcome.offers[0].fiat, Fiat::EUR);
        // GBP venue outage and USD empty set both recorded
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome
            .failures
            .iter()
            .any(|(f, e)| *f == Fiat::GBP && matches!(e, QuoteError::Venue(_))));
        assert!(outcome
            .failures
            .iter()
            .any(|(f, e)| *f == Fiat::USD && matches!(e, QuoteError::NoAds)));
    }

    #[tokio::test]
    async fn test_total_failure_yields_empty_valid_outcome() {
        let venue = MockVenue::new()
            .with_unavailable(Fiat::EUR)
            .with_unavailable(Fiat::GBP);
        let rates = MockRates::new();

        let outcome = run_cycle(
            &venue,
            &rates,
            &config_for(&[Fiat::EUR, Fiat::GBP]),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert!(outcome.offers.is_empty());
        assert_eq!(outcome.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_every_configured_currency_is_queried_once() {
        let venue = MockVenue::new();
        let rates = MockRates::new();
        let fiats = [Fiat::EUR, Fiat::GBP, Fiat::USD, Fiat::JPY];

        run_cycle(
            &venue,
            &rates,
            &config_for(&fiats),
            amount(100.0),
            TradeDirection::Sell,
        )
        .await;

        assert_eq!(venue.calls.load(AtomicOrdering::SeqCst), fiats.len());
    }

    #[test]
    fn test_rank_offers_none_always_trails() {
        let mk = |fiat, reference_total| {
            let mut offer = crate::selector::select_best(
                &[ad(fiat, 1.0, 1.0, 1000.0, 1000.0, "m", &["Bank Transfer"])],
                FixedPoint::from_f64(100.0),
                TradeDirection::Sell,
                &peerscout_core::PaymentPolicy::default(),
            )
            .unwrap();
            offer.reference_total = reference_total;
            offer
        };
        let mut offers = vec![
            mk(Fiat::EUR, None),
            mk(Fiat::GBP, Some(FixedPoint::from_f64(10.0))),
            mk(Fiat::USD, Some(FixedPoint::from_f64(20.0))),
        ];

        rank_offers(&mut offers, TradeDirection::Sell);
        assert_eq!(offers[0].fiat, Fiat::USD);
        assert!(offers[2].reference_total.is_none());

        rank_offers(&mut offers, TradeDirection::Buy);
        assert_eq!(offers[0].fiat, Fiat::GBP);
        assert!(offers[2].reference_total.is_none());
    }
}
