//! The quote engine: configuration surface and the guarded fetch cycle.

use crate::aggregator;
use crate::alert::{self, AlertEvent};
use crate::config::EngineConfig;
use crate::error::{ConfigError, QuoteError};
use crate::state::{EngineSnapshot, EngineState};
use chrono::Utc;
use peerscout_core::{Fiat, FixedPoint, Offer, TradeDirection};
use peerscout_venue::{QuoteVenue, RateSource};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of one fetch cycle, including which offers are new alerts.
#[derive(Debug)]
pub struct FetchReport {
    /// Ranked offers, best first for the cycle's direction.
    pub offers: Vec<Offer>,
    /// Currencies that produced nothing, with the reason.
    pub failures: Vec<(Fiat, QuoteError)>,
    /// Threshold crossings that had not fired before this cycle.
    pub alerts: Vec<AlertEvent>,
}

/// Single-writer owner of the aggregation pipeline and its state.
///
/// Configuration calls are synchronous and mutate state under a mutex with
/// short critical sections. Fetch cycles are serialized through a separate
/// async guard, so at most one cycle is ever in flight.
pub struct QuoteEngine {
    config: EngineConfig,
    venue: Arc<dyn QuoteVenue>,
    rates: Arc<dyn RateSource>,
    state: Mutex<EngineState>,
    cycle_guard: tokio::sync::Mutex<()>,
}

impl QuoteEngine {
    /// Default requested amount until the caller configures one.
    pub const DEFAULT_AMOUNT: f64 = 100.0;

    pub fn new(config: EngineConfig, venue: Arc<dyn QuoteVenue>, rates: Arc<dyn RateSource>) -> Self {
        Self {
            config,
            venue,
            rates,
            state: Mutex::new(EngineState::new(
                FixedPoint::from_f64(Self::DEFAULT_AMOUNT),
                TradeDirection::Sell,
            )),
            cycle_guard: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set the requested trade amount. Starts a new alert epoch.
    pub fn set_amount(&self, amount: FixedPoint) -> Result<(), ConfigError> {
        if amount.is_zero() {
            return Err(ConfigError::InvalidAmount);
        }
        let mut state = self.lock_state();
        state.amount = amount;
        state.reset_alerts();
        info!(amount = %amount, "trade amount updated");
        Ok(())
    }

    /// Set the alert threshold in the reference currency. Starts a new alert
    /// epoch.
    pub fn set_threshold(&self, threshold: FixedPoint) -> Result<(), ConfigError> {
        if threshold.is_zero() {
            return Err(ConfigError::InvalidThreshold);
        }
        let mut state = self.lock_state();
        state.threshold = Some(threshold);
        state.reset_alerts();
        info!(threshold = %threshold, "alert threshold set");
        Ok(())
    }

    /// Disable alerting. Starts a new alert epoch.
    pub fn clear_threshold(&self) {
        let mut state = self.lock_state();
        state.threshold = None;
        state.reset_alerts();
        info!("alert threshold cleared");
    }

    /// Switch trade direction. Starts a new alert epoch.
    pub fn set_direction(&self, direction: TradeDirection) {
        let mut state = self.lock_state();
        state.direction = direction;
        state.reset_alerts();
        info!(direction = %direction, "trade direction updated");
    }

    /// Run one fetch cycle and evaluate alerts.
    ///
    /// Cycles are serialized: a call entering while another is in flight
    /// waits for it to finish instead of overlapping.
    pub async fn fetch_once(&self) -> FetchReport {
        let _cycle = self.cycle_guard.lock().await;

        let (amount, direction) = {
            let state = self.lock_state();
            (state.amount, state.direction)
        };

        let outcome = aggregator::run_cycle(
            self.venue.as_ref(),
            self.rates.as_ref(),
            &self.config,
            amount,
            direction,
        )
        .await;

        let alerts = {
            let mut state = self.lock_state();
            let alerts =
                alert::evaluate(&outcome.offers, state.threshold, direction, &mut state.alerted);
            state.last_results = outcome.offers.clone();
            state.last_fetch = Some(Utc::now());
            alerts
        };

        if outcome.offers.is_empty() {
            warn!(
                failed = outcome.failures.len(),
                "fetch cycle produced no offers"
            );
        } else {
            info!(
                offers = outcome.offers.len(),
                failures = outcome.failures.len(),
                alerts = alerts.len(),
                "fetch cycle complete"
            );
        }

        FetchReport {
            offers: outcome.offers,
            failures: outcome.failures,
            alerts,
        }
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock_state().snapshot()
    }

    /// Ranked offers from the last completed cycle.
    pub fn last_results(&self) -> Vec<Offer> {
        self.lock_state().last_results.clone()
    }

    pub(crate) fn mark_auto(&self, active: bool, interval: Option<Duration>) {
        let mut state = self.lock_state();
        state.auto_active = active;
        if let Some(interval) = interval {
            state.auto_interval = interval;
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        // A poisoning panic cannot leave the state half-written: every
        // critical section is a plain field update.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ad, MockRates, MockVenue};
    use pretty_assertions::assert_eq;

    fn engine_with(venue: MockVenue, rates: MockRates, fiats: &[Fiat]) -> QuoteEngine {
        let config = EngineConfig {
            fiats: fiats.to_vec(),
            ..EngineConfig::default()
        };
        QuoteEngine::new(config, Arc::new(venue), Arc::new(rates))
    }

    fn eur_engine() -> QuoteEngine {
        let venue = MockVenue::new().with_ads(
            Fiat::EUR,
            vec![ad(Fiat::EUR, 0.92, 10.0, 1000.0, 500.0, "eur", &["Bank Transfer"])],
        );
        let rates = MockRates::new().with_rate(Fiat::EUR, 52.0);
        engine_with(venue, rates, &[Fiat::EUR])
    }

    #[test]
    fn test_invalid_inputs_leave_state_untouched() {
        let engine = eur_engine();
        assert_eq!(
            engine.set_amount(FixedPoint::ZERO),
            Err(ConfigError::InvalidAmount)
        );
        assert_eq!(
            engine.set_threshold(FixedPoint::ZERO),
            Err(ConfigError::InvalidThreshold)
        );

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.amount, FixedPoint::from_f64(100.0));
        assert_eq!(snapshot.threshold, None);
    }

    #[tokio::test]
    async fn test_fetch_updates_last_results_and_timestamp() {
        let engine = eur_engine();
        assert!(engine.snapshot().last_fetch.is_none());

        let report = engine.fetch_once().await;
        assert_eq!(report.offers.len(), 1);
        assert_eq!(report.offers[0].total, FixedPoint::from_f64(92.0));

        let snapshot = engine.snapshot();
        assert!(snapshot.last_fetch.is_some());
        assert_eq!(snapshot.cached_results, 1);
        assert_eq!(engine.last_results().len(), 1);
    }

    #[tokio::test]
    async fn test_alert_fires_once_per_epoch() {
        let engine = eur_engine();
        // 100 × 0.92 × 52.0 = 4784 reference units
        engine.set_threshold(FixedPoint::from_f64(4000.0)).unwrap();

        let first = engine.fetch_once().await;
        assert_eq!(first.alerts.len(), 1);

        let second = engine.fetch_once().await;
        assert!(second.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_threshold_change_refires_identical_offer() {
        let engine = eur_engine();
        engine.set_threshold(FixedPoint::from_f64(4000.0)).unwrap();
        assert_eq!(engine.fetch_once().await.alerts.len(), 1);

        // re-setting the same threshold starts a new epoch
        engine.set_threshold(FixedPoint::from_f64(4000.0)).unwrap();
        assert_eq!(engine.fetch_once().await.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_amount_change_resets_epoch() {
        let engine = eur_engine();
        engine.set_threshold(FixedPoint::from_f64(40.0)).unwrap();
        assert_eq!(engine.fetch_once().await.alerts.len(), 1);

        engine.set_amount(FixedPoint::from_f64(100.0)).unwrap();
        assert_eq!(engine.fetch_once().await.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_no_threshold_no_alerts() {
        let engine = eur_engine();
        let report = engine.fetch_once().await;
        assert!(report.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_total_venue_failure_is_not_fatal() {
        let venue = MockVenue::new().with_unavailable(Fiat::EUR);
        let engine = engine_with(venue, MockRates::new(), &[Fiat::EUR]);

        let report = engine.fetch_once().await;
        assert!(report.offers.is_empty());
        assert_eq!(report.failures.len(), 1);
        // the cycle still counts as completed
        assert!(engine.snapshot().last_fetch.is_some());
    }

    #[tokio::test]
    async fn test_buy_direction_threshold_comparison() {
        let engine = eur_engine();
        engine.set_direction(TradeDirection::Buy);
        // buy alert fires when cost drops below threshold; 4784 < 5000
        engine.set_threshold(FixedPoint::from_f64(5000.0)).unwrap();

        let report = engine.fetch_once().await;
        assert_eq!(report.alerts.len(), 1);
    }
}
