//! Engine state owned by a single writer.

use chrono::{DateTime, Utc};
use peerscout_core::{AlertKey, FixedPoint, Offer, TradeDirection};
use std::collections::HashSet;
use std::time::Duration;

/// Mutable engine state. Lives behind the engine's mutex and is touched only
/// by configuration calls and by a completing fetch cycle, so alert-epoch
/// resets and alert evaluation can never interleave inconsistently.
#[derive(Debug)]
pub struct EngineState {
    /// Requested transaction size, in asset units.
    pub amount: FixedPoint,
    /// Alert threshold in the reference currency. None disables alerting.
    pub threshold: Option<FixedPoint>,
    /// Current trade direction.
    pub direction: TradeDirection,
    /// Interval of the periodic refresh job.
    pub auto_interval: Duration,
    /// Whether a periodic refresh job is active.
    pub auto_active: bool,
    /// When the last fetch cycle completed.
    pub last_fetch: Option<DateTime<Utc>>,
    /// Ranked offers from the last completed cycle.
    pub last_results: Vec<Offer>,
    /// Keys that already fired this alert epoch.
    pub alerted: HashSet<AlertKey>,
}

impl EngineState {
    pub fn new(amount: FixedPoint, direction: TradeDirection) -> Self {
        Self {
            amount,
            threshold: None,
            direction,
            auto_interval: Duration::from_secs(60),
            auto_active: false,
            last_fetch: None,
            last_results: Vec::new(),
            alerted: HashSet::new(),
        }
    }

    /// Start a new alert epoch: every key may fire again.
    pub fn reset_alerts(&mut self) {
        self.alerted.clear();
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            amount: self.amount,
            threshold: self.threshold,
            direction: self.direction,
            auto_interval: self.auto_interval,
            auto_active: self.auto_active,
            last_fetch: self.last_fetch,
            cached_results: self.last_results.len(),
        }
    }
}

/// Read-only view of the engine state.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub amount: FixedPoint,
    pub threshold: Option<FixedPoint>,
    pub direction: TradeDirection,
    pub auto_interval: Duration,
    pub auto_active: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub cached_results: usize,
}
