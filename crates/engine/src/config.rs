//! Engine configuration.

use peerscout_core::{CryptoAsset, Fiat, PaymentPolicy};
use std::time::Duration;

/// Configuration for the quote engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fiat currencies scanned each cycle.
    pub fiats: Vec<Fiat>,
    /// Asset being traded.
    pub asset: CryptoAsset,
    /// Reference currency all offers are normalized into for ranking.
    pub reference: Fiat,
    /// Payment methods that make an advertisement eligible.
    pub payment_policy: PaymentPolicy,
    /// Concurrent in-flight venue lookups per cycle.
    pub max_concurrent_fetches: usize,
    /// Lower bound on the auto-refresh interval.
    pub min_refresh_interval: Duration,
    /// Delay before the first auto-refresh cycle fires.
    pub first_refresh_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fiats: Fiat::supported().to_vec(),
            asset: CryptoAsset::USDT,
            reference: Fiat::EGP,
            payment_policy: PaymentPolicy::default(),
            max_concurrent_fetches: 10,
            min_refresh_interval: Duration::from_secs(10),
            first_refresh_delay: Duration::from_secs(5),
        }
    }
}
