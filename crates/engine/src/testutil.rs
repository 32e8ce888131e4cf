//! Shared fixtures and in-memory collaborators for engine tests.

use async_trait::async_trait;
use compact_str::CompactString;
use peerscout_core::{
    Advertisement, CryptoAsset, Fiat, FixedPoint, Offer, TradeDirection,
};
use peerscout_venue::{QuoteVenue, RateSource, VenueError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub(crate) fn ad(
    fiat: Fiat,
    price: f64,
    min: f64,
    max: f64,
    available: f64,
    merchant: &str,
    methods: &[&str],
) -> Advertisement {
    Advertisement {
        fiat,
        price: FixedPoint::from_f64(price),
        min_single_amount: FixedPoint::from_f64(min),
        max_single_amount: FixedPoint::from_f64(max),
        available: FixedPoint::from_f64(available),
        merchant: CompactString::new(merchant),
        completion_rate: 0.95,
        monthly_orders: 100,
        payment_methods: methods.iter().map(|m| CompactString::new(m)).collect(),
    }
}

pub(crate) fn offer_with_value(fiat: Fiat, price: f64, reference_total: Option<f64>) -> Offer {
    Offer {
        fiat,
        price: FixedPoint::from_f64(price),
        amount: FixedPoint::from_f64(100.0),
        total: FixedPoint::from_f64(price * 100.0),
        reference_total: reference_total.map(FixedPoint::from_f64),
        merchant: CompactString::new("merchant"),
        completion_pct: 95.0,
        monthly_orders: 100,
        payment_methods: vec![CompactString::new("Bank Transfer")],
        min_single_amount: FixedPoint::from_f64(10.0),
        max_single_amount: FixedPoint::from_f64(1000.0),
        available: FixedPoint::from_f64(500.0),
    }
}

/// In-memory venue: serves canned advertisement sets per currency, simulates
/// outages, and counts every search call.
pub(crate) struct MockVenue {
    ads: HashMap<Fiat, Vec<Advertisement>>,
    unavailable: HashSet<Fiat>,
    pub(crate) calls: Arc<AtomicUsize>,
}

impl MockVenue {
    pub(crate) fn new() -> Self {
        Self {
            ads: HashMap::new(),
            unavailable: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_ads(mut self, fiat: Fiat, ads: Vec<Advertisement>) -> Self {
        self.ads.insert(fiat, ads);
        self
    }

    pub(crate) fn with_unavailable(mut self, fiat: Fiat) -> Self {
        self.unavailable.insert(fiat);
        self
    }
}

#[async_trait]
impl QuoteVenue for MockVenue {
    async fn search(
        &self,
        fiat: Fiat,
        _direction: TradeDirection,
        _asset: CryptoAsset,
        _amount: FixedPoint,
    ) -> Result<Vec<Advertisement>, VenueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.contains(&fiat) {
            return Err(VenueError::Timeout);
        }
        Ok(self.ads.get(&fiat).cloned().unwrap_or_default())
    }
}

/// In-memory rate table keyed by source currency; the target is assumed to be
/// the reference. Identity lookups answer 1.0 like the real client.
pub(crate) struct MockRates {
    rates: HashMap<Fiat, f64>,
}

impl MockRates {
    pub(crate) fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    pub(crate) fn with_rate(mut self, from: Fiat, rate: f64) -> Self {
        self.rates.insert(from, rate);
        self
    }
}

#[async_trait]
impl RateSource for MockRates {
    async fn rate(&self, from: Fiat, to: Fiat) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.rates.get(&from).copied()
    }
}
