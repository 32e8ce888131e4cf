//! Error types for the quote engine.

use peerscout_venue::VenueError;
use thiserror::Error;

/// Why a single currency produced no offer in a fetch cycle.
///
/// These never propagate out of a cycle; the currency is simply absent from
/// the ranked result and the reason is kept for diagnostics.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("venue unavailable: {0}")]
    Venue(#[from] VenueError),

    #[error("no advertisements returned")]
    NoAds,

    #[error("no advertisement accepts the requested amount")]
    NoAdsInRange,

    #[error("no advertisement offers an eligible payment method")]
    NoEligiblePayment,
}

/// Invalid caller input to a configuration operation. Returned synchronously;
/// the engine state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("threshold must be positive")]
    InvalidThreshold,

    #[error("interval must be at least {min_secs} seconds")]
    InvalidInterval { min_secs: u64 },
}
