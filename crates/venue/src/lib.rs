//! External collaborators for the quote engine.
//!
//! This crate provides:
//! - The advertisement search client for the P2P quote venue
//! - The exchange-rate client used for cross-currency normalization
//!
//! Both sit behind traits so the engine can run against mocks in tests.

pub mod error;
pub mod rates;
pub mod search;

pub use error::VenueError;
pub use rates::{OpenErApi, RateSource};
pub use search::{BinanceP2p, QuoteVenue};
