//! Core data types for the P2P quote scout.

pub mod advert;
pub mod asset;
pub mod direction;
pub mod fiat;
pub mod offer;
pub mod payment;
pub mod price;

pub use advert::*;
pub use asset::*;
pub use direction::*;
pub use fiat::*;
pub use offer::*;
pub use payment::*;
pub use price::*;
