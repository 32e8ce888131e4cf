//! Fiat currency identifiers.

use serde::{Deserialize, Serialize};

/// Fiat currencies the venue is queried in.
///
/// The set matches the currencies transferable through the account the
/// scanner settles into; EGP doubles as the default reference unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Fiat {
    GBP = 1,
    EUR = 2,
    USD = 3,
    AUD = 4,
    ZAR = 5,
    PLN = 6,
    CAD = 7,
    NZD = 8,
    CHF = 9,
    SEK = 10,
    HKD = 11,
    AED = 12,
    CZK = 13,
    NOK = 14,
    DKK = 15,
    SGD = 16,
    JPY = 17,
    CNY = 18,
    EGP = 19,
}

impl Fiat {
    /// All supported currencies, in scan order.
    pub const fn supported() -> [Fiat; 19] {
        [
            Fiat::GBP,
            Fiat::EUR,
            Fiat::USD,
            Fiat::AUD,
            Fiat::ZAR,
            Fiat::PLN,
            Fiat::CAD,
            Fiat::NZD,
            Fiat::CHF,
            Fiat::SEK,
            Fiat::HKD,
            Fiat::AED,
            Fiat::CZK,
            Fiat::NOK,
            Fiat::DKK,
            Fiat::SGD,
            Fiat::JPY,
            Fiat::CNY,
            Fiat::EGP,
        ]
    }

    /// Parse from an ISO code, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.to_uppercase();
        Fiat::supported()
            .into_iter()
            .find(|f| f.as_str() == code)
    }

    /// Get the fiat ID.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Create from ID.
    pub fn from_id(id: u8) -> Option<Self> {
        Fiat::supported().into_iter().find(|f| f.id() == id)
    }

    /// ISO 4217 code.
    pub fn as_str(self) -> &'static str {
        match self {
            Fiat::GBP => "GBP",
            Fiat::EUR => "EUR",
            Fiat::USD => "USD",
            Fiat::AUD => "AUD",
            Fiat::ZAR => "ZAR",
            Fiat::PLN => "PLN",
            Fiat::CAD => "CAD",
            Fiat::NZD => "NZD",
            Fiat::CHF => "CHF",
            Fiat::SEK => "SEK",
            Fiat::HKD => "HKD",
            Fiat::AED => "AED",
            Fiat::CZK => "CZK",
            Fiat::NOK => "NOK",
            Fiat::DKK => "DKK",
            Fiat::SGD => "SGD",
            Fiat::JPY => "JPY",
            Fiat::CNY => "CNY",
            Fiat::EGP => "EGP",
        }
    }
}

impl std::fmt::Display for Fiat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
