//! Tradable asset identifiers.

use serde::{Deserialize, Serialize};

/// Asset being bought or sold on the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum CryptoAsset {
    #[default]
    USDT = 1,
    USDC = 2,
    BTC = 3,
    ETH = 4,
}

impl CryptoAsset {
    /// Parse from a symbol, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USDT" => Some(CryptoAsset::USDT),
            "USDC" => Some(CryptoAsset::USDC),
            "BTC" => Some(CryptoAsset::BTC),
            "ETH" => Some(CryptoAsset::ETH),
            _ => None,
        }
    }

    /// Get the asset ID.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Create from ID.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(CryptoAsset::USDT),
            2 => Some(CryptoAsset::USDC),
            3 => Some(CryptoAsset::BTC),
            4 => Some(CryptoAsset::ETH),
            _ => None,
        }
    }

    /// Venue symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            CryptoAsset::USDT => "USDT",
            CryptoAsset::USDC => "USDC",
            CryptoAsset::BTC => "BTC",
            CryptoAsset::ETH => "ETH",
        }
    }
}

impl std::fmt::Display for CryptoAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!(CryptoAsset::parse("usdt"), Some(CryptoAsset::USDT));
        assert_eq!(CryptoAsset::parse("BTC"), Some(CryptoAsset::BTC));
        assert_eq!(CryptoAsset::parse("DOGE"), None);
    }

    #[test]
    fn test_id_roundtrip() {
        for asset in [
            CryptoAsset::USDT,
            CryptoAsset::USDC,
            CryptoAsset::BTC,
            CryptoAsset::ETH,
        ] {
            assert_eq!(CryptoAsset::from_id(asset.id()), Some(asset));
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(CryptoAsset::default(), CryptoAsset::USDT);
    }
}
