//! Trade direction.

use serde::{Deserialize, Serialize};

/// Which side of the venue the requester is on.
///
/// The direction decides both the selection extremum (a seller wants the
/// highest unit price, a buyer the lowest) and the threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TradeDirection {
    Buy = 0,
    Sell = 1,
}

impl TradeDirection {
    pub fn opposite(self) -> Self {
        match self {
            TradeDirection::Buy => TradeDirection::Sell,
            TradeDirection::Sell => TradeDirection::Buy,
        }
    }

    /// Wire name the venue expects.
    pub fn as_str(self) -> &'static str {
        match self {
            TradeDirection::Buy => "BUY",
            TradeDirection::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
