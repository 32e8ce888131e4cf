//! Fixed-point money values.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Fixed-point number with 8 decimal places.
/// Used for prices and amounts without floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FixedPoint(pub u64);

impl FixedPoint {
    /// Number of decimal places.
    pub const DECIMALS: u32 = 8;
    /// Scale factor: 10^8 (fits comfortably in u64 for fiat totals)
    pub const SCALE: u64 = 100_000_000;
    /// Zero value.
    pub const ZERO: FixedPoint = FixedPoint(0);

    /// Create from f64 (display/config convenience).
    pub fn from_f64(value: f64) -> Self {
        if value <= 0.0 {
            return Self(0);
        }
        Self((value * Self::SCALE as f64).round() as u64)
    }

    /// Convert to f64 (for display and rate math).
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Parse a decimal string as the venue serializes numbers ("0.92", "1000").
    /// Returns None for anything that is not a plain non-negative decimal.
    /// Digits beyond the supported precision are truncated.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        let int: u64 = int_part.parse().ok()?;
        if frac_part.chars().any(|c| !c.is_ascii_digit()) {
            return None;
        }
        let mut frac: u64 = 0;
        let mut place = Self::SCALE / 10;
        for c in frac_part.chars().take(Self::DECIMALS as usize) {
            frac += (c as u64 - '0' as u64) * place;
            place /= 10;
        }
        int.checked_mul(Self::SCALE)?.checked_add(frac).map(Self)
    }

    /// Multiply two fixed-point values (price × amount) with a widening
    /// intermediate so large fiat totals cannot overflow mid-computation.
    pub fn mul(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint(((self.0 as u128 * rhs.0 as u128) / Self::SCALE as u128) as u64)
    }

    /// Round half-up to `dp` decimal places.
    pub fn round_dp(self, dp: u32) -> FixedPoint {
        let dp = dp.min(Self::DECIMALS);
        let factor = 10u64.pow(Self::DECIMALS - dp);
        FixedPoint((self.0 + factor / 2) / factor * factor)
    }

    /// True when the value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for FixedPoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for FixedPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let int = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        if frac == 0 {
            return write!(f, "{int}");
        }
        let digits = format!("{frac:08}");
        write!(f, "{int}.{}", digits.trim_end_matches('0'))
    }
}
