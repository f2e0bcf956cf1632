//! Fixed-point USD prices for the crawl-payment exchange.
//!
//! Prices travel in HTTP headers as `"<CUR> <amount>"` text (e.g.
//! `USD 0.01`) and in configuration documents as JSON numbers. Both paths
//! converge on [`Price`], a fixed-point value rounded to 4 decimal places,
//! so every downstream equality and ordering comparison operates on the
//! rounded representation rather than on raw floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// The single supported currency code.
pub const CURRENCY: &str = "USD";

/// Decimal places a price is rounded to after parsing.
const PRICE_SCALE: u32 = 4;

/// Smallest chargeable amount; anything below is treated as absent.
fn price_floor() -> Decimal {
    Decimal::new(1, 3) // 0.001
}

/// A non-negative USD amount with 4-decimal-place resolution.
///
/// Invariants: the wrapped amount is at least the 0.001 floor and is already
/// rounded to 4 decimal places (half away from zero). Two textually
/// different offers that round identically compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// Validates a raw decimal into a price.
    ///
    /// Returns `None` when `amount` is below the floor — the caller treats
    /// that the same as no price at all. This is the path by which
    /// configuration numbers become prices.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        if amount < price_floor() {
            return None;
        }
        Some(Self(amount.round_dp_with_strategy(
            PRICE_SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    /// Returns the rounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this offered price satisfies a configured price.
    ///
    /// True iff `self >= configured`. Used for maximum-offer declarations;
    /// exact-offer declarations compare with `==` instead.
    #[must_use]
    pub fn is_acceptable(self, configured: Self) -> bool {
        self.0 >= configured.0
    }
}

/// The process-wide fallback price: USD 0.01.
impl Default for Price {
    fn default() -> Self {
        Self(Decimal::new(1, 2))
    }
}

/// Error returned when parsing an invalid price declaration.
///
/// A valid declaration is exactly two whitespace-separated tokens: the
/// currency code `USD` (any casing) and a decimal amount at or above the
/// 0.001 floor.
#[derive(Debug, thiserror::Error)]
#[error("Invalid price declaration {0:?}")]
pub struct PriceFormatError(String);

impl FromStr for Price {
    type Err = PriceFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(currency), Some(amount), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(PriceFormatError(s.into()));
        };
        if !currency.eq_ignore_ascii_case(CURRENCY) {
            return Err(PriceFormatError(s.into()));
        }
        let amount: Decimal = amount.parse().map_err(|_| PriceFormatError(s.into()))?;
        Self::from_decimal(amount).ok_or_else(|| PriceFormatError(s.into()))
    }
}

impl fmt::Display for Price {
    /// Renders `"USD <amount>"` with trailing zeros stripped, such that
    /// `format(p).parse() == p` for every valid price.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY} {}", self.0.normalize())
    }
}
