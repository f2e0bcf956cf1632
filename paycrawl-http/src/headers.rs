//! Payment-declaration extraction and response header construction.
//!
//! A crawler declares willingness to pay through one of two request
//! headers: `crawler-max-price` ("I will pay up to X") or
//! `crawler-exact-price` ("I offer exactly X"). At most one declaration is
//! consulted per request; when both headers are present the maximum-offer
//! header wins and the exact-offer header is never read.

use http::{HeaderMap, HeaderValue};
use paycrawl::Price;

use crate::constants::{EXACT_PRICE_HEADER, MAX_PRICE_HEADER};

/// The payment declaration extracted from one request.
///
/// An inner `None` means the header was present but did not parse as a
/// valid price — indistinguishable from an insufficient offer downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOffer {
    /// `crawler-max-price` declaration.
    Max(Option<Price>),
    /// `crawler-exact-price` declaration.
    Exact(Option<Price>),
    /// Neither payment header was sent.
    None,
}

impl PaymentOffer {
    /// Whether this declaration satisfies the configured price.
    ///
    /// Maximum offers satisfy any configured price at or below them; exact
    /// offers must equal the configured price precisely — there is no
    /// over-payment tolerance beyond the rounding performed at parse time.
    #[must_use]
    pub fn satisfies(&self, configured: Price) -> bool {
        match self {
            Self::Max(Some(offered)) => offered.is_acceptable(configured),
            Self::Exact(Some(offered)) => *offered == configured,
            _ => false,
        }
    }
}

/// Extracts the payment declaration from the request headers.
#[must_use]
pub fn payment_offer(headers: &HeaderMap) -> PaymentOffer {
    if let Some(value) = headers.get(MAX_PRICE_HEADER) {
        return PaymentOffer::Max(parse_price(value));
    }
    if let Some(value) = headers.get(EXACT_PRICE_HEADER) {
        return PaymentOffer::Exact(parse_price(value));
    }
    PaymentOffer::None
}

fn parse_price(value: &HeaderValue) -> Option<Price> {
    value.to_str().ok()?.parse().ok()
}

/// Converts a price into a response header value.
///
/// # Panics
///
/// Cannot panic in practice: formatted prices are always ASCII.
#[must_use]
pub fn price_header_value(price: Price) -> HeaderValue {
    HeaderValue::from_str(&price.to_string()).expect("Failed to create header value")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Price {
        format!("USD {s}").parse().unwrap()
    }

    #[test]
    fn test_payment_offer_absent() {
        assert_eq!(payment_offer(&HeaderMap::new()), PaymentOffer::None);
    }

    #[test]
    fn test_payment_offer_max() {
        let mut headers = HeaderMap::new();
        headers.insert(MAX_PRICE_HEADER, HeaderValue::from_static("USD 0.05"));
        assert_eq!(payment_offer(&headers), PaymentOffer::Max(Some(usd("0.05"))));
    }

    #[test]
    fn test_payment_offer_exact() {
        let mut headers = HeaderMap::new();
        headers.insert(EXACT_PRICE_HEADER, HeaderValue::from_static("USD 0.01"));
        assert_eq!(
            payment_offer(&headers),
            PaymentOffer::Exact(Some(usd("0.01")))
        );
    }

    #[test]
    fn test_payment_offer_malformed_is_present_but_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(MAX_PRICE_HEADER, HeaderValue::from_static("EUR 5"));
        assert_eq!(payment_offer(&headers), PaymentOffer::Max(None));
    }

    #[test]
    fn test_max_offer_takes_precedence_over_exact() {
        let mut headers = HeaderMap::new();
        headers.insert(MAX_PRICE_HEADER, HeaderValue::from_static("bogus"));
        headers.insert(EXACT_PRICE_HEADER, HeaderValue::from_static("USD 0.01"));
        // The exact header would have parsed, but the max header shadows it.
        assert_eq!(payment_offer(&headers), PaymentOffer::Max(None));
    }

    #[test]
    fn test_satisfies_max_at_or_above() {
        assert!(PaymentOffer::Max(Some(usd("0.02"))).satisfies(usd("0.01")));
        assert!(PaymentOffer::Max(Some(usd("0.01"))).satisfies(usd("0.01")));
        assert!(!PaymentOffer::Max(Some(usd("0.005"))).satisfies(usd("0.01")));
    }

    #[test]
    fn test_satisfies_exact_equality_only() {
        assert!(PaymentOffer::Exact(Some(usd("0.01"))).satisfies(usd("0.01")));
        assert!(!PaymentOffer::Exact(Some(usd("0.02"))).satisfies(usd("0.01")));
    }

    #[test]
    fn test_satisfies_invalid_or_absent_never() {
        assert!(!PaymentOffer::Max(None).satisfies(usd("0.01")));
        assert!(!PaymentOffer::Exact(None).satisfies(usd("0.01")));
        assert!(!PaymentOffer::None.satisfies(usd("0.01")));
    }

    #[test]
    fn test_price_header_value_round_trips() {
        let value = price_header_value(usd("0.0100"));
        assert_eq!(value.to_str().unwrap(), "USD 0.01");
    }
}
