//! Gateway configuration.
//!
//! All values come from the process environment; there is no configuration
//! file. The policy document itself (`CRAWLER_RULES`) is deliberately *not*
//! captured here — the middleware re-reads it on every request so rule
//! changes apply without a restart.
//!
//! # Environment Variables
//!
//! - `HOST` — Bind address (default: `0.0.0.0`)
//! - `PORT` — Bind port (default: `8402`)
//! - `ORIGIN_URL` — Base URL of the origin site proxied behind the gate
//! - `CRAWLER_RULES` — JSON policy document, read fresh per request
//! - `DEFAULT_PRICE` — Decimal price charged when a rule has none
//!   (default: `0.01`; unparseable values fall back to the default)
//! - `RUST_LOG` — Log level filter (default: `info`)

use std::net::IpAddr;

use paycrawl::Price;
use rust_decimal::Decimal;
use url::Url;

/// Environment variable holding the JSON policy document.
pub const CRAWLER_RULES_VAR: &str = "CRAWLER_RULES";

/// Top-level gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server bind address (default: `0.0.0.0`).
    pub host: IpAddr,

    /// Server port (default: `8402`).
    pub port: u16,

    /// Base URL of the proxied origin. When absent the gateway still serves
    /// the demo surface, and proxied paths answer 404.
    pub origin_url: Option<Url>,

    /// Process-wide price charged when a rule carries no explicit price.
    pub default_price: Price,
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
}

fn default_port() -> u16 {
    8402
}

impl GatewayConfig {
    /// Loads configuration from the process environment.
    ///
    /// `HOST`, `PORT`, and `DEFAULT_PRICE` are lenient — unset or
    /// unparseable values fall back to their defaults. `ORIGIN_URL` is
    /// strict: a set-but-invalid URL is an operator error worth failing
    /// startup over.
    ///
    /// # Errors
    ///
    /// Returns an error if `ORIGIN_URL` is set but not a valid URL.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let host = std::env::var("HOST")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(default_host);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(default_port);

        let origin_url = match std::env::var("ORIGIN_URL") {
            Ok(raw) => Some(
                Url::parse(&raw).map_err(|e| format!("Invalid ORIGIN_URL {raw:?}: {e}"))?,
            ),
            Err(_) => None,
        };

        let default_price = default_price_from(std::env::var("DEFAULT_PRICE").ok().as_deref());

        Ok(Self {
            host,
            port,
            origin_url,
            default_price,
        })
    }
}

/// Parses the `DEFAULT_PRICE` value, falling back to `USD 0.01` when the
/// value is absent, unparseable, or below the price floor.
fn default_price_from(value: Option<&str>) -> Price {
    value
        .and_then(|raw| raw.trim().parse::<Decimal>().ok())
        .and_then(Price::from_decimal)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_price_parses_decimal_string() {
        assert_eq!(
            default_price_from(Some("0.05")),
            "USD 0.05".parse().unwrap()
        );
    }

    #[test]
    fn test_default_price_falls_back_when_absent() {
        assert_eq!(default_price_from(None), Price::default());
    }

    #[test]
    fn test_default_price_falls_back_when_unparseable() {
        assert_eq!(default_price_from(Some("not-a-number")), Price::default());
        assert_eq!(default_price_from(Some("")), Price::default());
    }

    #[test]
    fn test_default_price_falls_back_below_floor() {
        assert_eq!(default_price_from(Some("0.0001")), Price::default());
    }
}
