//! HTTP-specific constants for the crawl-payment exchange.

/// Request header declaring the maximum price the crawler will pay.
pub const MAX_PRICE_HEADER: &str = "crawler-max-price";

/// Request header declaring the exact price the crawler offers.
pub const EXACT_PRICE_HEADER: &str = "crawler-exact-price";

/// Response header naming the configured price on a 402.
pub const PRICE_HEADER: &str = "crawler-price";

/// Response header naming the price charged on an accepted offer.
pub const CHARGED_HEADER: &str = "crawler-charged";

/// Fixed body of a 403 block response.
pub const DENIAL_TEXT: &str = "Access denied";

/// Paths that must always be crawlable regardless of payment policy.
pub const FREE_PATHS: &[&str] = &[
    "/robots.txt",
    "/sitemap.xml",
    "/security.txt",
    "/.well-known/security.txt",
    "/crawlers.json",
];

/// Whether `path` bypasses the gate unconditionally.
#[must_use]
pub fn is_free_path(path: &str) -> bool {
    FREE_PATHS.contains(&path)
}
