//! Per-crawler policy resolution.
//!
//! A deployment supplies an optional JSON configuration document declaring
//! what happens to each recognized crawler: let it through, block it, or
//! charge it a price. This module mirrors that document with serde types and
//! resolves it against a crawler identity into a single [`CrawlerRule`].
//!
//! Resolution never fails. An absent or malformed document, an unknown
//! crawler, a below-floor price — every degenerate input degrades to the
//! charge-by-default policy, favoring monetization over silent pass-through.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::price::Price;

/// What to do with a recognized crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlerAction {
    /// Pass the request through unconditionally.
    Allow,
    /// Demand a payment declaration before forwarding.
    Charge,
    /// Refuse the request with 403.
    Block,
}

/// One per-crawler override in the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Crawler name, matched case-insensitively against the identity.
    pub name: String,
    /// Action applied when this entry matches.
    pub action: CrawlerAction,
    /// Optional price override; meaningful only for [`CrawlerAction::Charge`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// The externally supplied configuration document.
///
/// Prices arrive as raw JSON numbers and are validated into [`Price`] only
/// at resolve time, so one out-of-range price degrades to "no price" rather
/// than invalidating the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    /// Action for crawlers with no matching override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<CrawlerAction>,
    /// Price accompanying the default action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_price: Option<Decimal>,
    /// Ordered per-crawler overrides; first match wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crawlers: Vec<RuleEntry>,
}

impl PolicyDocument {
    /// Parses a raw JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error; callers at the request
    /// path swallow it via [`resolve`].
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolves this document against a crawler identity.
    #[must_use]
    pub fn resolve(&self, identity: &str) -> CrawlerRule {
        if let Some(entry) = self
            .crawlers
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(identity))
        {
            return CrawlerRule {
                name: entry.name.clone(),
                action: entry.action,
                price: entry.price.and_then(Price::from_decimal),
            };
        }
        if let Some(action) = self.default {
            return CrawlerRule {
                name: "default".to_owned(),
                action,
                price: self.default_price.and_then(Price::from_decimal),
            };
        }
        CrawlerRule::charge_by_default(identity)
    }
}

/// The resolved policy for one crawler on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerRule {
    /// Identity label: the matched override's name, `"default"`, or the
    /// crawler identity itself under the hard default.
    pub name: String,
    /// Resolved action.
    pub action: CrawlerAction,
    /// Explicit price; when `None` and the action is charge, the
    /// process-wide default price applies.
    pub price: Option<Price>,
}

impl CrawlerRule {
    /// The hard fallback used when no configuration applies: charge at the
    /// process default price.
    fn charge_by_default(identity: &str) -> Self {
        Self {
            name: identity.to_owned(),
            action: CrawlerAction::Charge,
            price: None,
        }
    }
}

/// Resolves the rule for a crawler identity from an optional raw JSON
/// configuration document.
///
/// Malformed JSON is swallowed here — a broken deployment charges the
/// default price instead of failing the request or waving traffic through.
#[must_use]
pub fn resolve(identity: &str, config: Option<&str>) -> CrawlerRule {
    config
        .and_then(|raw| PolicyDocument::parse(raw).ok())
        .map_or_else(
            || CrawlerRule::charge_by_default(identity),
            |doc| doc.resolve(identity),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_config_charges_by_default() {
        let rule = resolve("GPTBot", None);
        assert_eq!(rule.name, "GPTBot");
        assert_eq!(rule.action, CrawlerAction::Charge);
        assert_eq!(rule.price, None);
    }

    #[test]
    fn test_resolve_malformed_config_charges_by_default() {
        let rule = resolve("GPTBot", Some("{nope"));
        assert_eq!(rule.action, CrawlerAction::Charge);
        assert_eq!(rule.price, None);

        let rule = resolve("GPTBot", Some("[1, 2, 3]"));
        assert_eq!(rule.action, CrawlerAction::Charge);
    }

    #[test]
    fn test_resolve_override_match_is_case_insensitive() {
        let config = r#"{"crawlers":[{"name":"claudebot","action":"block"}]}"#;
        let rule = resolve("ClaudeBot", Some(config));
        assert_eq!(rule.name, "claudebot");
        assert_eq!(rule.action, CrawlerAction::Block);
    }

    #[test]
    fn test_resolve_first_override_wins() {
        let config = r#"{"crawlers":[
            {"name":"GPTBot","action":"allow"},
            {"name":"gptbot","action":"block"}
        ]}"#;
        let rule = resolve("GPTBot", Some(config));
        assert_eq!(rule.action, CrawlerAction::Allow);
    }

    #[test]
    fn test_resolve_override_price() {
        let config = r#"{"crawlers":[{"name":"GPTBot","action":"charge","price":0.05}]}"#;
        let rule = resolve("GPTBot", Some(config));
        assert_eq!(rule.action, CrawlerAction::Charge);
        assert_eq!(rule.price, Some("USD 0.05".parse().unwrap()));
    }

    #[test]
    fn test_resolve_below_floor_price_is_absent() {
        let config = r#"{"crawlers":[{"name":"GPTBot","action":"charge","price":0.0001}]}"#;
        let rule = resolve("GPTBot", Some(config));
        assert_eq!(rule.action, CrawlerAction::Charge);
        assert_eq!(rule.price, None);
    }

    #[test]
    fn test_resolve_document_default() {
        let config = r#"{"default":"allow"}"#;
        let rule = resolve("PerplexityBot", Some(config));
        assert_eq!(rule.name, "default");
        assert_eq!(rule.action, CrawlerAction::Allow);
        assert_eq!(rule.price, None);
    }

    #[test]
    fn test_resolve_document_default_with_price() {
        let config = r#"{"default":"charge","defaultPrice":0.02}"#;
        let rule = resolve("PerplexityBot", Some(config));
        assert_eq!(rule.name, "default");
        assert_eq!(rule.action, CrawlerAction::Charge);
        assert_eq!(rule.price, Some("USD 0.02".parse().unwrap()));
    }

    #[test]
    fn test_resolve_override_shadows_document_default() {
        let config = r#"{"default":"block","crawlers":[{"name":"YouBot","action":"allow"}]}"#;
        let rule = resolve("YouBot", Some(config));
        assert_eq!(rule.action, CrawlerAction::Allow);
    }

    #[test]
    fn test_resolve_empty_document_charges_by_default() {
        let rule = resolve("Amazonbot", Some("{}"));
        assert_eq!(rule.name, "Amazonbot");
        assert_eq!(rule.action, CrawlerAction::Charge);
    }

    #[test]
    fn test_action_serde_lowercase() {
        assert_eq!(
            serde_json::from_str::<CrawlerAction>("\"allow\"").unwrap(),
            CrawlerAction::Allow
        );
        assert_eq!(
            serde_json::to_string(&CrawlerAction::Block).unwrap(),
            "\"block\""
        );
    }
}
