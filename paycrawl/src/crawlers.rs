//! Crawler identification from `User-Agent` strings.
//!
//! This module provides the static registry of known AI content crawlers and
//! the matching routine that maps a raw `User-Agent` header to a canonical
//! crawler name.
//!
//! The registry is ordered reference data: matching walks the table in its
//! declared order and returns on the first hit, so table position is a
//! deliberate priority, not an alphabetical accident.

/// A known crawler definition with its canonical name and vendor patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlerSignature {
    /// Canonical crawler name (e.g., "GPTBot")
    pub name: &'static str,
    /// Operating organization (e.g., "OpenAI")
    pub company: &'static str,
    /// Vendor-issued `User-Agent` tokens, matched as literal substrings
    pub patterns: &'static [&'static str],
}

/// Registry of known AI content crawlers, in matching priority order.
///
/// Patterns are vendor-issued tokens and are matched case-sensitively; the
/// exact casing is part of each vendor's published signature.
pub static KNOWN_CRAWLERS: &[CrawlerSignature] = &[
    CrawlerSignature {
        name: "GPTBot",
        company: "OpenAI",
        patterns: &["GPTBot"],
    },
    CrawlerSignature {
        name: "ChatGPT-User",
        company: "OpenAI",
        patterns: &["ChatGPT-User"],
    },
    CrawlerSignature {
        name: "OAI-SearchBot",
        company: "OpenAI",
        patterns: &["OAI-SearchBot"],
    },
    CrawlerSignature {
        name: "ClaudeBot",
        company: "Anthropic",
        patterns: &["ClaudeBot", "Claude-Web"],
    },
    CrawlerSignature {
        name: "Google-Extended",
        company: "Google",
        patterns: &["Google-Extended"],
    },
    CrawlerSignature {
        name: "GoogleOther",
        company: "Google",
        patterns: &["GoogleOther"],
    },
    CrawlerSignature {
        name: "FacebookBot",
        company: "Meta",
        patterns: &["FacebookBot", "meta-externalagent"],
    },
    CrawlerSignature {
        name: "Applebot-Extended",
        company: "Apple",
        patterns: &["Applebot-Extended"],
    },
    CrawlerSignature {
        name: "Amazonbot",
        company: "Amazon",
        patterns: &["Amazonbot"],
    },
    CrawlerSignature {
        name: "PerplexityBot",
        company: "Perplexity",
        patterns: &["PerplexityBot"],
    },
    CrawlerSignature {
        name: "YouBot",
        company: "You.com",
        patterns: &["YouBot"],
    },
    CrawlerSignature {
        name: "cohere-ai",
        company: "Cohere",
        patterns: &["cohere-ai"],
    },
    CrawlerSignature {
        name: "Bytespider",
        company: "ByteDance",
        patterns: &["Bytespider"],
    },
    CrawlerSignature {
        name: "Diffbot",
        company: "Diffbot",
        patterns: &["Diffbot"],
    },
];

/// Maps a raw `User-Agent` value to a canonical crawler name.
///
/// Returns the first registry entry whose pattern occurs as a literal
/// substring of `user_agent`, or `None` for empty input and unrecognized
/// agents (ordinary browsers fall through here).
#[must_use]
pub fn identify(user_agent: &str) -> Option<&'static str> {
    if user_agent.is_empty() {
        return None;
    }
    for crawler in KNOWN_CRAWLERS {
        for pattern in crawler.patterns {
            if user_agent.contains(pattern) {
                return Some(crawler.name);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_exact_token() {
        assert_eq!(identify("GPTBot"), Some("GPTBot"));
    }

    #[test]
    fn test_identify_embedded_token() {
        assert_eq!(
            identify("Mozilla/5.0 AppleWebKit/537.36; compatible; GPTBot/1.0; +https://openai.com/gptbot"),
            Some("GPTBot")
        );
        assert_eq!(
            identify("ClaudeBot/1.0 (+https://anthropic.com/claude-web)"),
            Some("ClaudeBot")
        );
    }

    #[test]
    fn test_identify_alternate_patterns() {
        assert_eq!(identify("Claude-Web/1.0"), Some("ClaudeBot"));
        assert_eq!(identify("meta-externalagent/1.1"), Some("FacebookBot"));
    }

    #[test]
    fn test_identify_is_case_sensitive() {
        assert_eq!(identify("gptbot/1.0"), None);
        assert_eq!(identify("CLAUDEBOT"), None);
    }

    #[test]
    fn test_identify_empty_user_agent() {
        assert_eq!(identify(""), None);
    }

    #[test]
    fn test_identify_browser_user_agent() {
        assert_eq!(
            identify("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 Chrome/124.0 Safari/537.36"),
            None
        );
    }

    #[test]
    fn test_table_order_is_priority() {
        // "GPTBot" sits before "Bytespider"; a UA carrying both tokens
        // resolves to the earlier entry.
        assert_eq!(identify("GPTBot Bytespider"), Some("GPTBot"));
        assert_eq!(identify("Bytespider GPTBot"), Some("GPTBot"));
    }

    #[test]
    fn test_every_registered_pattern_matches_its_crawler() {
        for crawler in KNOWN_CRAWLERS {
            for pattern in crawler.patterns {
                let ua = format!("{pattern}/2.1 (+https://example.com/bot)");
                assert_eq!(identify(&ua), Some(crawler.name), "pattern {pattern}");
            }
        }
    }
}
