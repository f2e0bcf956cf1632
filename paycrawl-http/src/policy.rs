//! Per-request configuration sources for the crawl gate.
//!
//! The configuration document is read fresh on every request — there is no
//! caching layer, so an operator can rotate rules without restarting the
//! gateway. Sources are infallible: absence is an ordinary outcome and the
//! resolver downstream treats it as the charge-by-default policy.

use std::sync::Arc;

/// Supplies the raw JSON configuration document for one request.
pub trait PolicySource: Clone + Send + Sync + 'static {
    /// Returns the raw document, or `None` when no configuration exists.
    fn load(&self) -> Option<String>;
}

/// Reads the document from a process environment variable on each request.
#[derive(Debug, Clone)]
pub struct EnvPolicy {
    var: String,
}

impl EnvPolicy {
    /// Creates a source reading the given environment variable.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl PolicySource for EnvPolicy {
    fn load(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// Serves a fixed document. Used by tests and by embedders whose policy
/// is known at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicy {
    raw: Option<Arc<str>>,
}

impl StaticPolicy {
    /// Creates a source serving the given document verbatim.
    #[must_use]
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl PolicySource for StaticPolicy {
    fn load(&self) -> Option<String> {
        self.raw.as_deref().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_policy_serves_document() {
        let source = StaticPolicy::new(r#"{"default":"allow"}"#);
        assert_eq!(source.load().as_deref(), Some(r#"{"default":"allow"}"#));
    }

    #[test]
    fn test_static_policy_default_is_absent() {
        assert_eq!(StaticPolicy::default().load(), None);
    }

    #[test]
    fn test_env_policy_missing_variable_is_absent() {
        let source = EnvPolicy::new("PAYCRAWL_TEST_UNSET_VARIABLE");
        assert_eq!(source.load(), None);
    }
}
