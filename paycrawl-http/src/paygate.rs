//! Core gate logic applying a resolved crawler rule to one request.
//!
//! The [`Paygate`] struct handles the tail of the decision pipeline:
//! applying the resolved action and, for charged crawlers, negotiating
//! payment via the request's declaration headers before forwarding to the
//! wrapped service or synthesizing a 402/403 response.

use std::convert::Infallible;

use axum_core::body::Body;
use axum_core::extract::Request;
use axum_core::response::Response;
use http::StatusCode;
use paycrawl::{CrawlerAction, CrawlerRule, Price};
use tower::Service;

use crate::constants::{CHARGED_HEADER, DENIAL_TEXT, PRICE_HEADER};
use crate::headers;

/// Applies one resolved [`CrawlerRule`] to one request.
///
/// Per-request state machine with no state carried across requests. Every
/// outcome is terminal: pass-through (with the charged-price header
/// injected on accepted payment), 402, or 403.
#[derive(Debug, Clone)]
pub struct Paygate {
    /// The policy resolved for this crawler
    pub rule: CrawlerRule,
    /// Process-wide price charged when the rule has none
    pub default_price: Price,
}

impl Paygate {
    /// The price this crawler must satisfy: the rule's explicit price, else
    /// the process-wide default.
    #[must_use]
    pub fn configured_price(&self) -> Price {
        self.rule.price.unwrap_or(self.default_price)
    }

    /// Handles an incoming request according to the resolved rule.
    ///
    /// # Errors
    ///
    /// This method is infallible (`Infallible` error type).
    pub async fn handle_request<S>(self, inner: S, req: Request) -> Result<Response, Infallible>
    where
        S: Service<Request, Response = Response, Error = Infallible> + Send,
        S::Future: Send,
    {
        match self.rule.action {
            CrawlerAction::Allow => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(rule = %self.rule.name, "Crawler allowed");
                call_inner(inner, req).await
            }
            CrawlerAction::Block => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(rule = %self.rule.name, "Crawler blocked");
                Ok(access_denied())
            }
            CrawlerAction::Charge => self.negotiate(inner, req).await,
        }
    }

    /// Runs price negotiation for a charged crawler.
    async fn negotiate<S>(self, inner: S, req: Request) -> Result<Response, Infallible>
    where
        S: Service<Request, Response = Response, Error = Infallible> + Send,
        S::Future: Send,
    {
        let price = self.configured_price();
        let offer = headers::payment_offer(req.headers());

        if offer.satisfies(price) {
            #[cfg(feature = "telemetry")]
            tracing::debug!(rule = %self.rule.name, price = %price, "Payment accepted");
            let response = call_inner(inner, req).await?;
            Ok(charged(response, price))
        } else {
            #[cfg(feature = "telemetry")]
            tracing::debug!(rule = %self.rule.name, price = %price, "Payment required");
            Ok(payment_required(price))
        }
    }
}

/// Calls the wrapped service.
async fn call_inner<S>(mut inner: S, req: Request) -> Result<Response, Infallible>
where
    S: Service<Request, Response = Response, Error = Infallible>,
{
    inner.call(req).await
}

/// Synthesizes the empty-bodied 402 naming the configured price.
fn payment_required(price: Price) -> Response {
    Response::builder()
        .status(StatusCode::PAYMENT_REQUIRED)
        .header(PRICE_HEADER, headers::price_header_value(price))
        .body(Body::empty())
        .expect("Fail to construct response")
}

/// Synthesizes the fixed 403 denial. Carries no payment headers.
fn access_denied() -> Response {
    Response::builder()
        .status(StatusCode::FORBIDDEN)
        .body(Body::from(DENIAL_TEXT))
        .expect("Fail to construct response")
}

/// Stamps the charged price onto a forwarded response, leaving every other
/// origin header untouched.
fn charged(mut response: Response, price: Price) -> Response {
    response
        .headers_mut()
        .insert(CHARGED_HEADER, headers::price_header_value(price));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_required_shape() {
        let response = payment_required(Price::default());
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            response.headers().get(PRICE_HEADER).unwrap(),
            &"USD 0.01".parse::<http::HeaderValue>().unwrap()
        );
        assert!(response.headers().get(CHARGED_HEADER).is_none());
    }

    #[test]
    fn test_access_denied_carries_no_payment_headers() {
        let response = access_denied();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(PRICE_HEADER).is_none());
        assert!(response.headers().get(CHARGED_HEADER).is_none());
    }

    #[test]
    fn test_configured_price_prefers_rule_price() {
        let rule = CrawlerRule {
            name: "GPTBot".to_owned(),
            action: CrawlerAction::Charge,
            price: Some("USD 0.05".parse().unwrap()),
        };
        let gate = Paygate {
            rule,
            default_price: Price::default(),
        };
        assert_eq!(gate.configured_price(), "USD 0.05".parse().unwrap());
    }

    #[test]
    fn test_configured_price_falls_back_to_default() {
        let rule = CrawlerRule {
            name: "GPTBot".to_owned(),
            action: CrawlerAction::Charge,
            price: None,
        };
        let gate = Paygate {
            rule,
            default_price: "USD 0.02".parse().unwrap(),
        };
        assert_eq!(gate.configured_price(), "USD 0.02".parse().unwrap());
    }
}
