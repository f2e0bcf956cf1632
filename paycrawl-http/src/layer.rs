//! Tower middleware gating recognized crawlers behind the payment exchange.
//!
//! Wrap the service that forwards to your origin with a [`CrawlGateLayer`]:
//! requests for always-crawlable paths and requests from unrecognized
//! agents pass straight through; recognized crawlers are resolved against
//! the configuration document and handled by the [`Paygate`].
//!
//! ## Configuration Notes
//!
//! - **[`CrawlGateLayer::with_policy`]** sets the per-request configuration
//!   source (environment-backed in the gateway binary).
//! - **[`CrawlGateLayer::with_default_price`]** sets the process-wide price
//!   charged when a rule carries none (default: `USD 0.01`).

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum_core::extract::Request;
use axum_core::response::Response;
use http::header::USER_AGENT;
use paycrawl::Price;
use tower::util::BoxCloneSyncService;
use tower::{Layer, Service};

use crate::constants::is_free_path;
use crate::paygate::Paygate;
use crate::policy::{PolicySource, StaticPolicy};

/// Layer enforcing the pay-per-crawl policy on a wrapped service.
#[derive(Debug, Clone)]
pub struct CrawlGateLayer<TPolicy> {
    policy: TPolicy,
    default_price: Price,
}

impl CrawlGateLayer<StaticPolicy> {
    /// Creates a gate with no configuration document and the stock default
    /// price — every recognized crawler is charged `USD 0.01`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: StaticPolicy::default(),
            default_price: Price::default(),
        }
    }
}

impl Default for CrawlGateLayer<StaticPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TPolicy> CrawlGateLayer<TPolicy> {
    /// Sets the process-wide default price charged when a rule has none.
    #[must_use]
    pub fn with_default_price(mut self, price: Price) -> Self {
        self.default_price = price;
        self
    }

    /// Sets the configuration source consulted on each request.
    #[must_use]
    pub fn with_policy<P: PolicySource>(self, policy: P) -> CrawlGateLayer<P> {
        CrawlGateLayer {
            policy,
            default_price: self.default_price,
        }
    }
}

impl<S, TPolicy> Layer<S> for CrawlGateLayer<TPolicy>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
    S::Future: Send + 'static,
    TPolicy: PolicySource,
{
    type Service = CrawlGateService<TPolicy>;

    fn layer(&self, inner: S) -> Self::Service {
        CrawlGateService {
            policy: self.policy.clone(),
            default_price: self.default_price,
            inner: BoxCloneSyncService::new(inner),
        }
    }
}

/// Service that enforces the pay-per-crawl policy on incoming requests.
#[derive(Clone)]
#[allow(missing_debug_implementations)] // BoxCloneSyncService does not implement Debug
pub struct CrawlGateService<TPolicy> {
    /// Per-request configuration source
    policy: TPolicy,
    /// Price charged when a rule has none
    default_price: Price,
    /// The wrapped service being gated
    inner: BoxCloneSyncService<Request, Response, Infallible>,
}

impl<TPolicy> Service<Request> for CrawlGateService<TPolicy>
where
    TPolicy: PolicySource,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    /// Delegates readiness polling to the wrapped inner service.
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    /// Intercepts the request and applies the decision pipeline.
    fn call(&mut self, req: Request) -> Self::Future {
        let policy = self.policy.clone();
        let default_price = self.default_price;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Well-known discovery paths stay crawlable under any policy.
            if is_free_path(req.uri().path()) {
                return inner.call(req).await;
            }

            let user_agent = req
                .headers()
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            let Some(identity) = paycrawl::identify(user_agent) else {
                // Only recognized crawlers are gated.
                return inner.call(req).await;
            };

            #[cfg(feature = "telemetry")]
            tracing::info!(crawler = %identity, path = %req.uri().path(), "Recognized crawler");

            // Loaded fresh per request so rule changes apply immediately.
            let config = policy.load();
            let rule = paycrawl::resolve(identity, config.as_deref());

            let gate = Paygate {
                rule,
                default_price,
            };
            gate.handle_request(inner, req).await
        })
    }
}
