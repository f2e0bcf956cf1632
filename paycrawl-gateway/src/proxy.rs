//! Reverse proxy forwarding gated requests to the origin site.
//!
//! The forward is a single awaited call: the inbound method, path, query,
//! headers, and body are relayed to the origin base URL, and the origin's
//! status, headers, and body are relayed back verbatim. The crawl gate
//! wraps this handler, so anything that reaches it has already cleared the
//! payment policy.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use http::HeaderMap;
use http::header::{CONNECTION, HOST, TRANSFER_ENCODING};
use reqwest::Client;
use url::Url;

use crate::error::GatewayError;

/// Shared state for the proxy handler.
#[derive(Debug, Clone)]
pub struct ProxyState {
    /// Shared reqwest HTTP client
    client: Client,
    /// Base URL of the origin, when configured
    origin: Option<Url>,
}

impl ProxyState {
    /// Creates proxy state targeting the given origin.
    #[must_use]
    pub fn new(origin: Option<Url>) -> Self {
        Self {
            client: Client::new(),
            origin,
        }
    }
}

/// Relays a request to the origin and the origin's response back.
///
/// # Errors
///
/// Returns [`GatewayError::NoOrigin`] (404) when no origin is configured
/// and [`GatewayError::Upstream`] (502) when the origin is unreachable.
pub async fn forward(
    State(state): State<ProxyState>,
    req: Request,
) -> Result<Response, GatewayError> {
    let origin = state.origin.as_ref().ok_or(GatewayError::NoOrigin)?;

    let mut url = origin.clone();
    url.set_path(req.uri().path());
    url.set_query(req.uri().query());

    let (parts, body) = req.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await?;

    let mut headers = parts.headers;
    strip_connection_headers(&mut headers);

    let upstream = state
        .client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_connection_headers(&mut headers);
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Drops hop-by-hop headers that must not cross the proxy boundary.
fn strip_connection_headers(headers: &mut HeaderMap) {
    headers.remove(HOST);
    headers.remove(CONNECTION);
    headers.remove(TRANSFER_ENCODING);
}
