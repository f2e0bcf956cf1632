//! Demo surface exercising the decision engine.
//!
//! `GET /` serves a self-contained page where a visitor picks a canned
//! User-Agent and a payment action; the page calls `GET /api/test`, which
//! runs the real identification and negotiation primitives against a fixed
//! demo price and returns the simulated protocol exchange as JSON. Nothing
//! here touches the origin.

use std::collections::BTreeMap;

use axum::extract::Query;
use axum::response::Html;
use axum::{Json, Router};
use paycrawl::Price;
use paycrawl_http::constants::{
    CHARGED_HEADER, EXACT_PRICE_HEADER, MAX_PRICE_HEADER, PRICE_HEADER,
};
use paycrawl_http::headers::PaymentOffer;
use serde::{Deserialize, Serialize};

/// Canned User-Agents selectable on the demo page, keyed by display name.
/// The first entry is the fallback for unknown keys.
const DEMO_AGENTS: &[(&str, &str)] = &[
    (
        "Human",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 Chrome/124.0 Safari/537.36",
    ),
    ("GPTBot", "GPTBot/1.0 (+https://openai.com/gptbot)"),
    ("ClaudeBot", "ClaudeBot/1.0 (+https://anthropic.com/claude-web)"),
    ("Google-Extended", "Google-Extended/1.0"),
    (
        "FacebookBot",
        "FacebookBot/1.0 (+https://www.facebook.com/externalhit_uatext.php)",
    ),
    (
        "Bytespider",
        "Bytespider/1.0 (+https://zhanzhang.toutiao.com/crawler_en)",
    ),
    (
        "PerplexityBot",
        "PerplexityBot/1.0 (+https://www.perplexity.ai/perplexitybot)",
    ),
    (
        "Amazonbot",
        "Amazonbot/0.1 (+https://developer.amazon.com/support/amazonbot)",
    ),
];

/// Payment action selected on the demo page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoAction {
    /// Send no payment header.
    #[default]
    None,
    /// Send a `crawler-max-price` declaration at the demo price.
    MaxPrice,
    /// Send a `crawler-exact-price` declaration at the demo price.
    ExactPrice,
}

/// Query parameters of `GET /api/test`.
#[derive(Debug, Deserialize)]
pub struct TestParams {
    /// Display name from [`DEMO_AGENTS`]; unknown keys fall back to Human.
    #[serde(default)]
    crawler: Option<String>,
    /// Payment action to simulate.
    #[serde(default)]
    action: DemoAction,
}

/// One simulated protocol exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Headers the simulated crawler sent.
    pub request_headers: BTreeMap<String, String>,
    /// Response status code.
    pub status: u16,
    /// Response status text.
    pub status_text: String,
    /// Headers the gateway answered with.
    pub response_headers: BTreeMap<String, String>,
    /// Human-readable explanation of the outcome.
    pub note: String,
}

/// Runs the decision primitives for one simulated request.
fn simulate(user_agent: &str, action: DemoAction) -> TestResult {
    let price = Price::default();

    let mut request_headers = BTreeMap::new();
    request_headers.insert("User-Agent".to_owned(), user_agent.to_owned());
    match action {
        DemoAction::MaxPrice => {
            request_headers.insert(MAX_PRICE_HEADER.to_owned(), price.to_string());
        }
        DemoAction::ExactPrice => {
            request_headers.insert(EXACT_PRICE_HEADER.to_owned(), price.to_string());
        }
        DemoAction::None => {}
    }

    if paycrawl::identify(user_agent).is_none() {
        return TestResult {
            request_headers,
            status: 200,
            status_text: "OK".to_owned(),
            response_headers: BTreeMap::from([(
                "content-type".to_owned(),
                "text/html".to_owned(),
            )]),
            note: "Not a known AI crawler. Passes through freely.".to_owned(),
        };
    }

    // Round-trip the headers we just wrote through the real parser, the
    // same way the gate reads them off the wire.
    let offer = match action {
        DemoAction::None => PaymentOffer::None,
        DemoAction::MaxPrice => PaymentOffer::Max(
            request_headers
                .get(MAX_PRICE_HEADER)
                .and_then(|value| value.parse().ok()),
        ),
        DemoAction::ExactPrice => PaymentOffer::Exact(
            request_headers
                .get(EXACT_PRICE_HEADER)
                .and_then(|value| value.parse().ok()),
        ),
    };

    if offer.satisfies(price) {
        let note = match action {
            DemoAction::MaxPrice => {
                format!("Payment accepted. Offered {price}, price is {price}. Access granted.")
            }
            _ => format!("Exact price matched ({price}). Access granted."),
        };
        return TestResult {
            request_headers,
            status: 200,
            status_text: "OK".to_owned(),
            response_headers: BTreeMap::from([
                (CHARGED_HEADER.to_owned(), price.to_string()),
                ("content-type".to_owned(), "text/html".to_owned()),
            ]),
            note,
        };
    }

    TestResult {
        request_headers,
        status: 402,
        status_text: "Payment Required".to_owned(),
        response_headers: BTreeMap::from([(PRICE_HEADER.to_owned(), price.to_string())]),
        note: if action == DemoAction::None {
            "No payment header sent. Access denied.".to_owned()
        } else {
            "Payment header present but insufficient or invalid.".to_owned()
        },
    }
}

/// Resolves a demo key to its canned User-Agent.
fn demo_user_agent(key: &str) -> &'static str {
    DEMO_AGENTS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEMO_AGENTS[0].1, |(_, ua)| ua)
}

/// `GET /api/test` — simulates one protocol exchange.
pub async fn api_test(Query(params): Query<TestParams>) -> Json<TestResult> {
    let user_agent = demo_user_agent(params.crawler.as_deref().unwrap_or("Human"));
    Json(simulate(user_agent, params.action))
}

/// `GET /` — the demo page.
pub async fn demo_page() -> Html<&'static str> {
    Html(DEMO_PAGE)
}

/// Creates a router with the demo endpoints.
pub fn demo_router() -> Router {
    Router::new()
        .route("/", axum::routing::get(demo_page))
        .route("/api/test", axum::routing::get(api_test))
}

const DEMO_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pay Per Crawl Gateway — Live Demo</title>
  <style>
    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    :root {
      --bg: #0A0F1C; --surface: #1E293B; --inset: #0F172A; --border: #334155;
      --cyan: #22D3EE; --green: #4ADE80; --red: #F87171;
      --text: #E2E8F0; --muted: #94A3B8; --dim: #64748B;
      --mono: ui-monospace, 'JetBrains Mono', monospace;
    }
    body {
      background: var(--bg); color: var(--text);
      font-family: system-ui, sans-serif;
      display: flex; flex-direction: column; align-items: center;
      min-height: 100vh;
    }
    .container { width: 100%; max-width: 880px; padding: 56px 24px 80px;
      display: flex; flex-direction: column; gap: 40px; }
    h1 { font-family: var(--mono); font-size: 2rem; }
    h1 em { color: var(--cyan); font-style: normal; }
    .subtitle { color: var(--muted); max-width: 600px; line-height: 1.6; }
    .label { font-family: var(--mono); font-size: 11px; text-transform: uppercase;
      letter-spacing: .1em; color: var(--dim); margin-bottom: 12px; }
    .btn-row { display: flex; flex-wrap: wrap; gap: 8px; }
    button {
      font-family: var(--mono); font-size: 12px; font-weight: 600;
      padding: 8px 16px; border-radius: 8px; border: 1px solid var(--border);
      background: var(--surface); color: var(--muted); cursor: pointer;
    }
    button:hover { border-color: var(--cyan); color: var(--text); }
    button.active { border-color: var(--cyan); color: var(--cyan); }
    .terminal-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
    @media (max-width: 640px) { .terminal-grid { grid-template-columns: 1fr; } }
    .terminal { background: var(--inset); border: 1px solid var(--border);
      border-radius: 8px; padding: 18px 16px; font-family: var(--mono);
      font-size: 13px; line-height: 1.8; min-height: 130px; }
    .t-title { font-size: 11px; text-transform: uppercase; color: var(--dim);
      margin-bottom: 10px; }
    .t-key { color: var(--cyan); }
    .t-status-200 { color: var(--green); font-weight: 700; }
    .t-status-402 { color: var(--red); font-weight: 700; }
    .t-note { margin-top: 14px; padding-top: 14px; border-top: 1px solid var(--border);
      color: var(--dim); font-size: 12px; }
    .t-empty { color: var(--border); }
  </style>
</head>
<body>
  <div class="container">
    <header>
      <h1>Pay Per Crawl <em>Gateway</em></h1>
      <p class="subtitle">
        An edge gateway that intercepts AI crawler requests and responds with
        HTTP 402 unless a valid payment header is sent. Pick a visitor and a
        payment action to see the protocol in action.
      </p>
    </header>
    <section>
      <p class="label">1 — Select visitor</p>
      <div class="btn-row" id="crawler-row"></div>
    </section>
    <section>
      <p class="label">2 — Payment header</p>
      <div class="btn-row" id="action-row">
        <button class="active" data-action="none">No payment header</button>
        <button data-action="max-price">crawler-max-price: USD 0.01</button>
        <button data-action="exact-price">crawler-exact-price: USD 0.01</button>
      </div>
    </section>
    <section>
      <p class="label">3 — Protocol exchange</p>
      <div class="terminal-grid">
        <div class="terminal"><div class="t-title">Request</div>
          <div id="req-block"><span class="t-empty">select a visitor above</span></div></div>
        <div class="terminal"><div class="t-title">Response</div>
          <div id="res-block"><span class="t-empty">select a visitor above</span></div></div>
      </div>
    </section>
  </div>
  <script>
    const CRAWLERS = ['Human', 'GPTBot', 'ClaudeBot', 'Google-Extended',
      'FacebookBot', 'Bytespider', 'PerplexityBot', 'Amazonbot'];
    let crawler = null;
    let action = 'none';

    const crawlerRow = document.getElementById('crawler-row');
    const reqBlock = document.getElementById('req-block');
    const resBlock = document.getElementById('res-block');

    for (const name of CRAWLERS) {
      const btn = document.createElement('button');
      btn.dataset.crawler = name;
      btn.textContent = name;
      crawlerRow.appendChild(btn);
    }

    crawlerRow.addEventListener('click', e => {
      const btn = e.target.closest('button');
      if (!btn) return;
      crawlerRow.querySelectorAll('button').forEach(b => b.classList.remove('active'));
      btn.classList.add('active');
      crawler = btn.dataset.crawler;
      run();
    });

    document.getElementById('action-row').addEventListener('click', e => {
      const btn = e.target.closest('button');
      if (!btn) return;
      document.querySelectorAll('#action-row button').forEach(b => b.classList.remove('active'));
      btn.classList.add('active');
      action = btn.dataset.action;
      if (crawler) run();
    });

    async function run() {
      try {
        const url = new URL('/api/test', location.origin);
        url.searchParams.set('crawler', crawler);
        url.searchParams.set('action', action);
        const res = await fetch(url);
        render(await res.json());
      } catch {
        reqBlock.innerHTML = resBlock.innerHTML =
          '<span style="color:var(--red)">Network error</span>';
      }
    }

    function headers(obj) {
      return Object.entries(obj).map(([k, v]) =>
        `<div><span class="t-key">${esc(k)}</span>: ${esc(v)}</div>`).join('');
    }

    function render(d) {
      reqBlock.innerHTML = headers(d.requestHeaders);
      const sc = d.status === 200 ? 't-status-200' : 't-status-402';
      resBlock.innerHTML =
        `<div><span class="t-key">Status</span>: <span class="${sc}">` +
        `${esc(d.status + ' ' + d.statusText)}</span></div>` +
        headers(d.responseHeaders) +
        `<div class="t-note">${esc(d.note)}</div>`;
    }

    function esc(s) {
      return String(s).replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_human_passes_through() {
        let result = simulate(demo_user_agent("Human"), DemoAction::None);
        assert_eq!(result.status, 200);
        assert!(!result.response_headers.contains_key(PRICE_HEADER));
        assert!(!result.response_headers.contains_key(CHARGED_HEADER));
    }

    #[test]
    fn test_simulate_crawler_without_payment_is_402() {
        let result = simulate(demo_user_agent("GPTBot"), DemoAction::None);
        assert_eq!(result.status, 402);
        assert_eq!(
            result.response_headers.get(PRICE_HEADER).unwrap(),
            "USD 0.01"
        );
        assert_eq!(
            result.request_headers.get("User-Agent").unwrap(),
            "GPTBot/1.0 (+https://openai.com/gptbot)"
        );
    }

    #[test]
    fn test_simulate_max_price_is_accepted() {
        let result = simulate(demo_user_agent("ClaudeBot"), DemoAction::MaxPrice);
        assert_eq!(result.status, 200);
        assert_eq!(
            result.response_headers.get(CHARGED_HEADER).unwrap(),
            "USD 0.01"
        );
        assert!(result.request_headers.contains_key(MAX_PRICE_HEADER));
    }

    #[test]
    fn test_simulate_exact_price_is_accepted() {
        let result = simulate(demo_user_agent("Bytespider"), DemoAction::ExactPrice);
        assert_eq!(result.status, 200);
        assert_eq!(
            result.response_headers.get(CHARGED_HEADER).unwrap(),
            "USD 0.01"
        );
    }

    #[test]
    fn test_unknown_demo_key_falls_back_to_human() {
        assert_eq!(demo_user_agent("NotARealKey"), DEMO_AGENTS[0].1);
    }
}
