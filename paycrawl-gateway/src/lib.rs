//! Pay-per-crawl edge gateway server.
//!
//! Sits in front of an origin site, gates recognized AI crawlers behind the
//! HTTP 402 payment exchange, and reverse-proxies everything else through.
//! Also serves a small demo surface that exercises the decision engine via
//! a JSON endpoint.
//!
//! # Modules
//!
//! - [`config`] — Environment-derived gateway configuration
//! - [`error`] — Gateway error types
//! - [`proxy`] — Origin forwarding over reqwest
//! - [`demo`] — Demo page and `/api/test` simulation endpoint

pub mod config;
pub mod demo;
pub mod error;
pub mod proxy;

pub use config::GatewayConfig;
pub use proxy::ProxyState;
