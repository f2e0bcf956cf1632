//! HTTP middleware implementing the pay-per-crawl decision engine.
//!
//! Provides a [`tower::Layer`] that inspects each inbound request,
//! identifies known AI crawlers by `User-Agent`, and enforces the
//! configured policy: pass the request to the wrapped service, answer
//! `402 Payment Required`, or answer `403 Forbidden`.
//!
//! # Modules
//!
//! - [`constants`] - Header names and the free-path allow list
//! - [`headers`] - Payment-declaration extraction from request headers
//! - [`policy`] - Per-request configuration sources
//! - [`paygate`] - Action application and price negotiation
//! - [`layer`] - Tower layer/service wiring
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of gate decisions

pub mod constants;
pub mod headers;
pub mod layer;
pub mod paygate;
pub mod policy;

pub use layer::{CrawlGateLayer, CrawlGateService};
pub use paygate::Paygate;
pub use policy::{EnvPolicy, PolicySource, StaticPolicy};
