#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the pay-per-crawl decision engine.
//!
//! This crate provides the foundational types used to gate AI content
//! crawlers behind an HTTP 402 Payment Required exchange. It is designed to
//! be transport-agnostic, with the HTTP middleware and server provided by
//! separate crates.
//!
//! # Overview
//!
//! An edge gateway inspects each inbound request, maps its `User-Agent` to a
//! known crawler identity, resolves the policy that applies to that crawler,
//! and either lets the request through, blocks it, or demands a payment
//! declaration. This crate holds the three leaf components of that pipeline;
//! all of them are pure functions over read-only data.
//!
//! # Modules
//!
//! - [`crawlers`] - Static crawler signature table and User-Agent matching
//! - [`price`] - Fixed-point USD price parsing, formatting, and comparison
//! - [`policy`] - Per-crawler rule resolution from a configuration document

pub mod crawlers;
pub mod policy;
pub mod price;

pub use crawlers::{CrawlerSignature, KNOWN_CRAWLERS, identify};
pub use policy::{CrawlerAction, CrawlerRule, PolicyDocument, resolve};
pub use price::{Price, PriceFormatError};
