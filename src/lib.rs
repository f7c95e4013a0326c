// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # adrewrite - Per-app ad-blocking rewrite rules
//!
//! Rewrite rules for HTTP interception proxies, one profile per target app.
//! Each profile does two things:
//!
//! - Short-circuits ad API requests with an empty `200` JSON envelope
//! - Strips ad keys/items from JSON responses and ad markup from HTML
//!
//! Profiles for Hema Drama and Hongguo ship built in; more can be declared
//! in a JSON config file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use adrewrite::{Request, RequestOutcome, RewriteEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = RewriteEngine::with_builtin()?;
//!
//!     let request = Request::get("https://api.hongguo.com/api/ad/banner")?;
//!     match engine.handle_request(request) {
//!         RequestOutcome::Respond(resp) => println!("blocked: {}", resp.text_lossy()),
//!         RequestOutcome::Forward(req) => println!("forward: {}", req.url),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod network;
pub mod rules;

// Re-exports for convenience

// Engine and config
pub use config::{EngineConfig, HttpSettings};
pub use engine::{EngineStats, RewriteEngine};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HttpClient, Request, Response};

// Network
pub use network::{
    AdRewriteInterceptor, Exchange, ExchangeOutcome, InterceptAction, InterceptorChain,
    RequestInterceptor, RewritingClient, TrafficLogger,
};

// Rules
pub use rules::{
    AdClassifier, AdMatch, AppProfile, AppRule, HtmlPattern, RequestOutcome, SanitizeMode,
    SanitizeReport,
};

/// adrewrite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
