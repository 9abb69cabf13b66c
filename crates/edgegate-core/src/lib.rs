//! Core of the edgegate request gatekeeper.
//!
//! The gatekeeper intercepts every inbound request before application
//! handlers and produces exactly one decision: pass it through, redirect
//! it, or reject it. The hot path combines route classification, per-IP
//! fixed-window rate limiting, session verification, one consolidated
//! authorization lookup, and locale-aware redirect targets.
//!
//! Control flow: classifier → (auth-sensitive) rate limiter → (protected)
//! session gate → authorization resolver → decision engine → security
//! header augmenter → downstream locale rewrite.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod authz;
pub mod classify;
pub mod client_ip;
pub mod decision;
pub mod headers;
pub mod middleware;
pub mod prelude;
pub mod rate_limit;
pub mod session;

// Re-export commonly used types
pub use app::{App, AppState, GatekeeperOpts};
pub use classify::RouteCategory;
pub use decision::Decision;
pub use middleware::gatekeeper;
pub use rate_limit::{FixedWindowLimiter, RateLimiterApi};

// vim: ts=4
