//! Per-IP fixed-window rate limiting for auth-sensitive endpoints.

mod error;
mod limiter;
mod policy;

pub use error::RateLimitError;
pub use limiter::{FixedWindowLimiter, RateLimitVerdict, RateLimiterApi};
pub use policy::{RateLimitClass, RateLimitPolicy, resolve_policy};

// vim: ts=4
