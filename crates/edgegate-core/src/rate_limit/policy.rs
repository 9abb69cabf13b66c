//! Rate Limit Policy Table
//!
//! Static thresholds per auth-sensitive endpoint, resolved by path prefix.

use std::time::Duration;

/// Limit class keyed together with the client IP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitClass {
	Login,
	Registration,
	PasswordReset,
}

impl RateLimitClass {
	/// Machine-readable name used in the 429 body and in logs
	pub fn as_str(&self) -> &'static str {
		match self {
			RateLimitClass::Login => "login",
			RateLimitClass::Registration => "registration",
			RateLimitClass::PasswordReset => "password_reset",
		}
	}

	pub fn policy(&self) -> RateLimitPolicy {
		match self {
			RateLimitClass::Login => {
				RateLimitPolicy { max_requests: 10, window: Duration::from_secs(15 * 60) }
			}
			RateLimitClass::Registration => {
				RateLimitPolicy { max_requests: 5, window: Duration::from_secs(60 * 60) }
			}
			RateLimitClass::PasswordReset => {
				RateLimitPolicy { max_requests: 3, window: Duration::from_secs(60 * 60) }
			}
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
	pub max_requests: u32,
	pub window: Duration,
}

/// Prefix table in match order. The first entry doubles as the fallback
/// policy for auth-sensitive paths with no match (see `resolve_policy`).
const POLICY_TABLE: &[(&str, RateLimitClass)] = &[
	("/login", RateLimitClass::Login),
	("/register", RateLimitClass::Registration),
	("/forgot-password", RateLimitClass::PasswordReset),
];

/// Resolve the limit class for an auth-sensitive path.
///
/// Returns the class and whether the path actually matched the table.
/// An unmatched path gets the first table entry (the login policy); the
/// caller logs the fallback.
pub fn resolve_policy(path: &str) -> (RateLimitClass, bool) {
	for (prefix, class) in POLICY_TABLE {
		if path == *prefix || path.strip_prefix(prefix).is_some_and(|r| r.starts_with('/')) {
			return (*class, true);
		}
	}
	(POLICY_TABLE[0].1, false)
}


// vim: ts=4
