//! Client IP Extractor
//!
//! Best-effort client IP from proxy/CDN forwarding headers, in a fixed
//! precedence order. The result is a rate-limit key, not a security
//! boundary: it is never validated as an IP address and degrades to a
//! sentinel instead of failing.

use axum::http::HeaderMap;

/// Returned when no forwarding header yields a usable value
pub const SENTINEL_IP: &str = "0.0.0.0";

/// Forwarding headers in precedence order: CDN first, then reverse proxy,
/// then the standards-ish fallbacks
const FORWARDING_HEADERS: &[&str] =
	&["cf-connecting-ip", "true-client-ip", "x-forwarded-for", "x-real-ip"];

/// Extract a best-effort client IP from request headers.
///
/// `x-forwarded-for` may carry a chain ("client, proxy1, proxy2"); the
/// first entry is the original client. Unreadable or empty headers are
/// skipped; if nothing usable remains, [`SENTINEL_IP`] is returned.
pub fn client_ip(headers: &HeaderMap) -> Box<str> {
	for name in FORWARDING_HEADERS {
		let Some(value) = headers.get(*name).and_then(|h| h.to_str().ok()) else { continue };
		let first = value.split(',').next().unwrap_or("").trim();
		if !first.is_empty() {
			return first.into();
		}
	}
	SENTINEL_IP.into()
}


// vim: ts=4
