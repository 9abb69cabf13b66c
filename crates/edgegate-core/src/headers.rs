//! Security Header Augmenter
//!
//! Hardening headers for every response that passes through the gate,
//! static assets excepted. Pure and idempotent: setting the same fixed
//! values twice is a no-op.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};

pub fn augment(headers: &mut HeaderMap) {
	headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
	headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
	headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
	headers.insert(
		header::REFERRER_POLICY,
		HeaderValue::from_static("strict-origin-when-cross-origin"),
	);
	headers.insert(
		HeaderName::from_static("permissions-policy"),
		HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
	);
}


// vim: ts=4
