//! Router assembly
//!
//! Layer order matters: the trace layer is outermost, then the gatekeeper,
//! then the locale rewrite as the innermost layer so it runs once per
//! non-rejecting request, directly in front of the application handlers.
//!
//! API and asset prefixes that must never enter the gate belong on the
//! reverse proxy in front of this server; the gate itself still
//! short-circuits static paths.

use std::sync::Arc;

use axum::{Router, extract::Request, middleware};
use tower_http::trace::TraceLayer;

use edgegate_core::{App, gatekeeper};

use crate::locale::{LOCALE_HEADER, PrefixLocaleRouter, locale_rewrite};

/// Placeholder application handler: the gate is the product here, the
/// pages behind it are not. Echoes the canonical path and locale the
/// rewrite layer produced.
async fn page(req: Request) -> String {
	let locale = req
		.headers()
		.get(LOCALE_HEADER)
		.and_then(|h| h.to_str().ok())
		.unwrap_or("en");
	format!("{} ({})\n", req.uri().path(), locale)
}

pub fn init(state: App, locale_router: Arc<PrefixLocaleRouter>) -> Router {
	Router::new()
		.fallback(page)
		.layer(middleware::from_fn_with_state(locale_router, locale_rewrite))
		.layer(middleware::from_fn_with_state(state, gatekeeper))
		.layer(TraceLayer::new_for_http())
}

// vim: ts=4
