//! Locale routing collaborator
//!
//! Owns path localization for the whole stack. Redirect targets produced
//! by the gate go through [`PrefixLocaleRouter::localize`]; inbound
//! requests pass through the [`locale_rewrite`] layer as the terminal
//! step of every non-rejecting path, which negotiates the locale and
//! rewrites the URI to the canonical internal path.

use std::sync::Arc;

use axum::{
	body::Body,
	extract::State,
	http::{HeaderMap, HeaderValue, Request, header},
	middleware::Next,
	response::Response,
};

use edgegate_core::classify::split_locale;
use edgegate_types::locale_router::LocaleRouter;

/// Request header carrying the negotiated locale to handlers
pub const LOCALE_HEADER: &str = "x-locale";
const LOCALE_COOKIE: &str = "locale";

pub struct PrefixLocaleRouter {
	locales: Box<[Box<str>]>,
	default_locale: Box<str>,
}

impl PrefixLocaleRouter {
	pub fn new(locales: &[Box<str>], default_locale: &str) -> Self {
		Self { locales: locales.into(), default_locale: default_locale.into() }
	}

	pub fn is_supported(&self, locale: &str) -> bool {
		self.locales.iter().any(|l| &**l == locale)
	}

	/// Locale precedence: path prefix, then cookie, then Accept-Language,
	/// then the configured default.
	pub fn negotiate(&self, headers: &HeaderMap, path_locale: Option<&str>) -> Box<str> {
		if let Some(locale) = path_locale.filter(|l| self.is_supported(l)) {
			return locale.into();
		}
		if let Some(locale) = cookie_locale(headers).filter(|l| self.is_supported(l)) {
			return locale;
		}
		if let Some(locale) = self.accept_language(headers) {
			return locale;
		}
		self.default_locale.clone()
	}

	fn accept_language(&self, headers: &HeaderMap) -> Option<Box<str>> {
		let raw = headers.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
		for entry in raw.split(',') {
			let tag = entry.split(';').next().unwrap_or("").trim();
			if self.is_supported(tag) {
				return Some(tag.into());
			}
			// Fall back from "de-CH" to plain "de"
			let base = tag.split('-').next().unwrap_or("");
			if !base.is_empty() && self.is_supported(base) {
				return Some(base.into());
			}
		}
		None
	}
}

impl LocaleRouter for PrefixLocaleRouter {
	fn localize(&self, locale: &str, path: &str) -> String {
		if locale == &*self.default_locale || !self.is_supported(locale) {
			path.to_string()
		} else {
			format!("/{}{}", locale, path)
		}
	}

	fn default_locale(&self) -> &str {
		&self.default_locale
	}
}

fn cookie_locale(headers: &HeaderMap) -> Option<Box<str>> {
	let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
	for cookie in cookies.split(';') {
		if let Some(value) = cookie.trim().strip_prefix(LOCALE_COOKIE) {
			if let Some(value) = value.strip_prefix('=') {
				return Some(value.trim().into());
			}
		}
	}
	None
}

/// Terminal rewrite layer: strips a supported locale prefix from the URI
/// and tags the request with the negotiated locale.
pub async fn locale_rewrite(
	State(router): State<Arc<PrefixLocaleRouter>>,
	mut req: Request<Body>,
	next: Next,
) -> Response {
	let path = req.uri().path().to_string();
	let query = req.uri().query().map(str::to_string);
	let (path_locale, bare_path) = split_locale(&path);
	let path_locale = path_locale.filter(|l| router.is_supported(l));

	let locale = router.negotiate(req.headers(), path_locale);

	if path_locale.is_some() {
		let rewritten = match &query {
			Some(q) => format!("{}?{}", bare_path, q),
			None => bare_path.to_string(),
		};
		if let Ok(uri) = rewritten.parse() {
			*req.uri_mut() = uri;
		}
	}
	let locale_value =
		HeaderValue::from_str(&locale).unwrap_or_else(|_| HeaderValue::from_static("en"));
	req.headers_mut().insert(LOCALE_HEADER, locale_value);

	next.run(req).await
}

#[cfg(test)]
mod tests {
	use super::*;

	fn router() -> PrefixLocaleRouter {
		PrefixLocaleRouter::new(&["en".into(), "de".into(), "de-AT".into()], "en")
	}

	#[test]
	fn test_localize_default_locale_unprefixed() {
		assert_eq!(router().localize("en", "/login"), "/login");
		assert_eq!(router().localize("de", "/login"), "/de/login");
		assert_eq!(router().localize("de-AT", "/dashboard"), "/de-AT/dashboard");
		// Unknown locales degrade to the unprefixed path
		assert_eq!(router().localize("xx", "/login"), "/login");
	}

	#[test]
	fn test_negotiate_precedence() {
		let r = router();
		let mut headers = HeaderMap::new();
		headers.insert("cookie", HeaderValue::from_static("locale=de"));
		headers.insert("accept-language", HeaderValue::from_static("fr, de-AT;q=0.8"));

		// Path prefix wins
		assert_eq!(&*r.negotiate(&headers, Some("de-AT")), "de-AT");
		// Then the cookie
		assert_eq!(&*r.negotiate(&headers, None), "de");
		// Then Accept-Language (with base-tag fallback)
		headers.remove("cookie");
		assert_eq!(&*r.negotiate(&headers, None), "de-AT");
		// Default when nothing matches
		assert_eq!(&*r.negotiate(&HeaderMap::new(), None), "en");
	}

	#[test]
	fn test_accept_language_base_fallback() {
		let r = router();
		let mut headers = HeaderMap::new();
		headers.insert("accept-language", HeaderValue::from_static("de-CH;q=0.9, en;q=0.5"));
		assert_eq!(&*r.negotiate(&headers, None), "de");
	}
}

// vim: ts=4
