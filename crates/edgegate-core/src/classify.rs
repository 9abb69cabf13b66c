//! Route Classifier
//!
//! Pure, total mapping from a request path to the route category that
//! drives the rest of the gate. Static/internal paths are matched first
//! and short-circuit all further processing. Locale prefixes are stripped
//! before matching so classification is locale-agnostic.

/// Classification bucket for an incoming path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
	/// Static assets and internal files; skip the whole gate
	Static,
	/// Login/registration/password-reset entry points; rate limited
	AuthSensitive,
	/// Post-signup onboarding flow
	Onboarding,
	/// Authenticated application area
	Dashboard,
	/// Requires a token query parameter issued elsewhere
	TokenProtected,
	/// Requires context query parameters to make sense
	Special,
	/// Everything else
	Public,
}

impl RouteCategory {
	/// Name used in logs
	pub fn as_str(&self) -> &'static str {
		match self {
			RouteCategory::Static => "static",
			RouteCategory::AuthSensitive => "auth_sensitive",
			RouteCategory::Onboarding => "onboarding",
			RouteCategory::Dashboard => "dashboard",
			RouteCategory::TokenProtected => "token_protected",
			RouteCategory::Special => "special",
			RouteCategory::Public => "public",
		}
	}
}

const STATIC_PREFIXES: &[&str] = &["/assets/", "/static/", "/fonts/", "/images/", "/.well-known/"];
const STATIC_FILES: &[&str] = &["/favicon.ico", "/robots.txt", "/sitemap.xml", "/manifest.json"];

const AUTH_SENSITIVE_PREFIXES: &[&str] = &["/login", "/register", "/forgot-password"];
const DASHBOARD_PREFIXES: &[&str] = &["/dashboard", "/settings"];
const TOKEN_PROTECTED_PREFIXES: &[&str] = &["/reset-password"];
const SPECIAL_PREFIXES: &[&str] = &["/checkout"];
const ONBOARDING_PREFIX: &str = "/onboarding";

/// Split a leading locale segment (`en`, `de-AT`, ...) off a path.
/// Returns the locale (if any) and the remaining path, never empty.
pub fn split_locale(path: &str) -> (Option<&str>, &str) {
	let Some(rest) = path.strip_prefix('/') else { return (None, path) };
	let seg = rest.split('/').next().unwrap_or("");
	if is_locale_segment(seg) {
		let stripped = &rest[seg.len()..];
		(Some(seg), if stripped.is_empty() { "/" } else { stripped })
	} else {
		(None, path)
	}
}

fn is_locale_segment(seg: &str) -> bool {
	let bytes = seg.as_bytes();
	match bytes.len() {
		2 => bytes.iter().all(u8::is_ascii_lowercase),
		5 => {
			bytes[0].is_ascii_lowercase()
				&& bytes[1].is_ascii_lowercase()
				&& bytes[2] == b'-'
				&& bytes[3].is_ascii_uppercase()
				&& bytes[4].is_ascii_uppercase()
		}
		_ => false,
	}
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
	path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

fn is_static(path: &str) -> bool {
	if STATIC_FILES.contains(&path) {
		return true;
	}
	if STATIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
		return true;
	}
	// Anything with a file extension in its last segment is an asset
	path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Classify a request path. Total: every path maps to exactly one
/// category, with `Public` as the defensive default for anything odd.
pub fn classify(path: &str) -> RouteCategory {
	if path.is_empty() || !path.starts_with('/') {
		return RouteCategory::Public;
	}
	let (_, path) = split_locale(path);

	if is_static(path) {
		return RouteCategory::Static;
	}
	// Token-protected before auth-sensitive: /reset-password carries the
	// token issued by /forgot-password and is gated on it, not on rate
	// limits
	if TOKEN_PROTECTED_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
		return RouteCategory::TokenProtected;
	}
	if AUTH_SENSITIVE_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
		return RouteCategory::AuthSensitive;
	}
	if matches_prefix(path, ONBOARDING_PREFIX) {
		return RouteCategory::Onboarding;
	}
	if DASHBOARD_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
		return RouteCategory::Dashboard;
	}
	if SPECIAL_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
		return RouteCategory::Special;
	}
	RouteCategory::Public
}


// vim: ts=4
