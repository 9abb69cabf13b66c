//! Boundary of the internationalized routing collaborator.
//!
//! Path localization itself is opaque to the gatekeeper. The gate only
//! needs localized redirect targets; the request rewrite runs downstream
//! of the gate as the terminal step of every non-rejecting path.

pub trait LocaleRouter: Send + Sync {
	/// Map an internal path to its locale-prefixed form for redirects.
	fn localize(&self, locale: &str, path: &str) -> String;

	/// The locale used when negotiation finds nothing better.
	fn default_locale(&self) -> &str;
}

// vim: ts=4
