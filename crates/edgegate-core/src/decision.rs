//! Route Decision Engine
//!
//! Pure state machine producing exactly one decision per request from the
//! classifier output, the rate-limit verdict, the resolved session, and
//! the authorization snapshot. Redirect targets are internal paths; the
//! middleware localizes them before rendering.

use url::form_urlencoded;

use crate::classify::RouteCategory;
use crate::rate_limit::{RateLimitError, RateLimitVerdict};
use crate::session::ResolvedSession;
use edgegate_types::types::AuthorizationSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
pub const ONBOARDING_PATH: &str = "/onboarding";
/// Issues the reset token consumed by the token-protected route
pub const TOKEN_ISSUER_PATH: &str = "/forgot-password";
/// Safe entry point for context-gated checkout
pub const SPECIAL_FALLBACK_PATH: &str = "/pricing";

/// Context query parameters expected by the checkout route
const SPECIAL_CONTEXT_PARAMS: &[&str] = &["plan", "billing"];

/// Terminal outcome for one request, consumed exactly once
#[derive(Debug)]
pub enum Decision {
	PassThrough,
	Redirect { target: String },
	RateLimited(RateLimitError),
}

fn query_param<'a>(query: Option<&'a str>, name: &str) -> Option<std::borrow::Cow<'a, str>> {
	form_urlencoded::parse(query?.as_bytes()).find(|(k, _)| k == name).map(|(_, v)| v)
}

fn has_param(query: Option<&str>, name: &str) -> bool {
	query_param(query, name).is_some_and(|v| !v.is_empty())
}

/// Login redirect preserving the originally requested path; an expired
/// session adds a reason the login page can surface.
fn login_redirect(original_path: &str, session_expired: bool) -> Decision {
	let mut params = form_urlencoded::Serializer::new(String::new());
	params.append_pair("redirectTo", original_path);
	if session_expired {
		params.append_pair("reason", "session_expired");
	}
	Decision::Redirect { target: format!("{}?{}", LOGIN_PATH, params.finish()) }
}

fn redirect(target: &str) -> Decision {
	Decision::Redirect { target: target.to_string() }
}

/// One decision per request.
///
/// `verdict` is only present for auth-sensitive routes, `authz` only for
/// dashboard/onboarding routes; the middleware keeps the hot path cheap by
/// not resolving what a category cannot use.
pub fn decide(
	category: RouteCategory,
	verdict: Option<&RateLimitVerdict>,
	session: &ResolvedSession,
	authz: Option<&AuthorizationSnapshot>,
	original_path: &str,
	query: Option<&str>,
) -> Decision {
	match category {
		RouteCategory::Static | RouteCategory::Public => Decision::PassThrough,

		RouteCategory::AuthSensitive => {
			if let Some(verdict) = verdict {
				if !verdict.allowed {
					return Decision::RateLimited(RateLimitError::Limited {
						class: verdict.class,
						limit: verdict.limit,
						retry_after: verdict.retry_after,
					});
				}
			}
			if session.is_authenticated() {
				// Already signed in; keep users off the login/register forms
				redirect(DASHBOARD_PATH)
			} else {
				Decision::PassThrough
			}
		}

		RouteCategory::Dashboard => {
			let Some(user) = &session.user else {
				return login_redirect(original_path, session.session_expired);
			};
			if !user.email_verified {
				return redirect(VERIFY_EMAIL_PATH);
			}
			if !authz.is_some_and(|a| a.onboarding_completed) {
				return redirect(ONBOARDING_PATH);
			}
			Decision::PassThrough
		}

		RouteCategory::Onboarding => {
			let Some(user) = &session.user else {
				return login_redirect(original_path, session.session_expired);
			};
			if !user.email_verified {
				return redirect(VERIFY_EMAIL_PATH);
			}
			if authz.is_some_and(|a| a.onboarding_completed) {
				return redirect(DASHBOARD_PATH);
			}
			Decision::PassThrough
		}

		RouteCategory::TokenProtected => {
			// Token validity is not checked at this layer, only presence
			if has_param(query, "token") {
				Decision::PassThrough
			} else {
				redirect(TOKEN_ISSUER_PATH)
			}
		}

		RouteCategory::Special => {
			if SPECIAL_CONTEXT_PARAMS.iter().any(|p| has_param(query, p)) {
				Decision::PassThrough
			} else {
				redirect(SPECIAL_FALLBACK_PATH)
			}
		}
	}
}


// vim: ts=4
