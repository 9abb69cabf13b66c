//! Gatekeeper middleware
//!
//! The orchestrating axum middleware: classify → (auth-sensitive) rate
//! limit → (protected) session gate → authorization resolver → decision
//! engine → security headers. Pass-through hands the request to `next`,
//! whose innermost layer is the locale rewrite collaborator.

use axum::{
	body::Body,
	extract::State,
	http::{HeaderValue, Request, StatusCode, header},
	middleware::Next,
	response::{IntoResponse, Response},
};

use crate::app::App;
use crate::authz::resolve_authorization;
use crate::classify::{RouteCategory, classify, split_locale};
use crate::client_ip::client_ip;
use crate::decision::{Decision, decide};
use crate::headers::augment;
use crate::prelude::*;
use crate::rate_limit::{RateLimitError, RateLimitVerdict};
use crate::session::{ResolvedSession, resolve_session};

pub async fn gatekeeper(State(app): State<App>, req: Request<Body>, next: Next) -> Response {
	let path = req.uri().path().to_string();
	let query = req.uri().query().map(str::to_string);
	let category = classify(&path);

	// Static assets short-circuit everything, baseline routing included
	if category == RouteCategory::Static {
		return next.run(req).await;
	}

	let (locale, bare_path) = split_locale(&path);
	let locale = locale.unwrap_or_else(|| app.locale_router.default_locale()).to_string();
	let bare_path = bare_path.to_string();

	let verdict = match check_rate_limit(&app, category, &req, &bare_path) {
		Ok(verdict) => verdict,
		Err(err) => {
			let mut response = err.into_response();
			augment(response.headers_mut());
			return response;
		}
	};

	// A denied verdict ends the request here; limited bursts never reach
	// the identity store
	if let Some(v) = verdict.as_ref().filter(|v| !v.allowed) {
		let mut response = RateLimitError::Limited {
			class: v.class,
			limit: v.limit,
			retry_after: v.retry_after,
		}
		.into_response();
		augment(response.headers_mut());
		return response;
	}

	// Session and authorization are resolved fresh per request and only
	// for the categories that read them; public and token/context gated
	// routes stay cheap
	let needs_session = matches!(
		category,
		RouteCategory::AuthSensitive | RouteCategory::Dashboard | RouteCategory::Onboarding
	);
	let (req, session) = if needs_session {
		let (parts, body) = req.into_parts();
		let session = resolve_session(&app, &parts).await;
		(Request::from_parts(parts, body), session)
	} else {
		(req, ResolvedSession::default())
	};

	let authz = match (category, &session.user) {
		(RouteCategory::Dashboard | RouteCategory::Onboarding, Some(user))
			if user.email_verified =>
		{
			Some(resolve_authorization(&app, &user.user_id).await)
		}
		_ => None,
	};

	let decision =
		decide(category, verdict.as_ref(), &session, authz.as_ref(), &path, query.as_deref());
	debug!("{} {} -> {:?}", category.as_str(), path, decision);

	let mut response = match decision {
		Decision::PassThrough => next.run(req).await,
		Decision::Redirect { target } => {
			redirect_response(&app.locale_router.localize(&locale, &target))
		}
		Decision::RateLimited(err) => err.into_response(),
	};
	augment(response.headers_mut());
	response
}

/// Rate limiting for auth-sensitive routes. A limiter backend error
/// follows the configured failure mode: fail open (allow, no verdict) or
/// fail closed (reject with 503).
fn check_rate_limit(
	app: &App,
	category: RouteCategory,
	req: &Request<Body>,
	bare_path: &str,
) -> Result<Option<RateLimitVerdict>, RateLimitError> {
	if category != RouteCategory::AuthSensitive {
		return Ok(None);
	}
	let ip = client_ip(req.headers());
	match app.rate_limiter.check_and_consume(&ip, bare_path) {
		Ok(verdict) => {
			if !verdict.allowed {
				info!("Rate limit exceeded for {} on {} ({})", ip, bare_path, verdict.class.as_str());
			}
			Ok(Some(verdict))
		}
		Err(err) if app.opts.fail_open => {
			warn!("Rate limiter error on {}, failing open: {}", bare_path, err);
			Ok(None)
		}
		Err(err) => {
			warn!("Rate limiter error on {}, failing closed: {}", bare_path, err);
			Err(RateLimitError::Unavailable)
		}
	}
}

fn redirect_response(target: &str) -> Response {
	let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
	// A target we cannot render as a header degrades to the site root
	let location = HeaderValue::from_str(target)
		.unwrap_or_else(|_| HeaderValue::from_static("/"));
	response.headers_mut().insert(header::LOCATION, location);
	response
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use async_trait::async_trait;
	use axum::http::request::Parts;
	use axum::{Router, middleware};
	use tower::ServiceExt;

	use crate::app::{AppState, GatekeeperOpts};
	use crate::rate_limit::FixedWindowLimiter;
	use edgegate_types::identity_adapter::IdentityAdapter;
	use edgegate_types::locale_router::LocaleRouter;
	use edgegate_types::membership_adapter::MembershipAdapter;

	#[derive(Default)]
	struct CountingIdentity {
		calls: AtomicUsize,
	}

	#[async_trait]
	impl IdentityAdapter for CountingIdentity {
		async fn current_session(&self, _parts: &Parts) -> EgResult<SessionInfo> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Ok(SessionInfo::default())
		}

		async fn force_sign_out(&self, _parts: &Parts) -> EgResult<()> {
			Ok(())
		}
	}

	#[derive(Default)]
	struct CountingMembership {
		calls: AtomicUsize,
	}

	#[async_trait]
	impl MembershipAdapter for CountingMembership {
		async fn active_org_membership(&self, _user_id: &UserId) -> EgResult<Option<OrgMembership>> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Ok(None)
		}
	}

	struct PrefixLocale;

	impl LocaleRouter for PrefixLocale {
		fn localize(&self, locale: &str, path: &str) -> String {
			if locale == "en" { path.to_string() } else { format!("/{}{}", locale, path) }
		}

		fn default_locale(&self) -> &str {
			"en"
		}
	}

	fn test_router() -> (Router, Arc<CountingIdentity>, Arc<CountingMembership>) {
		let identity = Arc::new(CountingIdentity::default());
		let membership = Arc::new(CountingMembership::default());
		let app: App = Arc::new(AppState {
			opts: GatekeeperOpts::default(),
			identity_adapter: identity.clone(),
			membership_adapter: membership.clone(),
			locale_router: Arc::new(PrefixLocale),
			rate_limiter: Arc::new(FixedWindowLimiter::default()),
		});
		let router = Router::new()
			.fallback(async || "downstream")
			.layer(middleware::from_fn_with_state(app, gatekeeper));
		(router, identity, membership)
	}

	async fn send(router: &Router, uri: &str) -> Response {
		let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
		router.clone().oneshot(req).await.unwrap()
	}

	#[tokio::test]
	async fn test_static_skips_all_collaborators() {
		let (router, identity, membership) = test_router();
		let response = send(&router, "/assets/app.css").await;

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
		assert_eq!(membership.calls.load(Ordering::SeqCst), 0);
		// Static short-circuit skips header augmentation too
		assert!(response.headers().get("x-frame-options").is_none());
	}

	#[tokio::test]
	async fn test_public_passes_with_headers_but_no_lookups() {
		let (router, identity, membership) = test_router();
		let response = send(&router, "/pricing").await;

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
		assert_eq!(membership.calls.load(Ordering::SeqCst), 0);
		assert!(response.headers().get("x-frame-options").is_some());
	}

	#[tokio::test]
	async fn test_dashboard_anonymous_redirects_localized() {
		let (router, identity, _) = test_router();
		let response = send(&router, "/de-AT/dashboard").await;

		assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
		let location = response.headers().get("location").and_then(|v| v.to_str().ok());
		assert_eq!(location, Some("/de-AT/login?redirectTo=%2Fde-AT%2Fdashboard"));
		assert_eq!(identity.calls.load(Ordering::SeqCst), 1);
		assert!(response.headers().get("x-content-type-options").is_some());
	}

	#[tokio::test]
	async fn test_rate_limited_login_gets_429_with_security_headers() {
		let (router, _, _) = test_router();

		for _ in 0..10 {
			let response = send(&router, "/login").await;
			assert_eq!(response.status(), StatusCode::OK);
		}
		let response = send(&router, "/login").await;

		assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
		assert_eq!(
			response.headers().get("X-RateLimit-Remaining").and_then(|v| v.to_str().ok()),
			Some("0")
		);
		assert!(response.headers().get("x-frame-options").is_some());
	}

	#[tokio::test]
	async fn test_denied_request_skips_session_lookup() {
		let (router, identity, _) = test_router();

		for _ in 0..10 {
			let response = send(&router, "/login").await;
			assert_eq!(response.status(), StatusCode::OK);
		}
		let lookups_while_allowed = identity.calls.load(Ordering::SeqCst);
		let response = send(&router, "/login").await;

		assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
		// The denied request must not add an identity round trip
		assert_eq!(identity.calls.load(Ordering::SeqCst), lookups_while_allowed);
	}
}

// vim: ts=4
