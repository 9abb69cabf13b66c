//! In-memory identity adapter
//!
//! Session store keyed by an opaque token carried in the `eg_session`
//! cookie (or a bearer header). Suitable for single-instance runs and
//! tests; production deployments plug a real identity provider into the
//! same trait.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{HeaderMap, header, request::Parts};
use parking_lot::RwLock;
use uuid::Uuid;

use edgegate_types::identity_adapter::IdentityAdapter;

use crate::prelude::*;

pub const SESSION_COOKIE: &str = "eg_session";

#[derive(Debug, Clone)]
struct SessionRecord {
	user: User,
	/// `Some(false)` marks a session the store has invalidated but not
	/// yet purged (revoked device, password change, ...)
	valid: Option<bool>,
}

#[derive(Default)]
pub struct MemoryIdentityAdapter {
	sessions: RwLock<HashMap<Box<str>, SessionRecord>>,
}

impl MemoryIdentityAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a session for `user` and return its token.
	pub fn create_session(&self, user: User) -> Box<str> {
		let token: Box<str> = Uuid::new_v4().to_string().into();
		self.sessions
			.write()
			.insert(token.clone(), SessionRecord { user, valid: None });
		token
	}

	/// Mark an existing session invalid without removing it, as a real
	/// store does between revocation and purge.
	pub fn invalidate_session(&self, token: &str) {
		if let Some(record) = self.sessions.write().get_mut(token) {
			record.valid = Some(false);
		}
	}

	pub fn session_count(&self) -> usize {
		self.sessions.read().len()
	}

	fn token_from_headers(headers: &HeaderMap) -> Option<Box<str>> {
		if let Some(cookies) = headers.get(header::COOKIE).and_then(|h| h.to_str().ok()) {
			for cookie in cookies.split(';') {
				if let Some(token) = cookie.trim().strip_prefix(SESSION_COOKIE) {
					if let Some(token) = token.strip_prefix('=') {
						return Some(token.trim().into());
					}
				}
			}
		}
		headers
			.get(header::AUTHORIZATION)
			.and_then(|h| h.to_str().ok())
			.and_then(|h| h.strip_prefix("Bearer "))
			.map(Into::into)
	}
}

#[async_trait]
impl IdentityAdapter for MemoryIdentityAdapter {
	async fn current_session(&self, parts: &Parts) -> EgResult<SessionInfo> {
		let Some(token) = Self::token_from_headers(&parts.headers) else {
			return Ok(SessionInfo::default());
		};
		let sessions = self.sessions.read();
		Ok(match sessions.get(&*token) {
			Some(record) => SessionInfo { user: Some(record.user.clone()), valid: record.valid },
			None => SessionInfo::default(),
		})
	}

	async fn force_sign_out(&self, parts: &Parts) -> EgResult<()> {
		if let Some(token) = Self::token_from_headers(&parts.headers) {
			self.sessions.write().remove(&*token);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::Request;

	fn user() -> User {
		User { user_id: "u1".into(), email: "alice@example.com".into(), email_verified: true }
	}

	fn parts_with_cookie(token: &str) -> Parts {
		let (parts, ()) = Request::builder()
			.uri("/dashboard")
			.header("cookie", format!("theme=dark; {}={}", SESSION_COOKIE, token))
			.body(())
			.map(Request::into_parts)
			.unwrap();
		parts
	}

	#[tokio::test]
	async fn test_cookie_session_roundtrip() {
		let adapter = MemoryIdentityAdapter::new();
		let token = adapter.create_session(user());

		let session = adapter.current_session(&parts_with_cookie(&token)).await.unwrap();
		assert_eq!(session.user.map(|u| u.user_id), Some("u1".into()));
	}

	#[tokio::test]
	async fn test_unknown_token_is_anonymous() {
		let adapter = MemoryIdentityAdapter::new();
		let session = adapter.current_session(&parts_with_cookie("nope")).await.unwrap();
		assert!(session.user.is_none());
	}

	#[tokio::test]
	async fn test_invalidate_and_force_sign_out() {
		let adapter = MemoryIdentityAdapter::new();
		let token = adapter.create_session(user());
		adapter.invalidate_session(&token);

		let parts = parts_with_cookie(&token);
		let session = adapter.current_session(&parts).await.unwrap();
		assert_eq!(session.valid, Some(false));

		adapter.force_sign_out(&parts).await.unwrap();
		assert_eq!(adapter.session_count(), 0);
	}

	#[tokio::test]
	async fn test_bearer_header_fallback() {
		let adapter = MemoryIdentityAdapter::new();
		let token = adapter.create_session(user());

		let (parts, ()) = Request::builder()
			.uri("/dashboard")
			.header("authorization", format!("Bearer {}", token))
			.body(())
			.map(Request::into_parts)
			.unwrap();
		let session = adapter.current_session(&parts).await.unwrap();
		assert!(session.user.is_some());
	}
}

// vim: ts=4
