//! Adapter boundary for the identity/session store.
//!
//! The gatekeeper never looks inside sessions; it asks the collaborator
//! two questions ("who is the current user?" and, implicitly, "is the
//! session still valid?") and can request a forced sign-out.

use async_trait::async_trait;
use axum::http::request::Parts;

use crate::prelude::*;

#[async_trait]
pub trait IdentityAdapter: Send + Sync {
	/// Resolve the current user for a request from its headers/cookies.
	///
	/// An `Err` is treated by the gate as "unauthenticated"; it must not
	/// abort the request.
	async fn current_session(&self, parts: &Parts) -> EgResult<SessionInfo>;

	/// Invalidate the session carried by the request. Called when the
	/// collaborator reported the session explicitly invalid.
	async fn force_sign_out(&self, parts: &Parts) -> EgResult<()>;
}

// vim: ts=4
