//! Session/Identity Gate
//!
//! Resolves the current user through the identity collaborator with a
//! bounded deadline. Collaborator errors and timeouts degrade to
//! "unauthenticated" (fail closed). A resolved user is treated as
//! session-valid unless the collaborator explicitly says otherwise;
//! deeper session-timeout verification runs downstream of this gate,
//! where the timeout store is available.

use axum::http::request::Parts;
use tokio::time::timeout;

use crate::app::AppState;
use crate::prelude::*;

/// What the gate hands to the decision engine
#[derive(Debug, Clone, Default)]
pub struct ResolvedSession {
	pub user: Option<User>,
	/// The collaborator explicitly invalidated this session; the user has
	/// already been signed out
	pub session_expired: bool,
}

impl ResolvedSession {
	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}
}

pub async fn resolve_session(app: &AppState, parts: &Parts) -> ResolvedSession {
	let session = match timeout(
		app.opts.collaborator_timeout,
		app.identity_adapter.current_session(parts),
	)
	.await
	{
		Ok(Ok(session)) => session,
		Ok(Err(err)) => {
			warn!("Identity lookup failed, treating as unauthenticated: {}", err);
			return ResolvedSession::default();
		}
		Err(_) => {
			warn!("Identity lookup timed out, treating as unauthenticated");
			return ResolvedSession::default();
		}
	};

	let Some(user) = session.user else { return ResolvedSession::default() };

	if session.valid == Some(false) {
		debug!("Session for {} reported invalid, forcing sign-out", user.user_id);
		if let Err(err) = app.identity_adapter.force_sign_out(parts).await {
			warn!("Forced sign-out failed: {}", err);
		}
		return ResolvedSession { user: None, session_expired: true };
	}

	ResolvedSession { user: Some(user), session_expired: false }
}


// vim: ts=4
