//! Core data types shared across the gatekeeper.

use serde::{Deserialize, Serialize};

/// Opaque user identifier owned by the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UserId(pub Box<str>);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for UserId {
	fn from(s: &str) -> Self {
		Self(s.into())
	}
}

/// The two facts the gatekeeper reads about an authenticated user
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
	pub user_id: UserId,
	pub email: Box<str>,
	pub email_verified: bool,
}

/// What the identity collaborator reports for a request.
///
/// `valid` is tri-state on purpose: `None` means the collaborator did not
/// check session validity (the common case; deeper timeout verification
/// runs downstream of the gate), `Some(false)` forces a sign-out.
#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
	pub user: Option<User>,
	pub valid: Option<bool>,
}

/// Active organization membership joined with the org's onboarding flag,
/// fetched in a single round trip
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrgMembership {
	pub org_id: Box<str>,
	pub onboarding_completed: bool,
}

/// Consolidated authorization facts for one request. Never cached across
/// requests: plan/organization changes must take effect immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationSnapshot {
	pub has_active_membership: bool,
	pub onboarding_completed: bool,
}

impl From<Option<OrgMembership>> for AuthorizationSnapshot {
	fn from(membership: Option<OrgMembership>) -> Self {
		match membership {
			Some(m) => Self { has_active_membership: true, onboarding_completed: m.onboarding_completed },
			None => Self::default(),
		}
	}
}

// vim: ts=4
