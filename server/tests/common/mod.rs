//! Shared test stack and fixtures
//!
//! Builds the full router (gatekeeper + locale rewrite + placeholder
//! handlers) around seeded in-memory adapters, so tests exercise the gate
//! exactly as a deployment wires it.

use std::sync::Arc;

use axum::Router;

use edgegate::config::Config;
use edgegate::identity_adapter::MemoryIdentityAdapter;
use edgegate::membership_adapter::MemoryMembershipAdapter;
use edgegate::{EdgegateOpts, build_state, routes};
use edgegate_types::types::{OrgMembership, User, UserId};

pub struct TestStack {
	pub router: Router,
	pub identity: Arc<MemoryIdentityAdapter>,
	pub membership: Arc<MemoryMembershipAdapter>,
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

pub fn test_stack() -> TestStack {
	let opts = EdgegateOpts::new(Config::default());
	let identity = opts.identity_adapter.clone();
	let membership = opts.membership_adapter.clone();
	let (state, locale_router) = build_state(&opts);
	TestStack { router: routes::init(state, locale_router), identity, membership }
}

pub fn verified_user(id: &str) -> User {
	User {
		user_id: UserId(id.into()),
		email: format!("{}@example.com", id).into(),
		email_verified: true,
	}
}

pub fn unverified_user(id: &str) -> User {
	User { email_verified: false, ..verified_user(id) }
}

pub fn onboarded_membership() -> OrgMembership {
	OrgMembership { org_id: "org1".into(), onboarding_completed: true }
}

pub fn pending_membership() -> OrgMembership {
	OrgMembership { org_id: "org1".into(), onboarding_completed: false }
}

// vim: ts=4
