//! Adapter boundary for the organization-membership store.

use async_trait::async_trait;

use crate::prelude::*;

#[async_trait]
pub trait MembershipAdapter: Send + Sync {
	/// Active organization membership for a user, joined with the org's
	/// onboarding-completion flag.
	///
	/// Must be a single round trip against the store; two sequential
	/// queries double tail latency on the dashboard hot path.
	async fn active_org_membership(&self, user_id: &UserId) -> EgResult<Option<OrgMembership>>;
}

// vim: ts=4
