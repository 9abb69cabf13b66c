//! In-memory membership adapter
//!
//! One map lookup stands in for the store-side join of "active membership
//! for user" with the org's onboarding flag; the trait contract is a
//! single round trip either way.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use edgegate_types::membership_adapter::MembershipAdapter;

use crate::prelude::*;

#[derive(Default)]
pub struct MemoryMembershipAdapter {
	memberships: RwLock<HashMap<UserId, OrgMembership>>,
}

impl MemoryMembershipAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_membership(&self, user_id: UserId, membership: OrgMembership) {
		self.memberships.write().insert(user_id, membership);
	}

	pub fn remove_membership(&self, user_id: &UserId) {
		self.memberships.write().remove(user_id);
	}

	pub fn set_onboarding_completed(&self, user_id: &UserId, completed: bool) {
		if let Some(membership) = self.memberships.write().get_mut(user_id) {
			membership.onboarding_completed = completed;
		}
	}
}

#[async_trait]
impl MembershipAdapter for MemoryMembershipAdapter {
	async fn active_org_membership(&self, user_id: &UserId) -> EgResult<Option<OrgMembership>> {
		Ok(self.memberships.read().get(user_id).cloned())
	}
}


// vim: ts=4
