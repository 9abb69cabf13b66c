//! Authorization Resolver
//!
//! One consolidated query per request against the membership collaborator:
//! active membership joined with the org's onboarding flag in a single
//! round trip. Only dashboard and onboarding routes pay for it. Absence,
//! errors, and timeouts all collapse to "not onboarded" (fail closed).

use tokio::time::timeout;

use crate::app::AppState;
use crate::prelude::*;

pub async fn resolve_authorization(app: &AppState, user_id: &UserId) -> AuthorizationSnapshot {
	match timeout(
		app.opts.collaborator_timeout,
		app.membership_adapter.active_org_membership(user_id),
	)
	.await
	{
		Ok(Ok(membership)) => AuthorizationSnapshot::from(membership),
		Ok(Err(err)) => {
			warn!("Membership lookup for {} failed, treating as not onboarded: {}", user_id, err);
			AuthorizationSnapshot::default()
		}
		Err(_) => {
			warn!("Membership lookup for {} timed out, treating as not onboarded", user_id);
			AuthorizationSnapshot::default()
		}
	}
}


// vim: ts=4
