//! App state type

use std::sync::Arc;
use std::time::Duration;

use edgegate_types::identity_adapter::IdentityAdapter;
use edgegate_types::locale_router::LocaleRouter;
use edgegate_types::membership_adapter::MembershipAdapter;

use crate::rate_limit::RateLimiterApi;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gatekeeper tuning knobs. Everything here has a safe default; the server
/// crate fills it from configuration.
#[derive(Debug, Clone)]
pub struct GatekeeperOpts {
	/// Allow requests through when the rate limiter itself errors.
	/// Availability-over-strictness; some deployments prefer fail-closed.
	pub fail_open: bool,
	/// Deadline for identity and membership collaborator calls. On expiry
	/// the gate fails closed (unauthenticated / not onboarded).
	pub collaborator_timeout: Duration,
}

impl Default for GatekeeperOpts {
	fn default() -> Self {
		Self { fail_open: true, collaborator_timeout: Duration::from_secs(3) }
	}
}

pub struct AppState {
	pub opts: GatekeeperOpts,

	pub identity_adapter: Arc<dyn IdentityAdapter>,
	pub membership_adapter: Arc<dyn MembershipAdapter>,
	pub locale_router: Arc<dyn LocaleRouter>,

	// Rate limiter; trait-shaped so multi-instance deployments can inject
	// a shared-store backend instead of the in-memory tier
	pub rate_limiter: Arc<dyn RateLimiterApi>,
}

pub type App = Arc<AppState>;

// vim: ts=4
