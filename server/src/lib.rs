//! Edgegate is the edge request gatekeeper of a multi-tenant SaaS product.
//!
//! Every inbound request passes through the gate before it reaches an
//! application handler:
//!
//! - route classification (static, auth-sensitive, dashboard, ...)
//! - per-IP fixed-window rate limiting on auth-sensitive endpoints
//! - session verification with forced sign-out on invalid sessions
//! - one consolidated organization-membership/onboarding lookup
//! - security header hardening
//! - locale negotiation and path rewriting as the terminal step
//!
//! This crate wires the core gate to concrete collaborators and serves it.

#![forbid(unsafe_code)]

pub mod config;
pub mod identity_adapter;
pub mod locale;
pub mod membership_adapter;
pub mod prelude;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use edgegate_core::{AppState, FixedWindowLimiter, GatekeeperOpts};

use crate::config::Config;
use crate::identity_adapter::MemoryIdentityAdapter;
use crate::locale::PrefixLocaleRouter;
use crate::membership_adapter::MemoryMembershipAdapter;
use crate::prelude::*;

/// Concrete collaborator set behind one gate instance
pub struct EdgegateOpts {
	pub config: Config,
	pub identity_adapter: Arc<MemoryIdentityAdapter>,
	pub membership_adapter: Arc<MemoryMembershipAdapter>,
}

impl EdgegateOpts {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			identity_adapter: Arc::new(MemoryIdentityAdapter::new()),
			membership_adapter: Arc::new(MemoryMembershipAdapter::new()),
		}
	}
}

/// Build the shared app state and the locale router from configuration.
pub fn build_state(opts: &EdgegateOpts) -> (edgegate_core::App, Arc<PrefixLocaleRouter>) {
	let locale_router = Arc::new(PrefixLocaleRouter::new(
		&opts.config.locales,
		&opts.config.default_locale,
	));
	let state = Arc::new(AppState {
		opts: GatekeeperOpts {
			fail_open: opts.config.fail_open,
			collaborator_timeout: Duration::from_millis(opts.config.collaborator_timeout_ms),
		},
		identity_adapter: opts.identity_adapter.clone(),
		membership_adapter: opts.membership_adapter.clone(),
		locale_router: locale_router.clone(),
		rate_limiter: Arc::new(FixedWindowLimiter::new(opts.config.rate_limit_capacity)),
	});
	(state, locale_router)
}

/// Run the server until shutdown.
pub async fn run(opts: EdgegateOpts) -> EgResult<()> {
	let listen = opts.config.listen.clone();
	let (state, locale_router) = build_state(&opts);
	let router = routes::init(state, locale_router);

	let listener = tokio::net::TcpListener::bind(&*listen).await?;
	info!("edgegate {} listening on {}", edgegate_core::app::VERSION, listen);
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_signal())
		.await?;
	Ok(())
}

async fn shutdown_signal() {
	if tokio::signal::ctrl_c().await.is_ok() {
		info!("Shutdown signal received");
	}
}

// vim: ts=4
