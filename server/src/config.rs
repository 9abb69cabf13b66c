//! Server configuration
//!
//! YAML file with serde defaults; the listen address can be overridden
//! with the `EDGEGATE_LISTEN` environment variable.

use std::path::Path;

use serde::Deserialize;

use crate::prelude::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub listen: Box<str>,
	/// Locale that gets no path prefix
	pub default_locale: Box<str>,
	pub locales: Box<[Box<str>]>,
	/// Allow requests when the rate limiter itself errors
	pub fail_open: bool,
	/// Deadline for identity/membership collaborator calls
	pub collaborator_timeout_ms: u64,
	/// Upper bound on tracked rate-limit keys
	pub rate_limit_capacity: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			listen: "127.0.0.1:8080".into(),
			default_locale: "en".into(),
			locales: ["en".into(), "de".into(), "de-AT".into(), "fr".into()].into(),
			fail_open: true,
			collaborator_timeout_ms: 3000,
			rate_limit_capacity: 100_000,
		}
	}
}

impl Config {
	pub fn load(path: Option<&Path>) -> EgResult<Self> {
		let mut config = match path {
			Some(path) => {
				let raw = std::fs::read_to_string(path)?;
				serde_yaml::from_str(&raw)
					.map_err(|err| Error::Internal(format!("config parse error: {}", err)))?
			}
			None => Self::default(),
		};
		if let Ok(listen) = std::env::var("EDGEGATE_LISTEN") {
			config.listen = listen.into();
		}
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::default();
		assert_eq!(&*config.default_locale, "en");
		assert!(config.fail_open);
		assert_eq!(config.collaborator_timeout_ms, 3000);
	}

	#[test]
	fn test_partial_yaml_overrides() {
		let config: Config = serde_yaml::from_str("listen: 0.0.0.0:9000\nfail_open: false\n")
			.unwrap();
		assert_eq!(&*config.listen, "0.0.0.0:9000");
		assert!(!config.fail_open);
		// Everything else keeps its default
		assert_eq!(config.rate_limit_capacity, 100_000);
	}
}

// vim: ts=4
