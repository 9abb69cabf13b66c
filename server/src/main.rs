use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use edgegate::config::Config;
use edgegate::{EdgegateOpts, run};

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config_path = std::env::args().nth(1).map(PathBuf::from);
	let config = match Config::load(config_path.as_deref()) {
		Ok(config) => config,
		Err(err) => {
			eprintln!("edgegate: {}", err);
			std::process::exit(1);
		}
	};

	if let Err(err) = run(EdgegateOpts::new(config)).await {
		eprintln!("edgegate: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4
