//! Command line host
//!
//! A minimal host for the SharedId submodule: it owns the cookie file the
//! identity record is persisted in, plays the part of the id registry and
//! prints decoded ids as JSON.

pub mod acquire;
pub mod decode;
pub mod generate;

use crate::config::Settings;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// Precedence:
/// 1. `--verbose` (debug)
/// 2. RUST_LOG environment variable
/// 3. `logging.level` from configuration
pub fn init_logging(settings: &Settings) {
    let env_filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
