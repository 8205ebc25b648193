//! Core plumbing for Pollencast: configuration and error types shared by the
//! forecast pipeline and the CLI.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::ConfigError;

use anyhow::Result;

/// Initialize tracing for the application.
///
/// Logs go to stderr so they never interleave with rendered output.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    tracing::debug!("pollencast core initialized");
    Ok(())
}
