pub mod config;
pub mod error;

pub use config::{Config, NoticeConfig, StoreConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError};

use anyhow::Result;

/// Initialize logging for the client.
///
/// Logs go to stderr so they don't interleave with the rendered task list.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Tasklist core initialized");
    Ok(())
}
