//! Logging Infrastructure
//!
//! Console logging for the POS client. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level directive (e.g., "info", "masala_client=debug")
/// * `json_format` - Emit JSON lines instead of human-readable output
///
/// # Examples
/// ```no_run
/// masala_client::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize the logger from a loaded [`ClientConfig`](crate::ClientConfig)
pub fn init_from_config(config: &crate::ClientConfig) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.log_json)
}
