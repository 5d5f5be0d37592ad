//! Telemetry initialization: tracing-subscriber with an env-filtered fmt layer.
//!
//! Verbosity is controlled through `RUST_LOG` (default `info`), for example:
//!
//! ```bash
//! RUST_LOG=demoday=debug,sqlx=warn demoday
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing for the process. Safe to call once; a second call
/// returns an error from `try_init`.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}
