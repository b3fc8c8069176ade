//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// `default_directive` applies when `RUST_LOG` is unset, e.g. `"pagecast=info"`.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = fmt::layer().with_target(false).with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
