//! Logging setup
//!
//! The library only emits `tracing` events: debug for lifecycle steps and the
//! per-element `show_*` flags, warn for id and token mismatches, info for
//! accepted submissions. Binaries install a subscriber with [`init`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// Sets up:
/// - Pretty output in debug builds, JSON in release builds
/// - Filtering from `RUST_LOG`, falling back to `default_filter`
///
/// # Example
///
/// ```rust,no_run
/// use formflow::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init("info")?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new(format!("{default_filter},formflow=debug"))
        } else {
            EnvFilter::new(default_filter)
        }
    });

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    }

    Ok(())
}
