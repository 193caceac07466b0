//! Logging setup for binaries and demos
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application. The output format follows the build profile unless
//! `TRELLIS_LOG_FORMAT` names one of `pretty`, `compact` or `json`.

use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that selects the log format
pub const LOG_FORMAT_VAR: &str = "TRELLIS_LOG_FORMAT";

/// How log events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human readable
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds
    #[must_use]
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Format named by `TRELLIS_LOG_FORMAT`, falling back to [`LogFormat::for_build`]
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(Self::for_build)
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format '{other}'"),
        }
    }
}

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub const fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "info,trellis=debug"
    } else {
        "info"
    }
}

/// Initialize logging with the format from [`LogFormat::from_env`]
///
/// # Example
///
/// ```rust,no_run
/// use trellis::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    init_with(LogFormat::from_env())
}

/// Initialize logging with an explicit format
///
/// Levels come from `RUST_LOG`, or [`default_directives`] when it is unset.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_with(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
    }

    tracing::debug!(?format, "Logging initialized");
    Ok(())
}
