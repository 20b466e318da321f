//! Tracing subscriber initialisation for processes embedding the engine.
//!
//! Call [`init_tracing_from_env`] (or [`init_tracing`] with explicit
//! settings) once at program start. Later calls are silently ignored, since
//! the global subscriber can only be set once per process.
//!
//! Environment:
//! - `KYC_LOG_FORMAT`: `json` for newline-delimited JSON, anything else for text
//! - `KYC_LOG_LEVEL`: default verbosity (`trace`..`error`, default `info`)
//! - `RUST_LOG`: per-target filtering, overrides `KYC_LOG_LEVEL`

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output settings resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub json: bool,
    pub level: Level,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            json: false,
            level: Level::INFO,
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same resolution as [`LogSettings::from_env`] over an arbitrary lookup.
    /// Unparseable levels fall back to `INFO`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let json = lookup("KYC_LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let level = lookup("KYC_LOG_LEVEL")
            .and_then(|v| Level::from_str(v.trim()).ok())
            .unwrap_or(Level::INFO);
        Self { json, level }
    }
}

/// Initialise the global subscriber from `KYC_LOG_FORMAT` / `KYC_LOG_LEVEL`.
pub fn init_tracing_from_env() {
    let settings = LogSettings::from_env();
    init_tracing(settings.json, settings.level);
}

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if json {
        registry
            .with(fmt::layer().with_target(false).json())
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    if installed.is_ok() {
        tracing::debug!(json, level = %level, "tracing initialised");
    }
}
