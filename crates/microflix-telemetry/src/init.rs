//! Tracing subscriber installation and logging configuration.
//!
//! # Design
//! - One entry point installs either human-readable or JSON output.
//! - `RUST_LOG` wins over the configured level when present.
//! - The build identifier is recorded once and attached to the startup event.

use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};

/// Level used when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Environment variable selecting `json` or `pretty` output.
pub const LOG_FORMAT_ENV: &str = "MICROFLIX_LOG_FORMAT";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Build identifier recorded by [`init_logging`], `dev` before that.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Default filter directive (e.g. `info`, `microflix_client=debug`).
    pub level: &'a str,
    /// Output format.
    pub format: LogFormat,
    /// Name of the binary, recorded on the startup event.
    pub service: &'a str,
    /// Build identifier recorded on the startup event.
    pub build_sha: &'a str,
}

impl<'a> LoggingConfig<'a> {
    /// Defaults for `service`, honouring [`LOG_FORMAT_ENV`] when it holds a
    /// known format.
    #[must_use]
    pub fn for_service(service: &'a str) -> Self {
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(LogFormat::infer);
        Self {
            level: DEFAULT_LOG_LEVEL,
            format,
            service,
            build_sha: option_env!("MICROFLIX_BUILD_SHA").unwrap_or("dev"),
        }
    }
}

/// Output formats for the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            _ => Err(TelemetryError::UnknownFormat {
                value: value.to_string(),
            }),
        }
    }
}

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine readable.
///
/// # Errors
///
/// Returns [`TelemetryError::SubscriberInstall`] when a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let _ = BUILD_SHA.set(config.build_sha.to_string());

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })?;

    info!(
        service = config.service,
        build_sha = build_sha(),
        "logging initialised"
    );
    Ok(())
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_known_values() {
        assert_eq!("json".parse::<LogFormat>().ok(), Some(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>().ok(), Some(LogFormat::Pretty));
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(TelemetryError::UnknownFormat { value }) if value == "xml"
        ));
    }

    #[test]
    fn for_service_uses_defaults() {
        let config = LoggingConfig::for_service("microflix");
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.service, "microflix");
    }

    #[test]
    fn second_install_is_reported() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
            service: "test",
            build_sha: "dev",
        };
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInstall { .. })
        ));
    }
}
