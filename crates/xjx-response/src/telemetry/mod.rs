//! Process-wide `tracing` setup for hosts that build responses.
//!
//! The queue, registry and envelope modules emit events under the
//! `xjx_response::*` targets. [`initialise`] installs the one subscriber that
//! renders them, using the filter and format carried by [`Config`]. The first
//! successful call wins for the lifetime of the process; the returned
//! [`TelemetryHandle`] always reports the format that is actually active.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, info, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use xjx_config::{Config, LogFormat, default_log_filter};

const TARGET: &str = "xjx_response::telemetry";

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Proof that response telemetry is active, naming the format in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format chosen by the call that installed the subscriber.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured log filter expression does not parse.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Expression as configured.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another subscriber already owns the global default.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global subscriber for response telemetry.
///
/// A later call returns a handle for the format installed first and leaves
/// the subscriber alone, even when its own `config` differs. A failed call
/// installs nothing, so a corrected configuration may be retried.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the log filter does not parse and
/// [`TelemetryError::Subscriber`] when a subscriber was installed elsewhere.
///
/// # Examples
///
/// ```rust
/// use xjx_config::{Config, LogFormat};
/// use xjx_response::telemetry;
///
/// # fn main() -> Result<(), xjx_response::telemetry::TelemetryError> {
/// let first = telemetry::initialise(&Config::default())?;
/// let again = telemetry::initialise(&Config::default().with_log_format(LogFormat::Compact))?;
/// assert_eq!(first.format(), again.format());
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| install_subscriber(config))
        .map(|format| TelemetryHandle { format: *format })
}

/// Parses the configured filter; a blank filter means the default directives.
pub(crate) fn build_filter(config: &Config) -> Result<EnvFilter, TelemetryError> {
    let filter = effective_filter(config);
    EnvFilter::try_new(filter).map_err(|error| TelemetryError::Filter {
        filter: filter.to_owned(),
        message: error.to_string(),
    })
}

fn effective_filter(config: &Config) -> &str {
    let configured = config.log_filter().trim();
    if configured.is_empty() {
        default_log_filter()
    } else {
        configured
    }
}

fn install_subscriber(config: &Config) -> Result<LogFormat, TelemetryError> {
    let filter = build_filter(config)?;
    let format = config.log_format();
    let colour = !format.is_structured() && io::stderr().is_terminal();

    let builder = |env_filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .with_ansi(colour)
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;

    info!(
        target: TARGET,
        format = %format,
        filter = effective_filter(config),
        character_encoding = config.character_encoding(),
        output_entities = config.output_entities(),
        "response telemetry installed"
    );
    Ok(format)
}
