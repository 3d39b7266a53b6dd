//! Shared configuration for hosts that build response queues.
//!
//! A [`Config`] seeds every new response with its character encoding and
//! entity-output flag, and tells the telemetry layer how to filter and format
//! log records.
//!
//! Hosts normally obtain one through the `ortho_config` loader, which layers
//! four sources with later ones winning:
//!
//! 1. built-in defaults such as [`DEFAULT_LOG_FILTER`],
//! 2. a TOML file named by `--config-path` or `XJX_CONFIG_PATH`,
//! 3. `XJX_*` environment variables such as `XJX_LOG_FILTER`,
//! 4. command-line flags such as `--character-encoding`.
//!
//! [`Config`] also deserialises directly from any serde source; missing fields
//! fall back to the same defaults.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use self::defaults::{
    DEFAULT_CHARACTER_ENCODING, DEFAULT_LOG_FILTER, default_character_encoding,
    default_character_encoding_string, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Configuration shared by the response context and telemetry.
///
/// Load it with `Config::load()` (process arguments) or
/// `Config::load_from_iter(args)`; both return
/// `Result<Config, Arc<ortho_config::OrthoError>>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "XJX")]
pub struct Config {
    #[ortho_config(default = default_character_encoding_string())]
    character_encoding: String,
    #[ortho_config(default = false)]
    output_entities: bool,
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            character_encoding: default_character_encoding_string(),
            output_entities: false,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Character set the transport layer should advertise for responses.
    #[must_use]
    pub const fn character_encoding(&self) -> &str {
        self.character_encoding.as_str()
    }

    /// Whether special characters should be converted to HTML entities.
    #[must_use]
    pub const fn output_entities(&self) -> bool {
        self.output_entities
    }

    /// Filter expression handed to the tracing subscriber.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for log records.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Replaces the character encoding.
    #[must_use]
    pub fn with_character_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.character_encoding = encoding.into();
        self
    }

    /// Replaces the entity-output flag.
    #[must_use]
    pub const fn with_output_entities(mut self, enabled: bool) -> Self {
        self.output_entities = enabled;
        self
    }

    /// Replaces the log filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replaces the log format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}
