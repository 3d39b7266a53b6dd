use crate::logging::LogFormat;

/// Character set advertised for encoded responses when none is configured.
pub const DEFAULT_CHARACTER_ENCODING: &str = "utf-8";

/// Default log filter: queue activity at `info`, everything else at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,xjx_response=info";

/// Default character encoding for new response queues.
#[must_use]
pub const fn default_character_encoding() -> &'static str {
    DEFAULT_CHARACTER_ENCODING
}

/// Owned character encoding value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_character_encoding_string() -> String {
    DEFAULT_CHARACTER_ENCODING.to_owned()
}

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
