//! Output formats for the records emitted while responses are built.
//!
//! Response hosts usually run behind a log collector, so records default to
//! one JSON object per line. `compact` is meant for a developer watching a
//! terminal while exercising handlers by hand.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How response telemetry renders each record.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record with event fields at the top level.
    #[default]
    Json,
    /// Single-line text, coloured when stderr is a terminal.
    Compact,
}

impl LogFormat {
    /// Whether records are machine-readable and must never carry ANSI colour.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Raised when text names no known [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
