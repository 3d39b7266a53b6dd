//! Domain errors raised while building and encoding responses.
//!
//! All errors use a `thiserror`-derived enum with structured context so callers
//! can inspect the failure programmatically. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;

use thiserror::Error;

/// Errors arising from response queue operations.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Data handed to a bulk merge was neither a queue nor a command list.
    #[error("cannot merge response data: {message}")]
    InvalidMergeData {
        /// Description of the rejected shape.
        message: String,
        /// Optional underlying JSON error for list elements that are not commands.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The queue was configured with a content type the encoder cannot produce.
    #[error("unsupported response content type '{content_type}'")]
    UnsupportedContentType {
        /// Content type carried by the queue.
        content_type: String,
    },

    /// The envelope could not be serialized to JSON.
    #[error("failed to serialise response envelope: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An envelope could not be deserialized from JSON.
    #[error("failed to deserialise response envelope: {message}")]
    Deserialize {
        /// Human-readable description of the parse failure.
        message: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the encoded envelope to its sink failed.
    #[error("failed to write response envelope: {0}")]
    Io(#[source] Arc<std::io::Error>),

    /// A plugin could not be added to the registry.
    #[error("plugin registration failed: {message}")]
    PluginRegistration {
        /// Description of the validation failure.
        message: String,
    },
}

impl From<std::io::Error> for ResponseError {
    fn from(source: std::io::Error) -> Self {
        Self::Io(Arc::new(source))
    }
}
