//! Wire envelope encoding for finished response queues.
//!
//! The envelope is a single JSON object. The optional return value travels
//! under `xjxrv` and the ordered commands under `xjxobj`:
//!
//! ```json
//! {"xjxrv": 42, "xjxobj": [{"cmd": "js", "data": "go()"}]}
//! ```
//!
//! Encoding is the one serialisation point for a queue. [`decode`] reads an
//! envelope back so a handler can fold a sub-response into its own queue.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::command::Command;
use crate::error::ResponseError;
use crate::queue::{JSON_CONTENT_TYPE, ResponseQueue};

/// Borrowed view of a queue in wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Envelope<'a> {
    #[serde(rename = "xjxrv", skip_serializing_if = "Option::is_none")]
    return_value: Option<&'a Value>,
    #[serde(rename = "xjxobj")]
    commands: &'a [Command],
}

impl<'a> Envelope<'a> {
    /// Builds the wire view of `queue`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::UnsupportedContentType`] when the queue was
    /// configured for anything other than JSON.
    pub fn from_queue(queue: &'a ResponseQueue) -> Result<Self, ResponseError> {
        if queue.content_type() != JSON_CONTENT_TYPE {
            return Err(ResponseError::UnsupportedContentType {
                content_type: queue.content_type().to_owned(),
            });
        }
        Ok(Self {
            return_value: queue.return_value(),
            commands: queue.commands(),
        })
    }

    /// Returns the return value carried by the envelope.
    #[must_use]
    pub const fn return_value(&self) -> Option<&'a Value> {
        self.return_value
    }

    /// Returns the commands in wire order.
    #[must_use]
    pub const fn commands(&self) -> &'a [Command] {
        self.commands
    }
}

/// An envelope read back from its wire form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecodedEnvelope {
    #[serde(rename = "xjxrv", default)]
    return_value: Option<Value>,
    #[serde(rename = "xjxobj")]
    commands: Vec<Command>,
}

impl DecodedEnvelope {
    /// Returns the decoded return value, if the envelope carried one.
    #[must_use]
    pub const fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Returns the decoded commands in wire order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl From<DecodedEnvelope> for ResponseQueue {
    fn from(envelope: DecodedEnvelope) -> Self {
        Self::from_parts(envelope.commands, envelope.return_value)
    }
}

/// Encodes `queue` into envelope bytes.
///
/// # Errors
///
/// Returns [`ResponseError::UnsupportedContentType`] for non-JSON queues and
/// [`ResponseError::Serialize`] when serialisation fails.
///
/// # Example
///
/// ```
/// use xjx_response::{ResponseQueue, envelope};
///
/// let bytes = envelope::encode(&ResponseQueue::new()).expect("encode");
/// assert_eq!(bytes, br#"{"xjxobj":[]}"#);
/// ```
pub fn encode(queue: &ResponseQueue) -> Result<Vec<u8>, ResponseError> {
    let envelope = Envelope::from_queue(queue)?;
    let bytes = serde_json::to_vec(&envelope).map_err(ResponseError::Serialize)?;
    log_encoded(queue, bytes.len());
    Ok(bytes)
}

/// Encodes `queue` into an envelope string.
///
/// # Errors
///
/// Fails under the same conditions as [`encode`].
pub fn encode_to_string(queue: &ResponseQueue) -> Result<String, ResponseError> {
    let envelope = Envelope::from_queue(queue)?;
    let text = serde_json::to_string(&envelope).map_err(ResponseError::Serialize)?;
    log_encoded(queue, text.len());
    Ok(text)
}

/// Writes the envelope for `queue` to `writer` and flushes it.
///
/// # Errors
///
/// Fails under the same conditions as [`encode`], and with
/// [`ResponseError::Io`] when the writer fails.
pub fn write_envelope<W: Write>(
    writer: &mut W,
    queue: &ResponseQueue,
) -> Result<(), ResponseError> {
    let bytes = encode(queue)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Reads an envelope from its wire bytes.
///
/// # Errors
///
/// Returns [`ResponseError::Deserialize`] when the bytes are not a valid
/// envelope.
pub fn decode(bytes: &[u8]) -> Result<DecodedEnvelope, ResponseError> {
    serde_json::from_slice(bytes).map_err(|source| ResponseError::Deserialize {
        message: source.to_string(),
        source,
    })
}

fn log_encoded(queue: &ResponseQueue, length: usize) {
    debug!(
        target: "xjx_response::envelope",
        commands = queue.command_count(),
        has_return_value = queue.return_value().is_some(),
        bytes = length,
        "encoded response envelope"
    );
}
