//! Server-side response queue for browser-driving AJAX handlers.
//!
//! A request handler builds a [`ResponseQueue`]: an ordered list of
//! [`Command`]s telling the browser runtime what to do (assign an element
//! property, run a script, load a stylesheet, redirect) plus an optional
//! return value for synchronous callers. Once the handler is finished, the
//! queue is encoded exactly once into a JSON envelope by the [`envelope`]
//! module.
//!
//! # Merge-on-append
//!
//! Two kinds of consecutive command are folded into one entry as they are
//! queued: a script following a script (joined with `"; "`), and a property
//! append following an append to the same element property (joined with a
//! space). Only the last queued command is ever examined, so anything queued
//! between the two keeps them apart.
//!
//! # Plugins
//!
//! A [`ResponsePlugin`] is a named source of commands. Plugins are registered
//! once in a [`PluginRegistry`], which a [`ResponseContext`] shares across
//! requests. Commands added through a [`PluginBinding`] carry the plugin's
//! name.
//!
//! # Example
//!
//! ```rust
//! use xjx_config::Config;
//! use xjx_response::{PluginRegistry, ResponseContext, envelope};
//!
//! let context = ResponseContext::new(Config::default(), PluginRegistry::new());
//! let mut response = context.new_response();
//! response
//!     .assign("status", "innerHTML", "Saved")
//!     .script("refresh()")
//!     .script("focus()");
//!
//! let json = envelope::encode_to_string(&response).expect("encoding succeeds");
//! assert_eq!(
//!     json,
//!     r#"{"xjxobj":[{"cmd":"as","id":"status","prop":"innerHTML","data":"Saved"},{"cmd":"js","data":"refresh(); focus()"}]}"#
//! );
//! ```

pub mod command;
pub mod context;
pub mod envelope;
pub mod error;
pub mod plugin;
pub mod queue;
pub mod redirect;
pub mod registry;
pub mod telemetry;
mod verbs;

#[cfg(test)]
mod tests;

pub use self::command::{Command, CommandAttributes, CommandCode, Payload};
pub use self::context::ResponseContext;
pub use self::envelope::{DecodedEnvelope, Envelope};
pub use self::error::ResponseError;
pub use self::plugin::{PluginBinding, ResponsePlugin};
pub use self::queue::{JSON_CONTENT_TYPE, MergeSource, PLUGIN_EXTRA_KEY, ResponseQueue};
pub use self::registry::PluginRegistry;
pub use self::telemetry::{TelemetryError, TelemetryHandle};
pub use self::verbs::DEFAULT_STYLESHEET_TIMEOUT_TENTHS;
