//! Response plugins and their binding to a queue.
//!
//! A plugin is a named source of commands. Once resolved from a
//! [`PluginRegistry`](crate::PluginRegistry), it is paired with the queue being
//! built through a [`PluginBinding`], and every command it adds is tagged with
//! its name under the `plg` extra field.

use std::fmt;
use std::sync::Arc;

use crate::command::{CommandAttributes, Payload};
use crate::queue::ResponseQueue;

/// A named capability that contributes commands to responses.
///
/// Implementations are shared across concurrently handled requests, so they
/// must be `Send + Sync` and should keep any per-request state out of `self`.
///
/// # Example
///
/// ```
/// use xjx_response::ResponsePlugin;
///
/// #[derive(Debug)]
/// struct Highlighter;
///
/// impl ResponsePlugin for Highlighter {
///     fn name(&self) -> &str {
///         "highlight"
///     }
/// }
///
/// assert_eq!(Highlighter.name(), "highlight");
/// ```
pub trait ResponsePlugin: fmt::Debug + Send + Sync {
    /// Returns the name the plugin is registered under.
    fn name(&self) -> &str;
}

/// A resolved plugin paired with the queue it writes to.
#[derive(Debug)]
pub struct PluginBinding<'q> {
    queue: &'q mut ResponseQueue,
    plugin: Arc<dyn ResponsePlugin>,
}

impl<'q> PluginBinding<'q> {
    pub(crate) const fn new(queue: &'q mut ResponseQueue, plugin: Arc<dyn ResponsePlugin>) -> Self {
        Self { queue, plugin }
    }

    /// Returns the plugin name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.plugin.name()
    }

    /// Returns the bound plugin.
    #[must_use]
    pub const fn plugin(&self) -> &Arc<dyn ResponsePlugin> {
        &self.plugin
    }

    /// Appends a command attributed to the bound plugin.
    pub fn add_command(
        &mut self,
        attributes: CommandAttributes,
        payload: impl Into<Payload>,
    ) -> &mut Self {
        self.queue
            .add_plugin_command(self.plugin.as_ref(), attributes, payload);
        self
    }

    /// Returns the queue the plugin writes to.
    pub fn queue(&mut self) -> &mut ResponseQueue {
        self.queue
    }
}
