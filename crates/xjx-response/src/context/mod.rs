//! Per-host state shared by every request handler.
//!
//! A [`ResponseContext`] owns the configuration and the plugin registry. Both
//! are read-only once the context is built, so one context can sit behind an
//! `Arc` and serve concurrently handled requests, each of which takes its own
//! queue from [`ResponseContext::new_response`].

use std::sync::Arc;

use tracing::debug;
use xjx_config::Config;

use crate::plugin::ResponsePlugin;
use crate::queue::ResponseQueue;
use crate::registry::PluginRegistry;

/// Configuration and plugins for one host.
#[derive(Debug, Default)]
pub struct ResponseContext {
    config: Config,
    registry: PluginRegistry,
}

impl ResponseContext {
    /// Creates a context from a configuration and a populated registry.
    #[must_use]
    pub const fn new(config: Config, registry: PluginRegistry) -> Self {
        Self { config, registry }
    }

    /// Returns the shared configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the plugin registry.
    #[must_use]
    pub const fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Creates an empty queue for one request.
    #[must_use]
    pub fn new_response(&self) -> ResponseQueue {
        debug!(
            target: "xjx_response::context",
            plugins = self.registry.len(),
            "creating response queue"
        );
        ResponseQueue::with_config(&self.config)
    }

    /// Looks up a plugin by name.
    #[must_use]
    pub fn plugin(&self, name: &str) -> Option<Arc<dyn ResponsePlugin>> {
        self.registry.get_capability(name)
    }
}
