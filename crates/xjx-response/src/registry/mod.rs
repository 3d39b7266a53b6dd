//! Plugin registry for name-based capability lookup.
//!
//! The [`PluginRegistry`] stores response plugins keyed by name. It is built
//! once at startup and only read afterwards, so a single registry can be
//! shared between concurrently handled requests. Duplicate and blank names are
//! rejected at registration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::ResponseError;
use crate::plugin::ResponsePlugin;

/// Registry of available response plugins.
///
/// # Example
///
/// ```
/// use xjx_response::{PluginRegistry, ResponsePlugin};
///
/// #[derive(Debug)]
/// struct Tabs;
///
/// impl ResponsePlugin for Tabs {
///     fn name(&self) -> &str {
///         "tabs"
///     }
/// }
///
/// let mut registry = PluginRegistry::new();
/// registry.register(Tabs).expect("registration succeeds");
/// assert!(registry.get_capability("tabs").is_some());
/// assert!(registry.get_capability("modal").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn ResponsePlugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under the name it reports.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::PluginRegistration`] if the name is blank or a
    /// plugin with the same name is already registered.
    pub fn register<P>(&mut self, plugin: P) -> Result<(), ResponseError>
    where
        P: ResponsePlugin + 'static,
    {
        self.register_shared(Arc::new(plugin))
    }

    /// Registers an already shared plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::PluginRegistration`] under the same conditions
    /// as [`PluginRegistry::register`].
    pub fn register_shared(
        &mut self,
        plugin: Arc<dyn ResponsePlugin>,
    ) -> Result<(), ResponseError> {
        let name = plugin.name().to_owned();
        if name.trim().is_empty() {
            return Err(ResponseError::PluginRegistration {
                message: "plugin name must not be empty".to_owned(),
            });
        }
        if self.plugins.contains_key(&name) {
            return Err(ResponseError::PluginRegistration {
                message: format!("plugin '{name}' is already registered"),
            });
        }
        debug!(target: "xjx_response::registry", plugin = %name, "registered plugin");
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Looks up a plugin by name.
    #[must_use]
    pub fn get_capability(&self, name: &str) -> Option<Arc<dyn ResponsePlugin>> {
        self.plugins.get(name).map(Arc::clone)
    }

    /// Returns `true` when a plugin is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` when no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests;
