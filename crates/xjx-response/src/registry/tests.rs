//! Unit tests for the plugin registry.

use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};

use super::*;
use crate::error::ResponseError;
use crate::tests::NamedPlugin;

#[fixture]
fn populated_registry() -> PluginRegistry {
    let mut r = PluginRegistry::new();
    r.register(NamedPlugin::new("tabs")).expect("register tabs");
    r.register(NamedPlugin::new("modal")).expect("register modal");
    r
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn new_registry_is_empty() {
    let r = PluginRegistry::new();
    assert!(r.is_empty());
    assert_eq!(r.len(), 0);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn register_and_resolve() {
    let mut r = PluginRegistry::new();
    r.register(NamedPlugin::new("tabs")).expect("register");
    assert_eq!(r.len(), 1);
    let plugin = r.get_capability("tabs").expect("resolve tabs");
    assert_eq!(plugin.name(), "tabs");
}

#[test]
fn register_rejects_duplicate() {
    let mut r = PluginRegistry::new();
    r.register(NamedPlugin::new("tabs")).expect("first register");
    let err = r
        .register(NamedPlugin::new("tabs"))
        .expect_err("duplicate should fail");
    assert!(matches!(err, ResponseError::PluginRegistration { .. }));
    assert!(err.to_string().contains("already registered"));
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
fn register_rejects_blank_names(#[case] name: &str) {
    let mut r = PluginRegistry::new();
    let err = r
        .register(NamedPlugin::new(name))
        .expect_err("blank name should fail");
    assert!(matches!(err, ResponseError::PluginRegistration { .. }));
    assert!(r.is_empty());
}

#[test]
fn register_shared_keeps_the_same_instance() {
    let shared: Arc<dyn ResponsePlugin> = Arc::new(NamedPlugin::new("tabs"));
    let mut r = PluginRegistry::new();
    r.register_shared(Arc::clone(&shared)).expect("register");
    let resolved = r.get_capability("tabs").expect("resolve");
    assert!(Arc::ptr_eq(&resolved, &shared));
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[rstest]
fn get_capability_returns_none_for_missing(populated_registry: PluginRegistry) {
    assert!(populated_registry.get_capability("nonexistent").is_none());
    assert!(!populated_registry.contains("nonexistent"));
}

#[rstest]
fn lookup_is_case_sensitive(populated_registry: PluginRegistry) {
    assert!(populated_registry.contains("tabs"));
    assert!(!populated_registry.contains("Tabs"));
}

#[rstest]
fn names_are_sorted(populated_registry: PluginRegistry) {
    assert_eq!(populated_registry.names(), vec!["modal", "tabs"]);
}

#[rstest]
fn registry_supports_concurrent_reads(populated_registry: PluginRegistry) {
    let shared = Arc::new(populated_registry);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&shared);
            thread::spawn(move || registry.get_capability("tabs").is_some())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("reader thread"));
    }
}
