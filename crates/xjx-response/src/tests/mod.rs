//! Crate-level integration and BDD tests.

use serde_json::json;
use xjx_config::Config;

use crate::command::{CommandAttributes, CommandCode};
use crate::context::ResponseContext;
use crate::envelope;
use crate::plugin::ResponsePlugin;
use crate::registry::PluginRegistry;


/// Plugin stub identified only by its name.
#[derive(Debug)]
pub(crate) struct NamedPlugin {
    name: String,
}

impl NamedPlugin {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl ResponsePlugin for NamedPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

#[test]
fn end_to_end_request_with_plugin_and_sub_response() {
    let mut registry = PluginRegistry::new();
    registry
        .register(NamedPlugin::new("tabs"))
        .expect("register");
    let context = ResponseContext::new(Config::default(), registry);

    let mut sub_response = context.new_response();
    sub_response.assign("side", "innerHTML", "loaded").set_return_value(1);

    let mut response = context.new_response();
    response.script("a()").script("b()");
    response
        .plugin(context.registry(), "tabs")
        .expect("tabs is registered")
        .add_command(
            CommandAttributes::new(CommandCode::AssignProperty)
                .with_target("tab-2")
                .with_property("className"),
            "active",
        );
    response.merge_from(sub_response, true).expect("merge");

    let text = envelope::encode_to_string(&response).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(
        value,
        json!({
            "xjxrv": 1,
            "xjxobj": [
                {"cmd": "as", "id": "side", "prop": "innerHTML", "data": "loaded"},
                {"cmd": "js", "data": "a(); b()"},
                {"cmd": "as", "id": "tab-2", "prop": "className", "plg": "tabs", "data": "active"}
            ]
        })
    );
}
