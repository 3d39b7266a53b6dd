//! The ordered command queue built while handling one request.
//!
//! Commands enter through [`ResponseQueue::append_command`], which applies the
//! merge-on-append rule: a script following a script, or a property append
//! following an append to the same element property, is folded into the
//! previous entry instead of growing the queue. Only the last entry is ever
//! compared. Bulk merges through [`ResponseQueue::merge_from`] are plain
//! concatenations and never fold across the boundary.

use std::num::FpCategory;

use serde_json::Value;
use tracing::{debug, trace};
use xjx_config::{Config, DEFAULT_CHARACTER_ENCODING};

use crate::command::{Command, CommandAttributes, CommandCode, Payload};
use crate::error::ResponseError;
use crate::plugin::{PluginBinding, ResponsePlugin};
use crate::registry::PluginRegistry;

/// Content type of the only envelope format the encoder produces.
pub const JSON_CONTENT_TYPE: &str = "application/json";

const SCRIPT_SEPARATOR: &str = "; ";
const APPEND_SEPARATOR: &str = " ";

/// Extra field naming the plugin that produced a command.
pub const PLUGIN_EXTRA_KEY: &str = "plg";

/// Ordered commands plus the optional return value for one response.
///
/// # Example
///
/// ```
/// use xjx_response::ResponseQueue;
///
/// let mut queue = ResponseQueue::new();
/// queue.script("a()").script("b()");
/// assert_eq!(queue.command_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseQueue {
    commands: Vec<Command>,
    return_value: Option<Value>,
    content_type: String,
    character_encoding: String,
    output_entities: bool,
}

impl Default for ResponseQueue {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            return_value: None,
            content_type: JSON_CONTENT_TYPE.to_owned(),
            character_encoding: DEFAULT_CHARACTER_ENCODING.to_owned(),
            output_entities: false,
        }
    }
}

/// Input accepted by [`ResponseQueue::merge_from`].
#[derive(Debug, Clone, PartialEq)]
pub enum MergeSource {
    /// A queue built by another handler; its return value travels with it.
    Queue(ResponseQueue),
    /// Bare commands without a return value.
    Commands(Vec<Command>),
    /// Dynamically shaped data, typically decoded from JSON.
    Raw(Value),
}

impl From<ResponseQueue> for MergeSource {
    fn from(queue: ResponseQueue) -> Self {
        Self::Queue(queue)
    }
}

impl From<Vec<Command>> for MergeSource {
    fn from(commands: Vec<Command>) -> Self {
        Self::Commands(commands)
    }
}

impl From<Value> for MergeSource {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl ResponseQueue {
    /// Creates an empty queue with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue seeded from the shared configuration.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            character_encoding: config.character_encoding().to_owned(),
            output_entities: config.output_entities(),
            ..Self::default()
        }
    }

    /// Appends a command, folding it into the previous entry when the
    /// merge-on-append rule applies.
    pub fn append_command(
        &mut self,
        attributes: CommandAttributes,
        payload: impl Into<Payload>,
    ) -> &mut Self {
        let incoming = attributes.into_command(payload.into());
        if let Some(previous) = self.commands.last_mut()
            && fold_into(previous, &incoming)
        {
            trace!(
                target: "xjx_response::queue",
                code = %incoming.code(),
                "merged command into previous entry"
            );
            return self;
        }
        self.commands.push(incoming);
        self
    }

    /// Appends a command attributed to a plugin.
    pub fn add_plugin_command(
        &mut self,
        plugin: &dyn ResponsePlugin,
        attributes: CommandAttributes,
        payload: impl Into<Payload>,
    ) -> &mut Self {
        self.append_command(attributes.with_extra(PLUGIN_EXTRA_KEY, plugin.name()), payload)
    }

    /// Appends the reserved no-op marker.
    ///
    /// Earlier commands stay in place; the marker only ends merge adjacency
    /// with whatever was queued before it.
    pub fn clear(&mut self) -> &mut Self {
        debug!(
            target: "xjx_response::queue",
            queued = self.commands.len(),
            "appending clear marker"
        );
        self.commands.push(Command::noop());
        self
    }

    /// Concatenates another queue or command list with this one.
    ///
    /// With `prepend` the incoming commands are placed before the existing
    /// ones, otherwise after them. A return value carried by an incoming queue
    /// replaces this queue's value in either direction.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::InvalidMergeData`] when a raw value is neither
    /// empty nor a list of commands.
    pub fn merge_from(
        &mut self,
        source: impl Into<MergeSource>,
        prepend: bool,
    ) -> Result<(), ResponseError> {
        match source.into() {
            MergeSource::Queue(other) => {
                let (commands, return_value) = other.into_parts();
                self.splice(commands, prepend);
                if return_value.is_some() {
                    self.return_value = return_value;
                }
            }
            MergeSource::Commands(commands) => self.splice(commands, prepend),
            MergeSource::Raw(value) => self.splice(commands_from_value(value)?, prepend),
        }
        Ok(())
    }

    /// Resolves a plugin by name and binds it to this queue.
    ///
    /// Returns `None` when the registry has no plugin with that name.
    pub fn plugin<'q>(
        &'q mut self,
        registry: &PluginRegistry,
        name: &str,
    ) -> Option<PluginBinding<'q>> {
        let Some(plugin) = registry.get_capability(name) else {
            debug!(target: "xjx_response::queue", plugin = name, "plugin not registered");
            return None;
        };
        Some(PluginBinding::new(self, plugin))
    }

    /// Stores the value returned to synchronous callers.
    pub fn set_return_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.return_value = Some(value.into());
        self
    }

    /// Returns the value for synchronous callers, if one was set.
    #[must_use]
    pub const fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Returns the queued commands in order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub const fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no commands are queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the envelope content type.
    #[must_use]
    pub const fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    /// Overrides the envelope content type.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.content_type = content_type.into();
        self
    }

    /// Returns the character set the transport should advertise.
    #[must_use]
    pub const fn character_encoding(&self) -> &str {
        self.character_encoding.as_str()
    }

    /// Overrides the character set for this response.
    pub fn set_character_encoding(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.character_encoding = encoding.into();
        self
    }

    /// Returns whether the transport should convert special characters to entities.
    #[must_use]
    pub const fn output_entities(&self) -> bool {
        self.output_entities
    }

    /// Overrides the entity-output flag for this response.
    pub const fn set_output_entities(&mut self, enabled: bool) -> &mut Self {
        self.output_entities = enabled;
        self
    }

    /// Consumes the queue, returning its commands.
    #[must_use]
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub(crate) fn into_parts(self) -> (Vec<Command>, Option<Value>) {
        (self.commands, self.return_value)
    }

    pub(crate) fn from_parts(commands: Vec<Command>, return_value: Option<Value>) -> Self {
        Self {
            commands,
            return_value,
            ..Self::default()
        }
    }

    fn splice(&mut self, mut incoming: Vec<Command>, prepend: bool) {
        debug!(
            target: "xjx_response::queue",
            incoming = incoming.len(),
            queued = self.commands.len(),
            prepend,
            "merging commands"
        );
        if prepend {
            incoming.append(&mut self.commands);
            self.commands = incoming;
        } else {
            self.commands.append(&mut incoming);
        }
    }
}

/// Separator used when `incoming` may be folded into `previous`.
fn merge_separator(previous: &Command, incoming: &Command) -> Option<&'static str> {
    match (previous.code(), incoming.code()) {
        (CommandCode::RunScript, CommandCode::RunScript) => Some(SCRIPT_SEPARATOR),
        (CommandCode::AppendProperty, CommandCode::AppendProperty)
            if same_slot(previous, incoming) =>
        {
            Some(APPEND_SEPARATOR)
        }
        _ => None,
    }
}

/// Both commands name the same element and property. Absent fields never match.
fn same_slot(previous: &Command, incoming: &Command) -> bool {
    let targets = previous.target_id().zip(incoming.target_id());
    let properties = previous.property().zip(incoming.property());
    matches!(
        (targets, properties),
        (Some((a, b)), Some((c, d))) if a == b && c == d
    )
}

fn fold_into(previous: &mut Command, incoming: &Command) -> bool {
    let Some(separator) = merge_separator(previous, incoming) else {
        return false;
    };
    match (previous.payload_mut(), incoming.payload()) {
        (Payload::Text(existing), Payload::Text(addition)) => {
            existing.push_str(separator);
            existing.push_str(addition);
            true
        }
        _ => false,
    }
}

fn commands_from_value(value: Value) -> Result<Vec<Command>, ResponseError> {
    if is_empty_value(&value) {
        return Ok(Vec::new());
    }
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|source| ResponseError::InvalidMergeData {
                    message: "list element is not a command".to_owned(),
                    source: Some(source),
                })
            })
            .collect(),
        other => Err(ResponseError::InvalidMergeData {
            message: format!("expected a queue or command list, found {}", kind_of(&other)),
            source: None,
        }),
    }
}

/// Raw merge input that counts as "nothing to merge".
///
/// Follows loose truthiness: `0`, `0.0` and the string `"0"` are empty along
/// with null, `false` and empty strings, lists and objects.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float.classify() == FpCategory::Zero),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
