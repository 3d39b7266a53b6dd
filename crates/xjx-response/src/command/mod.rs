//! Command types carried by a response queue.
//!
//! A [`Command`] is one instruction for the browser runtime. It always carries
//! a [`CommandCode`] and a [`Payload`], and optionally names the element it
//! targets, the property it mutates, and any auxiliary fields its code needs.
//! Field names on the wire follow the browser runtime: `cmd`, `id`, `prop`,
//! `data`, with auxiliary fields flattened beside them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Wire field names owned by [`Command`] itself; extras never use them.
pub const RESERVED_KEYS: [&str; 4] = ["cmd", "id", "prop", "data"];

/// Tag identifying the operation a command performs.
///
/// # Example
///
/// ```
/// use xjx_response::CommandCode;
///
/// assert_eq!(CommandCode::RunScript.as_str(), "js");
/// assert_eq!(CommandCode::ContextAssign.to_string(), "c:as");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCode {
    /// Assign a value to an element property.
    #[serde(rename = "as")]
    AssignProperty,
    /// Append a value to an element property.
    #[serde(rename = "ap")]
    AppendProperty,
    /// Prepend a value to an element property.
    #[serde(rename = "pp")]
    PrependProperty,
    /// Search and replace within an element property.
    #[serde(rename = "rp")]
    ReplaceProperty,
    /// Remove an element from the document.
    #[serde(rename = "rm")]
    RemoveElement,
    /// Create an element inside a parent.
    #[serde(rename = "ce")]
    CreateElement,
    /// Insert an element before a reference element.
    #[serde(rename = "ie")]
    InsertBefore,
    /// Insert an element after a reference element.
    #[serde(rename = "ia")]
    InsertAfter,
    /// Create an input element inside a parent.
    #[serde(rename = "ci")]
    CreateInput,
    /// Insert an input element before a reference element.
    #[serde(rename = "ii")]
    InsertInputBefore,
    /// Insert an input element after a reference element.
    #[serde(rename = "iia")]
    InsertInputAfter,
    /// Set an element's event handler script.
    #[serde(rename = "ev")]
    SetEvent,
    /// Add an event handler function.
    #[serde(rename = "ah")]
    AddHandler,
    /// Remove an event handler function.
    #[serde(rename = "rh")]
    RemoveHandler,
    /// Define a function on the client.
    #[serde(rename = "sf")]
    SetFunction,
    /// Wrap an existing client function.
    #[serde(rename = "wpf")]
    WrapFunction,
    /// Load a script file.
    #[serde(rename = "in")]
    IncludeScript,
    /// Load a script file unless it is already present.
    #[serde(rename = "ino")]
    IncludeScriptOnce,
    /// Unload a script file.
    #[serde(rename = "rjs")]
    RemoveScript,
    /// Load a stylesheet.
    #[serde(rename = "css")]
    IncludeStylesheet,
    /// Unload a stylesheet.
    #[serde(rename = "rcss")]
    RemoveStylesheet,
    /// Pause until included stylesheets have loaded.
    #[serde(rename = "wcss")]
    WaitForStylesheets,
    /// Pause until a script condition holds.
    #[serde(rename = "wf")]
    WaitForCondition,
    /// Pause for a number of tenths of a second.
    #[serde(rename = "s")]
    Sleep,
    /// Ask the user to confirm, skipping following commands on cancel.
    #[serde(rename = "cc")]
    Confirm,
    /// Show an alert dialog.
    #[serde(rename = "al")]
    Alert,
    /// Emit a debug message on the client.
    #[serde(rename = "dbg")]
    Debug,
    /// Run a script.
    #[serde(rename = "js")]
    RunScript,
    /// Call an existing client function.
    #[serde(rename = "jc")]
    CallFunction,
    /// Assign a member of the request's context object.
    #[serde(rename = "c:as")]
    ContextAssign,
    /// Append to a member of the request's context object.
    #[serde(rename = "c:ap")]
    ContextAppend,
    /// Prepend to a member of the request's context object.
    #[serde(rename = "c:pp")]
    ContextPrepend,
    /// Create a DOM node held in a client variable.
    #[serde(rename = "DCE")]
    CreateNode,
    /// Set an attribute on a DOM node variable.
    #[serde(rename = "DSA")]
    SetAttribute,
    /// Remove the children of a DOM node.
    #[serde(rename = "DRC")]
    RemoveChildren,
    /// Append a DOM node variable to a parent.
    #[serde(rename = "DAC")]
    AppendChild,
    /// Insert a DOM node variable before a target.
    #[serde(rename = "DIB")]
    InsertBeforeNode,
    /// Insert a DOM node variable after a target.
    #[serde(rename = "DIA")]
    InsertAfterNode,
    /// Append a text node to a parent.
    #[serde(rename = "DAT")]
    AppendText,
    /// Reserved marker appended when a queue is cleared.
    #[serde(rename = "nop")]
    Noop,
}

impl CommandCode {
    /// Returns the wire tag for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AssignProperty => "as",
            Self::AppendProperty => "ap",
            Self::PrependProperty => "pp",
            Self::ReplaceProperty => "rp",
            Self::RemoveElement => "rm",
            Self::CreateElement => "ce",
            Self::InsertBefore => "ie",
            Self::InsertAfter => "ia",
            Self::CreateInput => "ci",
            Self::InsertInputBefore => "ii",
            Self::InsertInputAfter => "iia",
            Self::SetEvent => "ev",
            Self::AddHandler => "ah",
            Self::RemoveHandler => "rh",
            Self::SetFunction => "sf",
            Self::WrapFunction => "wpf",
            Self::IncludeScript => "in",
            Self::IncludeScriptOnce => "ino",
            Self::RemoveScript => "rjs",
            Self::IncludeStylesheet => "css",
            Self::RemoveStylesheet => "rcss",
            Self::WaitForStylesheets => "wcss",
            Self::WaitForCondition => "wf",
            Self::Sleep => "s",
            Self::Confirm => "cc",
            Self::Alert => "al",
            Self::Debug => "dbg",
            Self::RunScript => "js",
            Self::CallFunction => "jc",
            Self::ContextAssign => "c:as",
            Self::ContextAppend => "c:ap",
            Self::ContextPrepend => "c:pp",
            Self::CreateNode => "DCE",
            Self::SetAttribute => "DSA",
            Self::RemoveChildren => "DRC",
            Self::AppendChild => "DAC",
            Self::InsertBeforeNode => "DIB",
            Self::InsertAfterNode => "DIA",
            Self::AppendText => "DAT",
            Self::Noop => "nop",
        }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data carried by a command.
///
/// Serialised untagged: text as a JSON string, lists as a JSON array and
/// search/replace pairs as `{"s": .., "r": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Plain text, the payload of most commands.
    Text(String),
    /// Ordered values such as call arguments or wrapper script fragments.
    List(Vec<Value>),
    /// Search/replace pair used by property replacement.
    Replace {
        /// Text to search for.
        #[serde(rename = "s")]
        search: String,
        /// Text substituted for each match.
        #[serde(rename = "r")]
        replacement: String,
    },
}

impl Payload {
    /// Returns the text content when this is a text payload.
    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::List(_) | Self::Replace { .. } => None,
        }
    }

    pub(crate) const fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<Value>> for Payload {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

/// Descriptor for a command before its payload is attached.
///
/// # Example
///
/// ```
/// use xjx_response::{CommandAttributes, CommandCode};
///
/// let attributes = CommandAttributes::new(CommandCode::AssignProperty)
///     .with_target("status")
///     .with_property("innerHTML");
/// assert_eq!(attributes.target_id(), Some("status"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandAttributes {
    code: CommandCode,
    target_id: Option<String>,
    property: Option<String>,
    extra: BTreeMap<String, Value>,
}

impl CommandAttributes {
    /// Starts a descriptor for the given code.
    #[must_use]
    pub const fn new(code: CommandCode) -> Self {
        Self {
            code,
            target_id: None,
            property: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the addressed element id.
    #[must_use]
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    /// Sets the mutated property name.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Adds an auxiliary field, replacing any earlier value under the same key.
    ///
    /// Keys in [`RESERVED_KEYS`] are dropped; set those through
    /// [`with_target`](Self::with_target), [`with_property`](Self::with_property)
    /// or the payload instead.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let name: String = key.into();
        if RESERVED_KEYS.contains(&name.as_str()) {
            warn!(
                target: "xjx_response::command",
                code = self.code.as_str(),
                key = %name,
                "ignoring extra field that names a command field"
            );
            return self;
        }
        self.extra.insert(name, value.into());
        self
    }

    /// Adds an auxiliary text field only when the value is present and non-empty.
    #[must_use]
    pub fn with_optional_extra(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|text| !text.is_empty()) {
            Some(text) => self.with_extra(key, text),
            None => self,
        }
    }

    /// Returns the command code.
    #[must_use]
    pub const fn code(&self) -> CommandCode {
        self.code
    }

    /// Returns the addressed element id, if any.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Returns the property name, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Attaches a payload, producing a complete command.
    #[must_use]
    pub fn into_command(self, payload: Payload) -> Command {
        Command {
            code: self.code,
            target_id: self.target_id,
            property: self.property,
            extra: self.extra,
            payload,
        }
    }
}

/// One queued instruction for the browser runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "cmd")]
    code: CommandCode,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    target_id: Option<String>,
    #[serde(rename = "prop", default, skip_serializing_if = "Option::is_none")]
    property: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
    #[serde(rename = "data")]
    payload: Payload,
}

impl Command {
    /// Creates a command from a code and payload with no other fields.
    #[must_use]
    pub fn new(code: CommandCode, payload: impl Into<Payload>) -> Self {
        CommandAttributes::new(code).into_command(payload.into())
    }

    /// Creates the marker appended when a queue is cleared.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(CommandCode::Noop, Payload::empty())
    }

    /// Returns the command code.
    #[must_use]
    pub const fn code(&self) -> CommandCode {
        self.code
    }

    /// Returns the addressed element id, if any.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Returns the property name, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Returns an auxiliary field by key.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns all auxiliary fields in key order.
    #[must_use]
    pub const fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) const fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}
