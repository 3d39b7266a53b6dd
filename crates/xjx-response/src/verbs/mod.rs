//! Response command verbs.
//!
//! Every verb builds one command and hands it to
//! [`ResponseQueue::append_command`], so the merge-on-append rule applies to
//! verbs exactly as it does to hand-built commands. Verbs never validate their
//! inputs; element ids and scripts are passed through as text.

use serde_json::Value;

use crate::command::{CommandAttributes, CommandCode, Payload};
use crate::queue::ResponseQueue;
use crate::redirect;

/// Tenths of a second the client waits for stylesheets by default.
pub const DEFAULT_STYLESHEET_TIMEOUT_TENTHS: u32 = 600;

/// Script that resets the client's DOM node scratch list.
const DOM_RESET_SCRIPT: &str = "xjxElm = []";

impl ResponseQueue {
    /// Assigns `data` to `property` of element `target`.
    pub fn assign(
        &mut self,
        target: impl Into<String>,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::AssignProperty, target, property, data)
    }

    /// Appends `data` to `property` of element `target`.
    pub fn append(
        &mut self,
        target: impl Into<String>,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::AppendProperty, target, property, data)
    }

    /// Prepends `data` to `property` of element `target`.
    pub fn prepend(
        &mut self,
        target: impl Into<String>,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::PrependProperty, target, property, data)
    }

    /// Replaces every `search` in `property` of element `target` with `data`.
    pub fn replace(
        &mut self,
        target: impl Into<String>,
        property: impl Into<String>,
        search: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::ReplaceProperty)
            .with_target(target)
            .with_property(property);
        self.append_command(
            attributes,
            Payload::Replace {
                search: search.into(),
                replacement: data.into(),
            },
        )
    }

    /// Assigns an empty value to `property` of element `target`.
    pub fn clear_property(
        &mut self,
        target: impl Into<String>,
        property: impl Into<String>,
    ) -> &mut Self {
        self.assign(target, property, "")
    }

    /// Assigns `data` to a member of the request's context object.
    pub fn context_assign(
        &mut self,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.context_command(CommandCode::ContextAssign, property, data)
    }

    /// Appends `data` to a member of the request's context object.
    pub fn context_append(
        &mut self,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.context_command(CommandCode::ContextAppend, property, data)
    }

    /// Prepends `data` to a member of the request's context object.
    pub fn context_prepend(
        &mut self,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.context_command(CommandCode::ContextPrepend, property, data)
    }

    /// Clears a member of the request's context object.
    pub fn context_clear(&mut self, property: impl Into<String>) -> &mut Self {
        self.context_assign(property, "")
    }

    /// Asks the user to confirm; on cancel the client skips the next `count`
    /// commands.
    pub fn confirm_commands(&mut self, count: usize, message: impl Into<String>) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::Confirm).with_target(count.to_string());
        self.append_command(attributes, message.into())
    }

    /// Shows an alert dialog.
    pub fn alert(&mut self, message: impl Into<String>) -> &mut Self {
        self.append_command(CommandAttributes::new(CommandCode::Alert), message.into())
    }

    /// Sends a debug message to the client runtime.
    pub fn debug(&mut self, message: impl Into<String>) -> &mut Self {
        self.append_command(CommandAttributes::new(CommandCode::Debug), message.into())
    }

    /// Runs a script on the client.
    pub fn script(&mut self, script: impl Into<String>) -> &mut Self {
        self.append_command(CommandAttributes::new(CommandCode::RunScript), script.into())
    }

    /// Navigates the client to `url` immediately.
    pub fn redirect(&mut self, url: &str) -> &mut Self {
        self.redirect_after(url, 0)
    }

    /// Navigates the client to `url` after `delay_secs` seconds.
    pub fn redirect_after(&mut self, url: &str, delay_secs: u32) -> &mut Self {
        let target = redirect::reencode_query(url);
        self.script(redirect::navigation_script(&target, delay_secs))
    }

    /// Calls the client function `function` with `arguments`.
    pub fn call<I, A>(&mut self, function: impl Into<String>, arguments: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let attributes =
            CommandAttributes::new(CommandCode::CallFunction).with_extra("func", function.into());
        let values: Vec<Value> = arguments.into_iter().map(Into::into).collect();
        self.append_command(attributes, values)
    }

    /// Removes element `target` from the document.
    pub fn remove(&mut self, target: impl Into<String>) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::RemoveElement).with_target(target);
        self.append_command(attributes, Payload::empty())
    }

    /// Creates a `tag` element with id `id` inside `parent`.
    pub fn create(
        &mut self,
        parent: impl Into<String>,
        tag: impl Into<String>,
        id: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::CreateElement, parent, id, tag)
    }

    /// Inserts a `tag` element with id `id` before `before`.
    pub fn insert(
        &mut self,
        before: impl Into<String>,
        tag: impl Into<String>,
        id: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::InsertBefore, before, id, tag)
    }

    /// Inserts a `tag` element with id `id` after `after`.
    pub fn insert_after(
        &mut self,
        after: impl Into<String>,
        tag: impl Into<String>,
        id: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::InsertAfter, after, id, tag)
    }

    /// Creates an input of `input_type` named `name` with id `id` inside `parent`.
    pub fn create_input(
        &mut self,
        parent: &str,
        input_type: &str,
        name: &str,
        id: &str,
    ) -> &mut Self {
        self.input_command(CommandCode::CreateInput, parent, input_type, name, id)
    }

    /// Inserts an input of `input_type` named `name` with id `id` before `before`.
    pub fn insert_input(
        &mut self,
        before: &str,
        input_type: &str,
        name: &str,
        id: &str,
    ) -> &mut Self {
        self.input_command(CommandCode::InsertInputBefore, before, input_type, name, id)
    }

    /// Inserts an input of `input_type` named `name` with id `id` after `after`.
    pub fn insert_input_after(
        &mut self,
        after: &str,
        input_type: &str,
        name: &str,
        id: &str,
    ) -> &mut Self {
        self.input_command(CommandCode::InsertInputAfter, after, input_type, name, id)
    }

    /// Sets the `event` handler script of element `target`.
    pub fn set_event(
        &mut self,
        target: impl Into<String>,
        event: impl Into<String>,
        script: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::SetEvent, target, event, script)
    }

    /// Adds `handler` as a listener for `event` on element `target`.
    pub fn add_handler(
        &mut self,
        target: impl Into<String>,
        event: impl Into<String>,
        handler: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::AddHandler, target, event, handler)
    }

    /// Removes `handler` from `event` on element `target`.
    pub fn remove_handler(
        &mut self,
        target: impl Into<String>,
        event: impl Into<String>,
        handler: impl Into<String>,
    ) -> &mut Self {
        self.element_command(CommandCode::RemoveHandler, target, event, handler)
    }

    /// Defines client function `function` taking `arguments` with body `body`.
    pub fn set_function(
        &mut self,
        function: impl Into<String>,
        arguments: impl Into<String>,
        body: impl Into<String>,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::SetFunction)
            .with_extra("func", function.into())
            .with_property(arguments);
        self.append_command(attributes, body.into())
    }

    /// Wraps client function `function`.
    ///
    /// The first script runs before the original function and the second
    /// after it; the original's result is kept in `return_variable`.
    pub fn wrap_function<I, S>(
        &mut self,
        function: impl Into<String>,
        arguments: impl Into<String>,
        scripts: I,
        return_variable: impl Into<String>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = CommandAttributes::new(CommandCode::WrapFunction)
            .with_extra("func", function.into())
            .with_property(arguments)
            .with_extra("type", return_variable.into());
        let fragments: Vec<Value> = scripts
            .into_iter()
            .map(|script| Value::String(script.into()))
            .collect();
        self.append_command(attributes, fragments)
    }

    /// Loads the script at `file`.
    pub fn include_script(
        &mut self,
        file: impl Into<String>,
        script_type: Option<&str>,
        element_id: Option<&str>,
    ) -> &mut Self {
        self.script_file_command(CommandCode::IncludeScript, file, script_type, element_id)
    }

    /// Loads the script at `file` unless the client already has it.
    pub fn include_script_once(
        &mut self,
        file: impl Into<String>,
        script_type: Option<&str>,
        element_id: Option<&str>,
    ) -> &mut Self {
        self.script_file_command(CommandCode::IncludeScriptOnce, file, script_type, element_id)
    }

    /// Unloads the script at `file`, calling `unload` first when given.
    pub fn remove_script(&mut self, file: impl Into<String>, unload: Option<&str>) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::RemoveScript)
            .with_extra("unld", unload.unwrap_or_default());
        self.append_command(attributes, file.into())
    }

    /// Loads the stylesheet at `file`.
    pub fn include_css(&mut self, file: impl Into<String>, media: Option<&str>) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::IncludeStylesheet)
            .with_optional_extra("media", media);
        self.append_command(attributes, file.into())
    }

    /// Unloads the stylesheet at `file`.
    pub fn remove_css(&mut self, file: impl Into<String>, media: Option<&str>) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::RemoveStylesheet)
            .with_optional_extra("media", media);
        self.append_command(attributes, file.into())
    }

    /// Pauses the client until included stylesheets load or the timeout passes.
    ///
    /// [`DEFAULT_STYLESHEET_TIMEOUT_TENTHS`] is the customary timeout.
    pub fn wait_for_css(&mut self, timeout_tenths: u32) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::WaitForStylesheets)
            .with_property(timeout_tenths.to_string());
        self.append_command(attributes, Payload::empty())
    }

    /// Pauses the client until `condition` evaluates true or the timeout passes.
    pub fn wait_for(&mut self, condition: impl Into<String>, timeout_tenths: u32) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::WaitForCondition)
            .with_property(timeout_tenths.to_string());
        self.append_command(attributes, condition.into())
    }

    /// Pauses the client for `tenths` tenths of a second.
    pub fn sleep(&mut self, tenths: u32) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::Sleep).with_property(tenths.to_string());
        self.append_command(attributes, Payload::empty())
    }

    /// Resets the client's DOM node scratch list before DOM commands.
    pub fn dom_start_response(&mut self) -> &mut Self {
        self.script(DOM_RESET_SCRIPT)
    }

    /// Creates a `tag` node held in client variable `variable`.
    pub fn dom_create_element(
        &mut self,
        variable: impl Into<String>,
        tag: impl Into<String>,
    ) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::CreateNode).with_extra("tgt", variable.into());
        self.append_command(attributes, tag.into())
    }

    /// Sets attribute `key` to `value` on node variable `variable`.
    pub fn dom_set_attribute(
        &mut self,
        variable: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(CommandCode::SetAttribute)
            .with_extra("tgt", variable.into())
            .with_extra("key", key.into());
        self.append_command(attributes, value.into())
    }

    /// Removes the children of `parent`, optionally skipping the first `skip`
    /// and stopping after `remove`.
    pub fn dom_remove_children(
        &mut self,
        parent: impl Into<String>,
        skip: Option<u32>,
        remove: Option<u32>,
    ) -> &mut Self {
        let mut attributes = CommandAttributes::new(CommandCode::RemoveChildren);
        if let Some(count) = skip.filter(|count| *count > 0) {
            attributes = attributes.with_extra("skip", count);
        }
        if let Some(count) = remove.filter(|count| *count > 0) {
            attributes = attributes.with_extra("remove", count);
        }
        self.append_command(attributes, parent.into())
    }

    /// Appends node variable `variable` to `parent`.
    pub fn dom_append_child(
        &mut self,
        parent: impl Into<String>,
        variable: impl Into<String>,
    ) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::AppendChild).with_extra("par", parent.into());
        self.append_command(attributes, variable.into())
    }

    /// Inserts node variable `variable` before `target`.
    pub fn dom_insert_before(
        &mut self,
        target: impl Into<String>,
        variable: impl Into<String>,
    ) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::InsertBeforeNode).with_extra("tgt", target.into());
        self.append_command(attributes, variable.into())
    }

    /// Inserts node variable `variable` after `target`.
    pub fn dom_insert_after(
        &mut self,
        target: impl Into<String>,
        variable: impl Into<String>,
    ) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::InsertAfterNode).with_extra("tgt", target.into());
        self.append_command(attributes, variable.into())
    }

    /// Appends a text node containing `text` to `parent`.
    pub fn dom_append_text(
        &mut self,
        parent: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        let attributes =
            CommandAttributes::new(CommandCode::AppendText).with_extra("par", parent.into());
        self.append_command(attributes, text.into())
    }

    /// Resets the client's DOM node scratch list after DOM commands.
    pub fn dom_end_response(&mut self) -> &mut Self {
        self.script(DOM_RESET_SCRIPT)
    }

    fn element_command(
        &mut self,
        code: CommandCode,
        target: impl Into<String>,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(code)
            .with_target(target)
            .with_property(property);
        self.append_command(attributes, data.into())
    }

    fn context_command(
        &mut self,
        code: CommandCode,
        property: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.append_command(CommandAttributes::new(code).with_property(property), data.into())
    }

    fn input_command(
        &mut self,
        code: CommandCode,
        anchor: &str,
        input_type: &str,
        name: &str,
        id: &str,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(code)
            .with_target(anchor)
            .with_property(id)
            .with_extra("type", input_type);
        self.append_command(attributes, name)
    }

    fn script_file_command(
        &mut self,
        code: CommandCode,
        file: impl Into<String>,
        script_type: Option<&str>,
        element_id: Option<&str>,
    ) -> &mut Self {
        let attributes = CommandAttributes::new(code)
            .with_optional_extra("type", script_type)
            .with_optional_extra("elm_id", element_id);
        self.append_command(attributes, file.into())
    }
}
