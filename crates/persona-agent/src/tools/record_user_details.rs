use std::sync::Arc;

use persona_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::notify::Notifier;

const NAME_NOT_PROVIDED: &str = "Name not provided";
const NOT_PROVIDED: &str = "not provided";

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecordUserDetailsParameters {
    #[schemars(description = "The email address of this user.")]
    email: String,
    #[schemars(description = "The user's name, if they provided it.")]
    name: Option<String>,
    #[schemars(description = "Extra context worth recording.")]
    notes: Option<String>,
}

/// A tool that records a prospective contact's details.
///
/// The record goes out through the notification channel; the tool has
/// no success branching of its own and always succeeds when invoked
/// with valid arguments.
pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
    parameter_schema: Value,
}

impl RecordUserDetailsTool {
    /// Creates the tool with the channel that records are delivered to.
    #[inline]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        RecordUserDetailsTool {
            notifier,
            parameter_schema: schema_for!(RecordUserDetailsParameters)
                .to_value(),
        }
    }
}

impl Tool for RecordUserDetailsTool {
    type Input = RecordUserDetailsParameters;

    fn name(&self) -> &str {
        "record_user_details"
    }

    fn description(&self) -> &str {
        "Use this tool to record that a user is interested in being in \
         touch and provided an email address"
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let notifier = Arc::clone(&self.notifier);
        async move {
            let RecordUserDetailsParameters { email, name, notes } = input;
            let name = name.unwrap_or_else(|| NAME_NOT_PROVIDED.to_owned());
            let notes = notes.unwrap_or_else(|| NOT_PROVIDED.to_owned());
            notifier.notify(&format!(
                "Recording interest from {name} with email {email} and \
                 notes {notes}"
            ));
            Ok(json!({ "recorded": "ok" }))
        }
    }
}
