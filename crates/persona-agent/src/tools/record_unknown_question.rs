use std::sync::Arc;

use persona_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::notify::Notifier;

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecordUnknownQuestionParameters {
    #[schemars(description = "The question that couldn't be answered.")]
    question: String,
}

/// A tool that records a question the agent could not answer from its
/// grounding text.
pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
    parameter_schema: Value,
}

impl RecordUnknownQuestionTool {
    /// Creates the tool with the channel that records are delivered to.
    #[inline]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        RecordUnknownQuestionTool {
            notifier,
            parameter_schema: schema_for!(RecordUnknownQuestionParameters)
                .to_value(),
        }
    }
}

impl Tool for RecordUnknownQuestionTool {
    type Input = RecordUnknownQuestionParameters;

    fn name(&self) -> &str {
        "record_unknown_question"
    }

    fn description(&self) -> &str {
        "Always use this tool to record any question that couldn't be \
         answered"
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
            notifier.notify(&format!(
                "Recording '{}' asked that I couldn't answer",
                input.question
            ));
            Ok(json!({ "recorded": "ok" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::CountingNotifier;

    #[tokio::test]
    async fn test_question_is_recorded() {
        let notifier = Arc::new(CountingNotifier::default());
        let channel: Arc<dyn Notifier> = notifier.clone();
        let tool = RecordUnknownQuestionTool::new(channel);

        let result = tool
            .execute(RecordUnknownQuestionParameters {
                question: "What is your shoe size?".to_owned(),
            })
            .await;
        assert_eq!(result.unwrap(), json!({ "recorded": "ok" }));

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "Recording 'What is your shoe size?' asked that I couldn't \
             answer"
        );
    }

    #[test]
    fn test_schema_requires_the_question() {
        let notifier: Arc<dyn Notifier> =
            Arc::new(CountingNotifier::default());
        let tool = RecordUnknownQuestionTool::new(notifier);

        let schema = tool.parameter_schema();
        assert_eq!(schema["required"], json!(["question"]));
    }
}
