use persona_agent_model::{ModelTool, ToolCallRequest, ToolCallResult};
use serde_json::{Value, json};

use crate::tool::registry::Registry;
use crate::tool::{Error, ToolResult};

/// An executor that handles tool call requests from the model.
///
/// Requests are executed sequentially, in the order they were
/// requested. Tools here perform notification side effects whose
/// relative order is observable, so there is no parallelism within a
/// batch.
pub struct Executor {
    registry: Registry,
}

impl Executor {
    /// Creates an executor that dispatches against the given registry.
    #[inline]
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the declared shape of every registered tool.
    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.registry.definitions()
    }

    /// Executes a batch of tool call requests, producing one result per
    /// request, in request order.
    ///
    /// Failures are isolated per call: every error is converted into a
    /// structured result payload so the model can explain or retry in
    /// natural language. This method never fails the batch.
    pub async fn execute(
        &self,
        requests: Vec<ToolCallRequest>,
    ) -> Vec<ToolCallResult> {
        let mut results = Vec::with_capacity(requests.len());
        for req in requests {
            let ToolCallRequest {
                id,
                name,
                arguments,
            } = req;
            let payload = match self.run_one(&name, &arguments).await {
                Ok(value) => value,
                Err(err) => {
                    debug!("tool `{name}` failed: {}", err.reason());
                    json!({
                        "error": {
                            "kind": err.kind().code(),
                            "message": err.reason(),
                        }
                    })
                }
            };
            results.push(ToolCallResult {
                id,
                content: payload.to_string(),
            });
        }
        results
    }

    async fn run_one(&self, name: &str, arguments: &str) -> ToolResult {
        // Some models send an empty string instead of an empty object
        // when a tool takes no arguments.
        let raw = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };
        let decoded: Value = serde_json::from_str(raw).map_err(|err| {
            Error::argument_decode().with_reason(err.to_string())
        })?;

        let Some(tool) = self.registry.resolve(name) else {
            warn!("tool not found: {name}");
            return Err(Error::unknown_tool()
                .with_reason(format!("unknown tool {name}")));
        };

        trace!("executing tool `{name}` with args: {decoded:?}");
        tool.execute(decoded).await
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use serde::Deserialize;

    use super::*;
    use crate::tool::{ErrorKind, Tool};

    static EMPTY_SCHEMA: &Value = &Value::Null;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct EchoToolParameters {
        text: String,
    }

    struct EchoTool;

    impl Tool for EchoTool {
        type Input = EchoToolParameters;

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn parameter_schema(&self) -> &Value {
            EMPTY_SCHEMA
        }

        fn execute(
            &self,
            input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok(json!({ "echo": input.text })))
        }
    }

    struct FailingTool;

    impl Tool for FailingTool {
        type Input = serde_json::Value;

        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameter_schema(&self) -> &Value {
            EMPTY_SCHEMA
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Err(Error::execution_error().with_reason("boom")))
        }
    }

    fn executor() -> Executor {
        let mut registry = Registry::default();
        registry.add_tool(EchoTool);
        registry.add_tool(FailingTool);
        Executor::with_registry(registry)
    }

    fn request(id: &str, name: &str, arguments: &str) -> ToolCallRequest {
        ToolCallRequest {
            id: id.to_owned(),
            name: name.to_owned(),
            arguments: arguments.to_owned(),
        }
    }

    fn parsed(content: &str) -> Value {
        serde_json::from_str(content).unwrap()
    }

    #[tokio::test]
    async fn test_results_preserve_request_order() {
        let executor = executor();
        let results = executor
            .execute(vec![
                request("call_1", "echo", r#"{"text":"one"}"#),
                request("call_2", "echo", r#"{"text":"two"}"#),
            ])
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "call_1");
        assert_eq!(results[1].id, "call_2");
        assert_eq!(parsed(&results[0].content), json!({ "echo": "one" }));
        assert_eq!(parsed(&results[1].content), json!({ "echo": "two" }));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_structured_error() {
        let executor = executor();
        let results = executor
            .execute(vec![request("call_1", "bogus", "{}")])
            .await;

        assert_eq!(results.len(), 1);
        let payload = parsed(&results[0].content);
        assert_eq!(
            payload["error"]["kind"],
            ErrorKind::UnknownTool.code()
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_structured_error() {
        let executor = executor();
        let results = executor
            .execute(vec![request("call_1", "echo", "{not json")])
            .await;

        let payload = parsed(&results[0].content);
        assert_eq!(
            payload["error"]["kind"],
            ErrorKind::ArgumentDecode.code()
        );
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_structured_error() {
        let executor = executor();

        // Missing required field.
        let results = executor
            .execute(vec![request("call_1", "echo", "{}")])
            .await;
        let payload = parsed(&results[0].content);
        assert_eq!(
            payload["error"]["kind"],
            ErrorKind::BadArguments.code()
        );

        // Unexpected extra field.
        let results = executor
            .execute(vec![request(
                "call_2",
                "echo",
                r#"{"text":"hi","extra":1}"#,
            )])
            .await;
        let payload = parsed(&results[0].content);
        assert_eq!(
            payload["error"]["kind"],
            ErrorKind::BadArguments.code()
        );
    }

    #[tokio::test]
    async fn test_handler_failure_does_not_abort_the_batch() {
        let executor = executor();
        let results = executor
            .execute(vec![
                request("call_1", "failing", "{}"),
                request("call_2", "echo", r#"{"text":"still runs"}"#),
            ])
            .await;

        assert_eq!(results.len(), 2);
        let payload = parsed(&results[0].content);
        assert_eq!(payload["error"]["kind"], ErrorKind::Execution.code());
        assert_eq!(payload["error"]["message"], "boom");
        assert_eq!(
            parsed(&results[1].content),
            json!({ "echo": "still runs" })
        );
    }

    #[tokio::test]
    async fn test_empty_arguments_decode_as_empty_object() {
        let executor = executor();
        let results = executor
            .execute(vec![request("call_1", "failing", "")])
            .await;

        // The empty payload reached the tool body, which failed on its
        // own terms rather than with a decode error.
        let payload = parsed(&results[0].content);
        assert_eq!(payload["error"]["kind"], ErrorKind::Execution.code());
    }
}
