mod builder;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use persona_agent_model::{
    ModelMessage, ModelProviderError, ModelReply, ModelRequest,
};

use crate::document::DocumentSource;
use crate::model_client::ModelClient;
use crate::prompt::build_system_prompt;
use crate::tool::Executor as ToolExecutor;
pub use builder::AgentBuilder;

/// The default cap on model rounds within a single turn.
pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// The error type for a failed conversation turn.
///
/// Tool-level failures never surface here; they are converted into
/// structured tool results and fed back to the model instead.
#[derive(Debug)]
pub enum TurnError {
    /// Talking to the external model failed. The turn cannot be safely
    /// resumed from a half-completed round, so this is fatal to the
    /// turn and is not retried internally.
    Model(Box<dyn ModelProviderError>),
    /// The model kept requesting tool calls until the round cap was
    /// reached. Hosts should map this to an explicit "unable to
    /// complete" reply.
    RoundLimitExceeded {
        /// The number of rounds that were performed.
        rounds: usize,
    },
}

impl Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::Model(err) => {
                write!(f, "model invocation failed: {err}")
            }
            TurnError::RoundLimitExceeded { rounds } => {
                write!(f, "no final answer after {rounds} rounds")
            }
        }
    }
}

impl StdError for TurnError {}

/// The conversation loop.
///
/// An agent holds a model client, a tool executor and the persona's
/// grounding documents. It owns no conversation state of its own: the
/// host passes the prior history into every turn and keeps the reply,
/// so concurrent turns on separate histories are independent.
pub struct Agent {
    model_client: ModelClient,
    tool_executor: ToolExecutor,
    documents: Box<dyn DocumentSource>,
    persona: String,
    max_rounds: usize,
}

impl Agent {
    /// Runs one conversation turn and resolves to the final reply text.
    ///
    /// The message sequence is seeded with a freshly built system
    /// prompt, the host-supplied history and the new user message. Each
    /// round the model either finishes the turn with an answer, or
    /// requests tool calls; requested calls are executed sequentially
    /// and their results appended as one `Tool` message each, in
    /// request order, before the model is invoked again.
    pub async fn run_turn(
        &self,
        history: &[ModelMessage],
        input: &str,
    ) -> Result<String, TurnError> {
        // The grounding documents are reloaded on every turn so that
        // external edits are picked up without a restart.
        let summary = self.documents.summary_text();
        let profile = self.documents.profile_text();
        let system = build_system_prompt(&self.persona, &summary, &profile);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ModelMessage::System(system));
        messages.extend_from_slice(history);
        messages.push(ModelMessage::User(input.to_owned()));

        let tools = self.tool_executor.definitions();

        for round in 0..self.max_rounds {
            let request = ModelRequest {
                messages: messages.clone(),
                tools: tools.clone(),
            };
            let reply = self
                .model_client
                .send_request(request)
                .await
                .map_err(TurnError::Model)?;

            match reply {
                ModelReply::Answer { text } => {
                    debug!("turn finished after {} round(s)", round + 1);
                    return Ok(text);
                }
                ModelReply::ToolCalls { text, requests } => {
                    debug!(
                        "model requested {} tool call(s) in round {}",
                        requests.len(),
                        round + 1
                    );
                    messages.push(ModelMessage::Assistant {
                        content: text.unwrap_or_default(),
                        tool_calls: requests.clone(),
                    });
                    let results = self.tool_executor.execute(requests).await;
                    for result in results {
                        messages.push(ModelMessage::Tool(result));
                    }
                }
            }
        }

        warn!("round cap reached without a final answer");
        Err(TurnError::RoundLimitExceeded {
            rounds: self.max_rounds,
        })
    }
}
