use persona_agent_model::{ModelReply, ToolCallRequest};
use serde::{Deserialize, Serialize};

/// The preset reply for one scripted model round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetReply {
    /// Text the model produces in this round, if any.
    pub text: Option<String>,
    /// Tool calls the model requests in this round.
    pub tool_calls: Vec<ToolCallRequest>,
}

impl PresetReply {
    /// Creates a `PresetReply` that finishes the turn with plain text.
    #[inline]
    pub fn answer<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: vec![],
        }
    }

    /// Creates a `PresetReply` that requests the given tool calls.
    #[inline]
    pub fn tool_calls(calls: impl Into<Vec<ToolCallRequest>>) -> Self {
        Self {
            text: None,
            tool_calls: calls.into(),
        }
    }

    /// Attaches text emitted alongside the tool calls.
    #[inline]
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    pub(crate) fn into_reply(self) -> ModelReply {
        if self.tool_calls.is_empty() {
            ModelReply::Answer {
                text: self.text.unwrap_or_default(),
            }
        } else {
            ModelReply::ToolCalls {
                text: self.text,
                requests: self.tool_calls,
            }
        }
    }
}
