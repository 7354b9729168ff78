use serde::{Deserialize, Serialize};

/// A complete reply from the model provider.
///
/// This is a closed two-way variant: a reply either finishes the turn
/// with plain text, or asks the caller to run tools and come back.
/// Callers should match exhaustively instead of probing fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelReply {
    /// The model produced an ordinary answer and needs nothing else.
    Answer {
        /// The answer text. May be empty if the model returned no text.
        text: String,
    },
    /// The model requested one or more tool calls before it can answer.
    ToolCalls {
        /// Text the model emitted alongside the tool calls, if any.
        text: Option<String>,
        /// The requested tool calls, in order.
        requests: Vec<ToolCallRequest>,
    },
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The raw argument payload, exactly as the model produced it.
    ///
    /// This is typically a JSON object encoded as text. Decoding is
    /// deferred to the executor so that a malformed payload can be
    /// reported back to the model instead of failing the request.
    pub arguments: String,
}
