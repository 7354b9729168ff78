//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex};

use persona_agent_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Clone)]
enum ScriptStep {
    Reply(PresetReply),
    Failure,
}

#[derive(Default)]
struct ScriptState {
    steps: Vec<ScriptStep>,
    cursor: usize,
    repeat_last: bool,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the model should respond to each request, in order. If
/// the script runs out of steps, an error is returned — unless
/// [`set_repeat_last`](Self::set_repeat_last) is enabled, in which case
/// the final step is served forever.
///
/// Every request the provider receives is recorded and can be read back
/// with [`requests`](Self::requests). Clones share the same script and
/// recording, so keep a clone around to probe a provider after handing
/// it to an agent.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    state: Arc<Mutex<ScriptState>>,
}

impl TestModelProvider {
    /// Appends a scripted reply to the conversation script.
    #[inline]
    pub fn push_reply(&mut self, reply: PresetReply) {
        let mut state = self.state.lock().unwrap();
        state.steps.push(ScriptStep::Reply(reply));
    }

    /// Appends a scripted request failure to the conversation script.
    #[inline]
    pub fn push_failure(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.steps.push(ScriptStep::Failure);
    }

    /// Keeps serving the final script step once the script runs out.
    #[inline]
    pub fn set_repeat_last(&mut self, repeat_last: bool) {
        let mut state = self.state.lock().unwrap();
        state.repeat_last = repeat_last;
    }

    /// Returns every request this provider has received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    fn next_reply(&self, req: &ModelRequest) -> Result<ModelReply, Error> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());

        let step = if state.cursor < state.steps.len() {
            let step = state.steps[state.cursor].clone();
            state.cursor += 1;
            step
        } else if state.repeat_last {
            let Some(step) = state.steps.last() else {
                return Err(Error {
                    message: "conversation script is empty",
                    kind: ErrorKind::RateLimitExceeded,
                });
            };
            step.clone()
        } else {
            return Err(Error {
                message: "no more scripted replies",
                kind: ErrorKind::RateLimitExceeded,
            });
        };

        match step {
            ScriptStep::Reply(reply) => Ok(reply.into_reply()),
            ScriptStep::Failure => Err(Error {
                message: "scripted failure",
                kind: ErrorKind::Other,
            }),
        }
    }
}

impl ModelProvider for TestModelProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        ready(self.next_reply(req))
    }
}

#[cfg(test)]
mod tests {
    use persona_agent_model::{ModelMessage, ToolCallRequest};

    use super::*;

    fn request(input: &str) -> ModelRequest {
        ModelRequest {
            messages: vec![ModelMessage::User(input.to_owned())],
            tools: vec![],
        }
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut provider = TestModelProvider::default();
        provider.push_reply(PresetReply::answer("Hello, world!"));
        provider.push_reply(
            PresetReply::tool_calls([ToolCallRequest {
                id: "tool:1".to_owned(),
                name: "read_todo".to_owned(),
                arguments: r#"{"filename":"todo.txt"}"#.to_owned(),
            }])
            .with_text("Sure, let me take a look."),
        );

        let reply = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(
            reply,
            ModelReply::Answer {
                text: "Hello, world!".to_owned()
            }
        );

        let reply = provider
            .send_request(&request("Check my todo"))
            .await
            .unwrap();
        let ModelReply::ToolCalls { text, requests } = reply else {
            panic!("expected a tool call reply");
        };
        assert_eq!(text.as_deref(), Some("Sure, let me take a look."));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "read_todo");

        // The script is exhausted now.
        let err = provider.send_request(&request("More")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
    }

    #[tokio::test]
    async fn test_records_requests_across_clones() {
        let mut provider = TestModelProvider::default();
        provider.push_reply(PresetReply::answer("Hi"));
        let probe = provider.clone();

        provider.send_request(&request("Hello")).await.unwrap();

        let requests = probe.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![ModelMessage::User("Hello".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_repeat_last_serves_the_final_step_forever() {
        let mut provider = TestModelProvider::default();
        provider.push_reply(PresetReply::answer("Again"));
        provider.set_repeat_last(true);

        for _ in 0..3 {
            let reply = provider.send_request(&request("Hi")).await.unwrap();
            assert_eq!(
                reply,
                ModelReply::Answer {
                    text: "Again".to_owned()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mut provider = TestModelProvider::default();
        provider.push_failure();

        let err = provider.send_request(&request("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
