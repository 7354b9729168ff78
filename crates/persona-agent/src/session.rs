use std::sync::Arc;

use persona_agent_core::document::DocumentSource;
use persona_agent_core::{Agent, AgentBuilder, TurnError};
use persona_agent_model::{ModelMessage, ModelProvider};

use crate::notify::{LogOnly, Notifier};
use crate::tools::{RecordUnknownQuestionTool, RecordUserDetailsTool};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    agent_builder: AgentBuilder,
    notifier: Arc<dyn Notifier>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let agent_builder = AgentBuilder::with_model_provider(provider);
        Self {
            agent_builder,
            notifier: Arc::new(LogOnly),
        }
    }

    /// Sets the name of the persona the agent answers as.
    #[inline]
    pub fn with_persona<S: Into<String>>(mut self, persona: S) -> Self {
        self.agent_builder = self.agent_builder.with_persona(persona);
        self
    }

    /// Sets the source of the grounding documents.
    #[inline]
    pub fn with_documents<D: DocumentSource + 'static>(
        mut self,
        documents: D,
    ) -> Self {
        self.agent_builder = self.agent_builder.with_documents(documents);
        self
    }

    /// Sets the channel that the recorder tools deliver to.
    ///
    /// Defaults to [`LogOnly`].
    #[inline]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the cap on model rounds within a single turn.
    #[inline]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.agent_builder = self.agent_builder.with_max_rounds(max_rounds);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let agent = self
            .agent_builder
            .with_tool(RecordUserDetailsTool::new(Arc::clone(&self.notifier)))
            .with_tool(RecordUnknownQuestionTool::new(self.notifier))
            .build();

        Session {
            agent,
            history: Vec::new(),
        }
    }
}

/// A chat session, like a window that displays messages and has an
/// input box.
///
/// The session holds a fully configured agent plus the conversation
/// history the chat host owns. The agent itself is stateless across
/// turns; the session feeds the history back in on every turn.
pub struct Session {
    agent: Agent,
    history: Vec<ModelMessage>,
}

impl Session {
    /// Runs one conversation turn and resolves to the reply text.
    ///
    /// On success the exchange is appended to the session history. A
    /// failed turn leaves the history untouched.
    pub async fn chat(&mut self, message: &str) -> Result<String, TurnError> {
        let reply = self.agent.run_turn(&self.history, message).await?;
        self.history.push(ModelMessage::User(message.to_owned()));
        self.history.push(ModelMessage::Assistant {
            content: reply.clone(),
            tool_calls: vec![],
        });
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use persona_agent_test_model::{PresetReply, TestModelProvider};

    use super::*;

    #[tokio::test]
    async fn test_recorder_tools_are_advertised() {
        let mut provider = TestModelProvider::default();
        provider.push_reply(PresetReply::answer("Hello!"));
        let probe = provider.clone();

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_persona("Carlos Vallejo")
            .build();
        session.chat("Hi").await.unwrap();

        let requests = probe.requests();
        let mut tool_names: Vec<_> = requests[0]
            .tools
            .iter()
            .map(|tool| tool.name.as_str())
            .collect();
        tool_names.sort_unstable();
        assert_eq!(
            tool_names,
            ["record_unknown_question", "record_user_details"]
        );
    }

    #[tokio::test]
    async fn test_history_accumulates_across_turns() {
        let mut provider = TestModelProvider::default();
        provider.push_reply(PresetReply::answer("First reply"));
        provider.push_reply(PresetReply::answer("Second reply"));
        let probe = provider.clone();

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_persona("Carlos Vallejo")
            .build();
        session.chat("First question").await.unwrap();
        session.chat("Second question").await.unwrap();

        let requests = probe.requests();
        assert_eq!(requests.len(), 2);

        // The second turn replays the first exchange after a freshly
        // rebuilt system prompt.
        let second_turn = &requests[1].messages;
        assert_eq!(second_turn.len(), 4);
        assert!(matches!(&second_turn[0], ModelMessage::System(_)));
        assert_eq!(
            second_turn[1],
            ModelMessage::User("First question".to_owned())
        );
        assert_eq!(
            second_turn[2],
            ModelMessage::Assistant {
                content: "First reply".to_owned(),
                tool_calls: vec![],
            }
        );
        assert_eq!(
            second_turn[3],
            ModelMessage::User("Second question".to_owned())
        );
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_history_untouched() {
        let mut provider = TestModelProvider::default();
        provider.push_failure();
        provider.push_reply(PresetReply::answer("Recovered"));
        let probe = provider.clone();

        let mut session = SessionBuilder::with_model_provider(provider)
            .with_persona("Carlos Vallejo")
            .build();
        assert!(session.chat("Hi").await.is_err());

        session.chat("Hi again").await.unwrap();
        let requests = probe.requests();
        // The second turn starts from an empty history again.
        assert_eq!(requests[1].messages.len(), 2);
    }
}
