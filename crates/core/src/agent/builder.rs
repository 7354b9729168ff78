use persona_agent_model::ModelProvider;

use super::{Agent, DEFAULT_MAX_ROUNDS};
use crate::document::{DocumentSource, NoDocuments};
use crate::model_client::ModelClient;
use crate::tool::{Executor as ToolExecutor, Registry, Tool};

/// [`Agent`] builder.
pub struct AgentBuilder {
    model_client: ModelClient,
    persona: String,
    documents: Box<dyn DocumentSource>,
    registry: Registry,
    max_rounds: usize,
}

impl AgentBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            persona: String::new(),
            documents: Box::new(NoDocuments),
            registry: Registry::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the name of the persona the agent answers as.
    #[inline]
    pub fn with_persona<S: Into<String>>(mut self, persona: S) -> Self {
        self.persona = persona.into();
        self
    }

    /// Sets the source of the grounding documents.
    ///
    /// Defaults to [`NoDocuments`], which degrades the system prompt to
    /// blank grounding sections.
    #[inline]
    pub fn with_documents<D: DocumentSource + 'static>(
        mut self,
        documents: D,
    ) -> Self {
        self.documents = Box::new(documents);
        self
    }

    /// Registers a tool.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.registry.add_tool(tool);
        self
    }

    /// Sets the cap on model rounds within a single turn.
    #[inline]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Builds the agent.
    #[inline]
    pub fn build(self) -> Agent {
        Agent {
            model_client: self.model_client,
            tool_executor: ToolExecutor::with_registry(self.registry),
            documents: self.documents,
            persona: self.persona,
            max_rounds: self.max_rounds,
        }
    }
}
