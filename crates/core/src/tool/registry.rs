use std::collections::HashMap;
use std::sync::Arc;

use persona_agent_model::ModelTool;

use crate::tool::Tool;
use crate::tool::object::{ToolObject, ToolObjectImpl};

/// A static, closed table of the tools the model may call.
///
/// Registration is fixed at construction time. Resolving an unknown
/// name yields `None` so that the caller can turn it into a structured
/// error instead of an unhandled fault.
#[derive(Default)]
pub struct Registry {
    tools: HashMap<String, Arc<dyn ToolObject>>,
}

impl Registry {
    /// Registers a tool.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        self.tools.insert(name, Arc::new(ToolObjectImpl(tool)));
    }

    /// Returns the declared shape of every registered tool, to be
    /// advertised to the model.
    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools
            .values()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    #[inline]
    pub(crate) fn resolve(&self, name: &str) -> Option<&Arc<dyn ToolObject>> {
        self.tools.get(name)
    }
}
