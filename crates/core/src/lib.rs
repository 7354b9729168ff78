//! Core logic including the conversation loop, tool execution, prompt
//! assembly, etc.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod agent;
pub mod document;
mod model_client;
pub mod prompt;
pub mod tool;

pub use agent::{Agent, AgentBuilder, DEFAULT_MAX_ROUNDS, TurnError};
