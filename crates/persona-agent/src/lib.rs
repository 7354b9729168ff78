//! An out-of-the-box conversational stand-in that answers questions as a
//! specific person, grounded in their profile and summary documents.
//!
//! The crate includes a CLI chat host for using in the terminal. And you
//! can also use it as a library to bring the agent into your own host
//! apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod config;
pub mod docs;
pub mod notify;
mod session;
pub mod tools;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`persona_agent_core`] crate.
pub mod core {
    pub use persona_agent_core::*;
}
