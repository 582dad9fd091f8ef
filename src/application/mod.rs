//! Application layer containing the form session orchestration.
//!
//! `FormState` is the synchronous reducer for field edits. `FormOrchestrator`
//! owns it and runs submit actions, handing the remote call to a spawned
//! `tokio` task whose result comes back over a `oneshot` channel.

pub mod config;
pub mod orchestrator;
pub mod state;
