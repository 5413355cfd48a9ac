//! lexgate: chat gateway for a multi-agent legal assistant.
//!
//! The crate covers the routing and state-synchronization core between chat
//! surfaces and a remote agent runtime:
//!
//! - [`session`]: provider-scoped layout state (active agent, presentation)
//!   and the per-agent runtime state.
//! - [`gateway`]: the HTTP server with the `/api/copilotkit` proxy route,
//!   navigation routes, and the session layout API.
//! - [`surface`]: the chat surface state machine, covering the transcript,
//!   turn lifecycle, tool logs, and structured analysis actions.
//! - [`wrapper`]: binds a surface to the layout store's active agent and
//!   composes agent switching.
//! - [`agents`] / [`prompts`]: the static agent catalog and product copy.

pub mod agents;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompts;
pub mod session;
pub mod settings;
pub mod surface;
pub mod terminal;
pub mod wrapper;
