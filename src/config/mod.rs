//! Typed configuration resolved from settings and environment.

pub(crate) mod helpers;
mod runtime;

pub use runtime::{ModelAdapterConfig, RuntimeConfig};
