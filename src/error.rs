//! Error types for the configuration, gateway, session, and surface layers.

use thiserror::Error;

/// Errors raised while resolving configuration from settings and environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("failed to read settings file '{path}': {reason}")]
    SettingsRead { path: String, reason: String },

    #[error("failed to parse settings file '{path}': {reason}")]
    SettingsParse { path: String, reason: String },
}

/// Errors raised while starting or running the gateway server.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to start {name}: {reason}")]
    StartupFailed { name: String, reason: String },
}

/// Programming-contract errors around the session layout store.
///
/// These indicate a bug in the caller, not a user or runtime failure: the
/// store must be provisioned for a session before it is consumed.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session '{0}' consumed outside its provisioning scope")]
    NotProvisioned(String),
}

/// Errors surfaced by the chat surface during a turn.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A turn is already in flight; at most one outstanding chat turn per
    /// bound agent at a time.
    #[error("a chat turn is already in flight for this agent")]
    TurnInFlight,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway (or the remote runtime behind it) rejected the turn.
    #[error("gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },

    /// The remote runtime terminated the stream with an error event.
    #[error("agent stream failed: {message}")]
    Stream { message: String },
}

/// Validation errors for structured tool-action payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown tool action '{0}'")]
    UnknownAction(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}
