//! Adapter selection for an inbound chat turn.
//!
//! A turn addressed to a known agent goes to the remote runtime endpoint; a
//! turn with no agent falls back to the configured model provider when one
//! exists. The request/response cycle stays a verbatim pass-through either
//! way; resilience is the upstream's job.

use bytes::Bytes;
use reqwest::header;
use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::agents;
use crate::config::{ModelAdapterConfig, RuntimeConfig};
use crate::gateway::types::ChatTurnRequest;

#[derive(Debug, Clone, Copy)]
pub enum Adapter<'a> {
    /// Forward to the remote agent runtime.
    Runtime(&'a Url),
    /// Direct model call through the OpenAI-compatible provider.
    Model(&'a ModelAdapterConfig),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),
}

/// Pick the upstream for a turn.
pub fn select<'a>(
    config: &'a RuntimeConfig,
    turn: &ChatTurnRequest,
) -> Result<Adapter<'a>, AdapterError> {
    match turn.agent.as_deref() {
        Some(agent) if agents::is_known(agent) => Ok(Adapter::Runtime(&config.runtime_url)),
        Some(agent) => Err(AdapterError::UnknownAgent(agent.to_string())),
        None => match config.model.as_ref() {
            Some(model) => Ok(Adapter::Model(model)),
            None => Ok(Adapter::Runtime(&config.runtime_url)),
        },
    }
}

/// Forward the original request body to the agent runtime, untouched.
pub async fn forward_runtime(
    http: &reqwest::Client,
    url: &Url,
    body: Bytes,
) -> Result<reqwest::Response, reqwest::Error> {
    http.post(url.clone())
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "text/event-stream")
        .body(body)
        .send()
        .await
}

/// Translate the turn into an OpenAI-style streaming completion request.
pub fn completion_body(turn: &ChatTurnRequest, model: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": turn
            .messages
            .iter()
            .map(|m| serde_json::json!({ "role": m.role, "content": m.content }))
            .collect::<Vec<_>>(),
        "stream": true,
    })
}

/// Forward a direct completion to the model provider.
pub async fn forward_model(
    http: &reqwest::Client,
    config: &ModelAdapterConfig,
    turn: &ChatTurnRequest,
) -> Result<reqwest::Response, reqwest::Error> {
    // Url::join treats a base without a trailing slash as a file component,
    // so extend the path segments instead.
    let mut url = config.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["chat", "completions"]);
    }

    http.post(url)
        .bearer_auth(config.api_key.expose_secret())
        .json(&completion_body(turn, &config.model))
        .send()
        .await
}
