//! Request and response DTOs for the gateway API and the agent wire protocol.

use serde::{Deserialize, Serialize};

use crate::agents::AgentDescriptor;
use crate::session::{ToolLogEntry, ToolLogStatus};

// --- Chat turn ---

/// One message in the chat-protocol request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/copilotkit`: message history plus optional
/// agent-state payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnRequest {
    /// Agent the turn is addressed to; absent means a direct completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    pub messages: Vec<WireMessage>,
    /// Opaque agent-state payload echoed to the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

// --- Agent stream events ---

/// Events the remote runtime emits over the turn stream, one JSON object per
/// SSE `data:` line. The proxy never interprets these; the chat surface does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// Incremental agent text.
    #[serde(rename = "stream_chunk")]
    StreamChunk { content: String },
    /// Progress feedback; re-emitted with the same id on status change.
    #[serde(rename = "tool_log")]
    ToolLog {
        id: u64,
        message: String,
        status: ToolLogStatus,
    },
    /// Full agent-state sync payload.
    #[serde(rename = "state")]
    State {
        #[serde(default)]
        tool_logs: Vec<ToolLogEntry>,
        #[serde(default)]
        show_analysis: bool,
        #[serde(default)]
        analysis_result: String,
    },
    /// Frontend tool invocation (e.g. `legal_analysis`).
    #[serde(rename = "action")]
    Action {
        name: String,
        args: serde_json::Value,
    },
    /// Turn complete.
    #[serde(rename = "done")]
    Done,
    /// Remote failure; terminates the stream.
    #[serde(rename = "error")]
    Error { message: String },
}

// --- Routes ---

/// Response for the route pages (`/post-generator`, `/legal-specialists`).
#[derive(Debug, Serialize)]
pub struct RoutePageResponse {
    pub route: &'static str,
    /// Agent the session is bound to after visiting this route.
    pub agent: String,
    pub greeting: &'static str,
    pub suggestions: &'static str,
}

// --- Agents ---

#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub agents: &'static [AgentDescriptor],
}

// --- Health + status ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub channel: &'static str,
}

/// Response for the gateway control-plane status endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayStatusResponse {
    pub status: &'static str,
    /// RFC 3339 start time.
    pub started_at: String,
    pub uptime_secs: u64,
    pub runtime_url: String,
    /// Whether a direct-model fallback adapter is configured.
    pub model_fallback: bool,
}
