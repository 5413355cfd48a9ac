//! The chat surface: one agent, one transcript, one turn at a time.
//!
//! The surface owns the transcript and the agent runtime state for the
//! currently bound agent, and drives the turn lifecycle
//! `Idle → Sending → Streaming → Idle`. Errors transition straight back to
//! `Idle`; partial tool-log output already received is kept, not rolled back.

pub mod actions;
pub mod client;
pub mod events;

use serde_json::Value;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::agents::AgentId;
use crate::error::{ActionError, SurfaceError};
use crate::gateway::types::{AgentEvent, ChatTurnRequest, WireMessage};
use crate::session::{AgentRuntimeState, ToolLogEntry};
use actions::LegalAnalysis;
use client::ProxyClient;
use events::SseDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Turn lifecycle. No states are skipped: a send enters `Sending`, the first
/// response chunk moves to `Streaming`, and completion or error returns to
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Sending,
    Streaming,
}

/// What a send call did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Empty or whitespace-only input: nothing appended, nothing sent.
    Ignored,
}

/// A fixed-prompt shortcut; invoking one is identical to typing its prompt
/// and submitting.
#[derive(Debug, Clone, Copy)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Estruturação Societária",
        icon: "building",
        prompt: "Preciso estruturar uma holding familiar para proteção patrimonial",
    },
    QuickAction {
        label: "Planejamento Tributário",
        icon: "calculator",
        prompt: "Como otimizar a carga tributária da minha empresa?",
    },
    QuickAction {
        label: "Contratos M&A",
        icon: "file-text",
        prompt: "Estou negociando a aquisição de uma empresa e preciso de orientação",
    },
    QuickAction {
        label: "Due Diligence",
        icon: "file-text",
        prompt: "Preciso fazer due diligence de uma empresa para aquisição",
    },
];

/// Sink for the incremental output of a turn. Drivers (terminal, tests)
/// implement what they care about.
pub trait SurfaceObserver {
    fn on_chunk(&mut self, _content: &str) {}
    fn on_tool_logs(&mut self, _logs: &[ToolLogEntry]) {}
    fn on_analysis_card(&mut self, _card: &str, _analysis: &LegalAnalysis) {}
    fn on_state(&mut self, _state: &AgentRuntimeState) {}
}

/// Observer that discards everything.
pub struct NullObserver;

impl SurfaceObserver for NullObserver {}

/// The chat panel bound to one named agent.
pub struct ChatSurface {
    agent: AgentId,
    client: ProxyClient,
    thread_id: String,
    transcript: Vec<ChatMessage>,
    runtime: AgentRuntimeState,
    turn: TurnState,
}

impl ChatSurface {
    pub fn new(agent: AgentId, client: ProxyClient) -> Self {
        Self {
            agent,
            client,
            thread_id: Uuid::new_v4().to_string(),
            transcript: Vec::new(),
            runtime: AgentRuntimeState::default(),
            turn: TurnState::Idle,
        }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn runtime(&self) -> &AgentRuntimeState {
        &self.runtime
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// Whether a turn is outstanding; the send control is disabled while
    /// this holds.
    pub fn is_in_flight(&self) -> bool {
        self.turn != TurnState::Idle
    }

    /// Re-bind the surface to a different agent, resetting the agent runtime
    /// state to its empty defaults. The transcript carries over so the new
    /// agent receives the conversation so far; the thread id changes.
    pub fn rebind(&mut self, agent: AgentId) {
        self.agent = agent;
        self.runtime.reset();
        self.thread_id = Uuid::new_v4().to_string();
    }

    /// Enter the turn lifecycle for `text`.
    ///
    /// Whitespace-only input is a no-op; a turn already in flight rejects
    /// the send. On `Ok(Sent)` the user message is on the transcript and the
    /// surface is in `Sending`.
    pub fn begin_turn(&mut self, text: &str) -> Result<SendOutcome, SurfaceError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        if self.is_in_flight() {
            return Err(SurfaceError::TurnInFlight);
        }
        self.transcript.push(ChatMessage {
            role: Role::User,
            content: trimmed.to_string(),
        });
        self.turn = TurnState::Sending;
        Ok(SendOutcome::Sent)
    }

    /// Leave the turn lifecycle; idempotent.
    pub fn end_turn(&mut self) {
        self.turn = TurnState::Idle;
    }

    /// Send a message through the proxy route and stream the turn to
    /// completion, feeding incremental output to `observer`.
    pub async fn send(
        &mut self,
        text: &str,
        observer: &mut dyn SurfaceObserver,
    ) -> Result<SendOutcome, SurfaceError> {
        match self.begin_turn(text)? {
            SendOutcome::Ignored => return Ok(SendOutcome::Ignored),
            SendOutcome::Sent => {}
        }

        let result = self.run_turn(observer).await;
        self.end_turn();

        match result {
            Ok(reply) => {
                if !reply.is_empty() {
                    self.transcript.push(ChatMessage {
                        role: Role::Agent,
                        content: reply,
                    });
                }
                Ok(SendOutcome::Sent)
            }
            Err(err) => Err(err),
        }
    }

    /// Invoke a quick-action shortcut; identical to sending its prompt.
    pub async fn quick_action(
        &mut self,
        action: &QuickAction,
        observer: &mut dyn SurfaceObserver,
    ) -> Result<SendOutcome, SurfaceError> {
        self.send(action.prompt, observer).await
    }

    async fn run_turn(&mut self, observer: &mut dyn SurfaceObserver) -> Result<String, SurfaceError> {
        let request = self.turn_request();
        let response = self.client.send_turn(&request).await?;

        let mut stream = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut reply = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(SurfaceError::Transport)?;
            if self.turn == TurnState::Sending {
                self.turn = TurnState::Streaming;
            }
            for event in decoder.push(&chunk) {
                if self.handle_event(event, &mut reply, observer)? {
                    return Ok(reply);
                }
            }
        }
        Ok(reply)
    }

    fn turn_request(&self) -> ChatTurnRequest {
        ChatTurnRequest {
            agent: Some(self.agent.to_string()),
            messages: self
                .transcript
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            state: serde_json::to_value(&self.runtime).ok(),
            thread_id: Some(self.thread_id.clone()),
        }
    }

    /// Apply one streamed event. Returns `Ok(true)` when the turn is done.
    fn handle_event(
        &mut self,
        event: AgentEvent,
        reply: &mut String,
        observer: &mut dyn SurfaceObserver,
    ) -> Result<bool, SurfaceError> {
        match event {
            AgentEvent::StreamChunk { content } => {
                reply.push_str(&content);
                observer.on_chunk(&content);
            }
            AgentEvent::ToolLog {
                id,
                message,
                status,
            } => {
                self.runtime.upsert_log(ToolLogEntry {
                    id,
                    message,
                    status,
                });
                observer.on_tool_logs(&self.runtime.tool_logs);
            }
            AgentEvent::State {
                tool_logs,
                show_analysis,
                analysis_result,
            } => {
                self.runtime = AgentRuntimeState {
                    tool_logs,
                    show_analysis,
                    analysis_result,
                };
                observer.on_state(&self.runtime);
            }
            AgentEvent::Action { name, args } => {
                match self.dispatch_action(&name, &args) {
                    Ok(analysis) => {
                        let card = analysis.render_card();
                        observer.on_analysis_card(&card, &analysis);
                        observer.on_state(&self.runtime);
                    }
                    Err(err) => {
                        // Malformed or unknown actions are rejected at the
                        // boundary; runtime state stays untouched.
                        tracing::warn!("Rejected tool action '{name}': {err}");
                    }
                }
            }
            AgentEvent::Done => return Ok(true),
            AgentEvent::Error { message } => {
                return Err(SurfaceError::Stream { message });
            }
        }
        Ok(false)
    }

    /// Validate and apply a structured tool action.
    ///
    /// On success the agent runtime state becomes
    /// `{ show_analysis: true, analysis_result, tool_logs: [] }`.
    pub fn dispatch_action(&mut self, name: &str, args: &Value) -> Result<LegalAnalysis, ActionError> {
        if name != actions::LEGAL_ANALYSIS {
            return Err(ActionError::UnknownAction(name.to_string()));
        }
        let analysis = LegalAnalysis::from_args(args)?;
        self.runtime = AgentRuntimeState {
            tool_logs: Vec::new(),
            show_analysis: true,
            analysis_result: analysis.analysis.clone(),
        };
        Ok(analysis)
    }
}
