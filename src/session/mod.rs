//! Provider-scoped session layout state.
//!
//! The layout store owns one [`LayoutState`] per session and is the single
//! source of truth for the active agent. It is never a process-wide
//! singleton: callers receive a store handle explicitly (gateway state, chat
//! wrapper), which keeps concurrent sessions isolated.

mod runtime;

pub use runtime::{AgentRuntimeState, ToolLogEntry, ToolLogStatus};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, watch};

use crate::agents::{self, AgentId};
use crate::error::SessionError;

/// Route whose surface is bound to the coordinator by default.
pub const COORDINATOR_ROUTE: &str = "/post-generator";
/// Route hosting the specialist chat surface.
pub const SPECIALIST_ROUTE: &str = "/legal-specialists";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

/// Per-session presentation state plus the active agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub title: String,
    pub description: String,
    pub show_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_content: Option<String>,
    pub theme: Theme,
    pub agent: AgentId,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            title: "Vieira Pires Advogados".to_string(),
            description: "Sistema jurídico avançado com agentes especializados".to_string(),
            show_header: true,
            header_content: None,
            sidebar_content: None,
            theme: Theme::Light,
            agent: agents::COORDINATOR,
        }
    }
}

impl LayoutState {
    /// Initial state for a session arriving on `path`.
    ///
    /// The coordinator route maps to the coordinator agent; every other path
    /// maps to the default specialist.
    pub fn for_path(path: &str) -> Self {
        let agent = if path == COORDINATOR_ROUTE {
            agents::COORDINATOR
        } else {
            agents::DEFAULT_SPECIALIST
        };
        Self {
            agent,
            ..Self::default()
        }
    }
}

/// Partial layout update; supplied fields are shallow-merged over the
/// current state in one atomic replace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub show_header: Option<bool>,
    #[serde(default)]
    pub header_content: Option<Option<String>>,
    #[serde(default)]
    pub sidebar_content: Option<Option<String>>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub agent: Option<AgentId>,
}

impl LayoutUpdate {
    /// Update that only changes the active agent.
    pub fn agent(agent: AgentId) -> Self {
        Self {
            agent: Some(agent),
            ..Self::default()
        }
    }

    fn apply(&self, state: &mut LayoutState) {
        if let Some(ref title) = self.title {
            state.title = title.clone();
        }
        if let Some(ref description) = self.description {
            state.description = description.clone();
        }
        if let Some(show_header) = self.show_header {
            state.show_header = show_header;
        }
        if let Some(ref header_content) = self.header_content {
            state.header_content = header_content.clone();
        }
        if let Some(ref sidebar_content) = self.sidebar_content {
            state.sidebar_content = sidebar_content.clone();
        }
        if let Some(theme) = self.theme {
            state.theme = theme;
        }
        if let Some(agent) = self.agent {
            state.agent = agent;
        }
    }
}

/// Opaque per-session key (per browser tab, per terminal instance).
pub type SessionId = String;

/// Layout store keyed by session id.
///
/// Each session's state lives inside a watch channel, so reads see a
/// consistent snapshot and dependents are notified on every write.
#[derive(Debug, Default)]
pub struct LayoutStore {
    sessions: RwLock<HashMap<SessionId, watch::Sender<LayoutState>>>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state for a session arriving on `path`.
    ///
    /// Idempotent: an already-provisioned session keeps its current state.
    pub async fn provision(&self, session: &str, path: &str) -> LayoutState {
        let mut sessions = self.sessions.write().await;
        match sessions.get(session) {
            Some(tx) => tx.borrow().clone(),
            None => {
                let state = LayoutState::for_path(path);
                let (tx, _rx) = watch::channel(state.clone());
                sessions.insert(session.to_string(), tx);
                state
            }
        }
    }

    /// Current layout for a provisioned session.
    pub async fn layout(&self, session: &str) -> Result<LayoutState, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session)
            .map(|tx| tx.borrow().clone())
            .ok_or_else(|| SessionError::NotProvisioned(session.to_string()))
    }

    /// Shallow-merge `update` over the session's state and notify watchers.
    pub async fn update(
        &self,
        session: &str,
        update: LayoutUpdate,
    ) -> Result<LayoutState, SessionError> {
        let sessions = self.sessions.read().await;
        let tx = sessions
            .get(session)
            .ok_or_else(|| SessionError::NotProvisioned(session.to_string()))?;
        tx.send_modify(|state| update.apply(state));
        Ok(tx.borrow().clone())
    }

    /// Change-notification handle for a provisioned session.
    pub async fn watch(
        &self,
        session: &str,
    ) -> Result<watch::Receiver<LayoutState>, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session)
            .map(watch::Sender::subscribe)
            .ok_or_else(|| SessionError::NotProvisioned(session.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn provision_derives_agent_from_path() {
        let store = LayoutStore::new();

        let coordinator = store.provision("tab-1", COORDINATOR_ROUTE).await;
        assert_eq!(coordinator.agent, agents::COORDINATOR);

        let specialist = store.provision("tab-2", SPECIALIST_ROUTE).await;
        assert_eq!(specialist.agent, agents::DEFAULT_SPECIALIST);

        // Any other path also maps to the specialist default.
        let other = store.provision("tab-3", "/anything-else").await;
        assert_eq!(other.agent, agents::DEFAULT_SPECIALIST);
    }

    #[tokio::test]
    async fn provision_is_idempotent() {
        let store = LayoutStore::new();
        store.provision("tab-1", SPECIALIST_ROUTE).await;
        store
            .update("tab-1", LayoutUpdate::agent(agents::TRIBUTARIO))
            .await
            .expect("provisioned");

        // Re-arriving on a different path must not clobber existing state.
        let state = store.provision("tab-1", COORDINATOR_ROUTE).await;
        assert_eq!(state.agent, agents::TRIBUTARIO);
    }

    #[tokio::test]
    async fn update_shallow_merges_supplied_fields_only() {
        let store = LayoutStore::new();
        store.provision("tab-1", COORDINATOR_ROUTE).await;

        let updated = store
            .update(
                "tab-1",
                LayoutUpdate {
                    theme: Some(Theme::Dark),
                    ..LayoutUpdate::default()
                },
            )
            .await
            .expect("provisioned");

        assert_eq!(updated.theme, Theme::Dark);
        // Untouched fields keep their values.
        assert_eq!(updated.title, "Vieira Pires Advogados");
        assert_eq!(updated.agent, agents::COORDINATOR);
    }

    #[tokio::test]
    async fn consuming_unprovisioned_session_is_a_contract_error() {
        let store = LayoutStore::new();
        let err = store.layout("ghost").await.expect_err("not provisioned");
        assert!(matches!(err, SessionError::NotProvisioned(ref s) if s == "ghost"));

        let err = store
            .update("ghost", LayoutUpdate::agent(agents::COORDINATOR))
            .await
            .expect_err("not provisioned");
        assert!(matches!(err, SessionError::NotProvisioned(_)));
    }

    #[tokio::test]
    async fn watch_sees_agent_changes() {
        let store = LayoutStore::new();
        store.provision("tab-1", SPECIALIST_ROUTE).await;
        let mut rx = store.watch("tab-1").await.expect("provisioned");

        store
            .update("tab-1", LayoutUpdate::agent(agents::CONTRATOS))
            .await
            .expect("provisioned");

        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow().agent, agents::CONTRATOS);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = LayoutStore::new();
        store.provision("tab-1", SPECIALIST_ROUTE).await;
        store.provision("tab-2", SPECIALIST_ROUTE).await;

        store
            .update("tab-1", LayoutUpdate::agent(agents::COORDINATOR))
            .await
            .expect("provisioned");

        let untouched = store.layout("tab-2").await.expect("provisioned");
        assert_eq!(untouched.agent, agents::DEFAULT_SPECIALIST);
    }

    #[test]
    fn partial_update_deserializes_missing_fields_as_none() {
        let update: LayoutUpdate =
            serde_json::from_str(r#"{"agent":"tributario_specialist"}"#).expect("valid update");
        assert_eq!(update.agent, Some(agents::TRIBUTARIO));
        assert!(update.title.is_none());
        assert!(update.theme.is_none());
    }
}
