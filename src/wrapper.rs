//! Session wrapper: binds the chat surface to the layout store's active
//! agent and keeps the two in sync.
//!
//! Agent switching is split into two independent operations, re-binding the
//! surface (which resets agent runtime state) and navigating, composed here
//! and nowhere else.

use std::sync::Arc;

use url::Url;

use crate::agents::{self, AgentId};
use crate::error::SessionError;
use crate::session::{COORDINATOR_ROUTE, LayoutStore, LayoutUpdate, SessionId};
use crate::surface::ChatSurface;
use crate::surface::client::ProxyClient;

/// Route-change sink. The terminal driver switches views; tests record.
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

/// Navigator that ignores navigation, for headless use.
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&mut self, _route: &str) {}
}

/// Supplies the active agent and proxy URL to the chat surface, re-binding
/// it whenever the layout store's agent changes.
pub struct SessionWrapper {
    store: Arc<LayoutStore>,
    session: SessionId,
    surface: ChatSurface,
}

impl SessionWrapper {
    /// Provision the session for `path` and bind a surface to its agent.
    pub async fn bind(
        store: Arc<LayoutStore>,
        session: impl Into<SessionId>,
        path: &str,
        gateway: Url,
    ) -> Self {
        let session = session.into();
        let layout = store.provision(&session, path).await;
        let client = ProxyClient::new(gateway, session.clone());
        let surface = ChatSurface::new(layout.agent, client);
        Self {
            store,
            session,
            surface,
        }
    }

    pub fn surface(&self) -> &ChatSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ChatSurface {
        &mut self.surface
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Switch the active agent.
    ///
    /// Reselecting the current agent is a no-op (returns `false`). Otherwise
    /// the layout store is updated, the surface is re-bound (runtime state
    /// reset), and, only when the coordinator was selected, the navigator is
    /// pointed at the post-generator route.
    pub async fn select_agent(
        &mut self,
        agent: AgentId,
        navigator: &mut dyn Navigator,
    ) -> Result<bool, SessionError> {
        if agent == self.surface.agent() {
            return Ok(false);
        }

        self.store
            .update(&self.session, LayoutUpdate::agent(agent))
            .await?;
        self.surface.rebind(agent);

        if agent == agents::COORDINATOR {
            navigator.navigate(COORDINATOR_ROUTE);
        }
        Ok(true)
    }

    /// Re-bind the surface if the store's agent changed behind our back
    /// (another dependent of the same session updated the layout).
    pub async fn sync(&mut self) -> Result<(), SessionError> {
        let layout = self.store.layout(&self.session).await?;
        if layout.agent != self.surface.agent() {
            self.surface.rebind(layout.agent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AgentRuntimeState, SPECIALIST_ROUTE};

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: &str) {
            self.routes.push(route.to_string());
        }
    }

    fn gateway_url() -> Url {
        Url::parse("http://127.0.0.1:3000").expect("valid url")
    }

    async fn wrapper() -> SessionWrapper {
        let store = Arc::new(LayoutStore::new());
        SessionWrapper::bind(store, "tab-1", SPECIALIST_ROUTE, gateway_url()).await
    }

    /// Leave the surface with non-default runtime state, through the same
    /// action path the backend would use.
    fn dirty_runtime(wrapper: &mut SessionWrapper) {
        wrapper
            .surface_mut()
            .dispatch_action(
                crate::surface::actions::LEGAL_ANALYSIS,
                &serde_json::json!({ "area": "Societário", "analysis": "parecer" }),
            )
            .expect("valid action");
    }

    #[tokio::test]
    async fn bind_derives_agent_from_path() {
        let wrapper = wrapper().await;
        assert_eq!(wrapper.surface().agent(), agents::DEFAULT_SPECIALIST);
    }

    #[tokio::test]
    async fn switching_agents_resets_runtime_and_updates_store() {
        let mut wrapper = wrapper().await;
        dirty_runtime(&mut wrapper);

        let mut navigator = RecordingNavigator::default();
        let switched = wrapper
            .select_agent(agents::TRIBUTARIO, &mut navigator)
            .await
            .expect("provisioned");

        assert!(switched);
        assert_eq!(wrapper.surface().agent(), agents::TRIBUTARIO);
        assert_eq!(*wrapper.surface().runtime(), AgentRuntimeState::default());
        // Specialist switches never navigate.
        assert!(navigator.routes.is_empty());

        let layout = wrapper.store.layout("tab-1").await.expect("provisioned");
        assert_eq!(layout.agent, agents::TRIBUTARIO);
    }

    #[tokio::test]
    async fn reselecting_current_agent_is_a_no_op() {
        let mut wrapper = wrapper().await;
        dirty_runtime(&mut wrapper);
        let before = wrapper.surface().runtime().clone();

        let mut navigator = RecordingNavigator::default();
        let switched = wrapper
            .select_agent(agents::DEFAULT_SPECIALIST, &mut navigator)
            .await
            .expect("provisioned");

        assert!(!switched);
        // Runtime state is left exactly as it was.
        assert_eq!(*wrapper.surface().runtime(), before);
        assert!(navigator.routes.is_empty());
    }

    #[tokio::test]
    async fn selecting_coordinator_navigates_to_post_generator() {
        let mut wrapper = wrapper().await;

        let mut navigator = RecordingNavigator::default();
        wrapper
            .select_agent(agents::COORDINATOR, &mut navigator)
            .await
            .expect("provisioned");

        assert_eq!(navigator.routes, vec![COORDINATOR_ROUTE.to_string()]);
        assert_eq!(wrapper.surface().agent(), agents::COORDINATOR);
    }

    #[tokio::test]
    async fn sync_rebinds_when_store_changed_elsewhere() {
        let store = Arc::new(LayoutStore::new());
        let mut wrapper =
            SessionWrapper::bind(store.clone(), "tab-1", SPECIALIST_ROUTE, gateway_url()).await;

        store
            .update("tab-1", LayoutUpdate::agent(agents::CONTRATOS))
            .await
            .expect("provisioned");

        wrapper.sync().await.expect("provisioned");
        assert_eq!(wrapper.surface().agent(), agents::CONTRATOS);
    }
}
