//! Axum HTTP server for the chat gateway.
//!
//! Handles the proxy route, the navigation routes, and the session layout
//! API. Chat traffic is forwarded to the remote agent runtime and streamed
//! back verbatim; the gateway holds no chat history.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header},
    response::{Redirect, Response},
    routing::{get, post},
};
use tokio::sync::oneshot;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::agents;
use crate::config::RuntimeConfig;
use crate::error::{GatewayError, SessionError};
use crate::gateway::adapter::{self, Adapter};
use crate::gateway::types::*;
use crate::prompts;
use crate::session::{COORDINATOR_ROUTE, LayoutStore, LayoutUpdate, SPECIALIST_ROUTE};

/// Session used when a request carries no `x-session-id` header, so the
/// layout API stays reachable from plain curl.
pub const DEFAULT_SESSION: &str = "default";

/// Shared state for all gateway handlers.
pub struct GatewayState {
    pub config: RuntimeConfig,
    /// Outbound client for runtime and model-provider calls.
    pub http: reqwest::Client,
    /// Provider-scoped layout store; one entry per browser tab / terminal.
    pub layouts: LayoutStore,
    /// Shutdown signal sender.
    pub shutdown_tx: tokio::sync::RwLock<Option<oneshot::Sender<()>>>,
    pub startup_time: std::time::Instant,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl GatewayState {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            layouts: LayoutStore::new(),
            shutdown_tx: tokio::sync::RwLock::new(None),
            startup_time: std::time::Instant::now(),
            started_at: chrono::Utc::now(),
        }
    }
}

/// Start the gateway HTTP server.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<GatewayState>,
) -> Result<SocketAddr, GatewayError> {
    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::StartupFailed {
                name: "gateway".to_string(),
                reason: format!("Failed to bind to {}: {}", addr, e),
            })?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| GatewayError::StartupFailed {
            name: "gateway".to_string(),
            reason: format!("Failed to get local addr: {}", e),
        })?;

    // CORS: the gateway is a local-first service; only the web UI dev origin
    // and the gateway's own origin are allowed.
    let cors = CorsLayer::new()
        .allow_origin([
            format!("http://{}:{}", bound_addr.ip(), bound_addr.port())
                .parse()
                .expect("valid origin"),
            "http://localhost:3000".parse().expect("valid origin"),
        ])
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-session-id"),
        ]));

    let app = Router::new()
        // Navigation routes
        .route("/", get(root_handler))
        .route(COORDINATOR_ROUTE, get(post_generator_handler))
        .route(SPECIALIST_ROUTE, get(legal_specialists_handler))
        // Proxy route
        .route("/api/copilotkit", post(copilotkit_handler))
        // Session layout API
        .route(
            "/api/session/layout",
            get(layout_get_handler).post(layout_update_handler),
        )
        // Catalog + health + control plane
        .route("/api/agents", get(agents_handler))
        .route("/api/health", get(health_handler))
        .route("/api/gateway/status", get(gateway_status_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    *state.shutdown_tx.write().await = Some(shutdown_tx);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Gateway shutting down");
            })
            .await
        {
            tracing::error!("Gateway server error: {}", e);
        }
    });

    Ok(bound_addr)
}

/// Session key from the `x-session-id` header, defaulting to the shared
/// session when absent.
fn session_id(headers: &HeaderMap) -> String {
    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

fn session_error(err: SessionError) -> (StatusCode, String) {
    // A contract violation, not a user error; 409 makes it visible without
    // masquerading as a missing resource.
    (StatusCode::CONFLICT, err.to_string())
}

// --- Health + catalog ---

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        channel: "gateway",
    })
}

async fn agents_handler() -> Json<AgentListResponse> {
    Json(AgentListResponse {
        agents: agents::CATALOG,
    })
}

async fn gateway_status_handler(
    State(state): State<Arc<GatewayState>>,
) -> Json<GatewayStatusResponse> {
    Json(GatewayStatusResponse {
        status: "running",
        started_at: state.started_at.to_rfc3339(),
        uptime_secs: state.startup_time.elapsed().as_secs(),
        runtime_url: state.config.runtime_url.to_string(),
        model_fallback: state.config.model.is_some(),
    })
}

// --- Navigation routes ---

/// The root route always rebinds the session to the coordinator and hands
/// off to the post-generator surface, regardless of prior state.
async fn root_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Redirect, (StatusCode, String)> {
    let session = session_id(&headers);
    state.layouts.provision(&session, "/").await;
    state
        .layouts
        .update(&session, LayoutUpdate::agent(agents::COORDINATOR))
        .await
        .map_err(session_error)?;
    Ok(Redirect::temporary(COORDINATOR_ROUTE))
}

async fn route_page(
    state: &GatewayState,
    headers: &HeaderMap,
    route: &'static str,
) -> RoutePageResponse {
    let session = session_id(headers);
    let layout = state.layouts.provision(&session, route).await;
    RoutePageResponse {
        route,
        agent: layout.agent.to_string(),
        greeting: prompts::greeting_for(&layout.agent),
        suggestions: prompts::suggestions_for(&layout.agent),
    }
}

async fn post_generator_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Json<RoutePageResponse> {
    Json(route_page(&state, &headers, COORDINATOR_ROUTE).await)
}

async fn legal_specialists_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Json<RoutePageResponse> {
    Json(route_page(&state, &headers, SPECIALIST_ROUTE).await)
}

// --- Session layout API ---

async fn layout_get_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Json<crate::session::LayoutState>, (StatusCode, String)> {
    let session = session_id(&headers);
    state
        .layouts
        .layout(&session)
        .await
        .map(Json)
        .map_err(session_error)
}

async fn layout_update_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(update): Json<LayoutUpdate>,
) -> Result<Json<crate::session::LayoutState>, (StatusCode, String)> {
    let session = session_id(&headers);
    state
        .layouts
        .update(&session, update)
        .await
        .map(Json)
        .map_err(session_error)
}

// --- Proxy route ---

/// Forward a chat turn to the selected upstream and stream the response back
/// verbatim. No retry; transport failures surface as 502.
async fn copilotkit_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Result<Response, (StatusCode, String)> {
    let turn: ChatTurnRequest = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid chat request: {e}")))?;

    let adapter = adapter::select(&state.config, &turn)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let upstream = match adapter {
        Adapter::Runtime(url) => {
            tracing::debug!(agent = ?turn.agent, url = %url, "forwarding turn to agent runtime");
            adapter::forward_runtime(&state.http, url, body).await
        }
        Adapter::Model(model) => {
            tracing::debug!(model = %model.model, "direct model-call fallback");
            adapter::forward_model(&state.http, model, &turn).await
        }
    }
    .map_err(|e| {
        (
            StatusCode::BAD_GATEWAY,
            format!("Upstream request failed: {e}"),
        )
    })?;

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/event-stream")
        .to_string();

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .header("X-Accel-Buffering", "no")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build response: {e}"),
            )
        })
}
