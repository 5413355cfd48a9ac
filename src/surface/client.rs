//! HTTP client for the gateway's proxy route.

use url::Url;

use crate::error::SurfaceError;
use crate::gateway::types::ChatTurnRequest;

/// Client bound to one gateway and one session.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    gateway: Url,
    session: String,
}

impl ProxyClient {
    pub fn new(gateway: Url, session: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            gateway,
            session: session.into(),
        }
    }

    pub fn gateway(&self) -> &Url {
        &self.gateway
    }

    /// Send one chat turn; the caller consumes the streamed response body.
    ///
    /// Non-success statuses (including 502 from an unreachable runtime) are
    /// turned into [`SurfaceError::Gateway`] with the upstream message.
    pub async fn send_turn(&self, turn: &ChatTurnRequest) -> Result<reqwest::Response, SurfaceError> {
        let mut url = self.gateway.clone();
        url.set_path("/api/copilotkit");

        let response = self
            .http
            .post(url)
            .header("x-session-id", &self.session)
            .json(turn)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SurfaceError::Gateway {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}
