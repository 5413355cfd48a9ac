use std::net::SocketAddr;

use secrecy::SecretString;
use url::Url;

use crate::config::helpers::{optional_env, parse_string_env};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Direct-model fallback adapter (OpenAI-compatible provider).
///
/// Present only when an API key is configured; the proxy uses it for turns
/// that no agent claims.
#[derive(Debug, Clone)]
pub struct ModelAdapterConfig {
    pub api_key: SecretString,
    pub base_url: Url,
    pub model: String,
}

/// Resolved gateway runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Address the gateway binds to.
    pub bind: SocketAddr,
    /// Remote agent runtime endpoint (LangGraph-style server).
    pub runtime_url: Url,
    /// Optional direct-model fallback adapter.
    pub model: Option<ModelAdapterConfig>,
}

fn validate_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{raw}' is not a valid URL: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("unsupported URL scheme '{other}'"),
        }),
    }
}

fn validate_bind(key: &str, raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{raw}' is not a valid socket address"),
    })
}

impl RuntimeConfig {
    /// Resolve configuration from settings with environment overrides.
    ///
    /// Environment variables: `GATEWAY_BIND`, `LANGGRAPH_URL`,
    /// `OPENROUTER_API_KEY`, `OPENROUTER_BASE_URL`, `OPENROUTER_MODEL`.
    /// All are optional; documented defaults apply.
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let bind = {
            let raw = parse_string_env("GATEWAY_BIND", settings.gateway.bind.clone())?;
            validate_bind("GATEWAY_BIND", &raw)?
        };

        let runtime_url = {
            let raw = parse_string_env("LANGGRAPH_URL", settings.gateway.runtime_url.clone())?;
            validate_url("LANGGRAPH_URL", &raw)?
        };

        // The model adapter is opt-in: no API key means no fallback.
        let model = match optional_env("OPENROUTER_API_KEY")? {
            None => None,
            Some(api_key) => {
                let base_raw =
                    parse_string_env("OPENROUTER_BASE_URL", settings.model.base_url.clone())?;
                Some(ModelAdapterConfig {
                    api_key: SecretString::from(api_key),
                    base_url: validate_url("OPENROUTER_BASE_URL", &base_raw)?,
                    model: parse_string_env("OPENROUTER_MODEL", settings.model.model.clone())?,
                })
            }
        };

        Ok(Self {
            bind,
            runtime_url,
            model,
        })
    }
}
