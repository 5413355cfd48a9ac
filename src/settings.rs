//! TOML-backed settings with built-in defaults.
//!
//! Settings are the file-level layer of configuration; environment variables
//! override them during [`crate::config::RuntimeConfig::resolve`].

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_RUNTIME_URL: &str = "http://localhost:8000/copilotkit";
pub const DEFAULT_MODEL_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-pro";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Settings file name looked up in the working directory.
pub const SETTINGS_FILE: &str = "lexgate.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub model: ModelSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Address the gateway binds to.
    pub bind: String,
    /// Remote agent runtime endpoint the proxy forwards to.
    pub runtime_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// OpenAI-compatible provider base URL for the direct-model fallback.
    pub base_url: String,
    /// Model identifier sent to the provider.
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway: GatewaySettings::default(),
            model: ModelSettings::default(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            runtime_url: DEFAULT_RUNTIME_URL.to_string(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MODEL_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `lexgate.toml` in the working directory, falling
    /// back to defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::SettingsParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_fallbacks() {
        let settings = Settings::default();
        assert_eq!(settings.gateway.runtime_url, DEFAULT_RUNTIME_URL);
        assert_eq!(settings.model.base_url, DEFAULT_MODEL_BASE_URL);
        assert_eq!(settings.model.model, DEFAULT_MODEL);
    }

    #[test]
    fn partial_settings_file_keeps_defaults_for_missing_sections() {
        let parsed: Settings =
            toml::from_str("[gateway]\nruntime_url = \"http://10.0.0.5:8000/copilotkit\"\n")
                .expect("valid settings");
        assert_eq!(
            parsed.gateway.runtime_url,
            "http://10.0.0.5:8000/copilotkit"
        );
        assert_eq!(parsed.gateway.bind, DEFAULT_BIND);
        assert_eq!(parsed.model.model, DEFAULT_MODEL);
    }
}
