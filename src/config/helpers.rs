use crate::error::ConfigError;

/// Read an environment variable, treating empty values as unset.
pub fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value is not valid UTF-8".to_string(),
        }),
    }
}

/// Resolve a string config value: environment wins, settings value otherwise.
pub fn parse_string_env(key: &str, fallback: String) -> Result<String, ConfigError> {
    Ok(optional_env(key)?.unwrap_or(fallback))
}
