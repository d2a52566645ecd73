//! Process configuration read from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` with `dotenvy` and then builds these small typed
//! views of the environment. Each loader reads its variables once.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_PORT: u16 = 3000;

/// Deployment mode, from `APP_ENV`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeployMode {
    Production,
    #[default]
    Development,
}

impl DeployMode {
    /// Anything other than `production` (case-insensitive) is development.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "production" => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Parse a boolean-ish env value (`1/true/yes/on`, `0/false/no/off`).
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Listen port from `PORT`, defaulting to 3000.
///
/// # Errors
///
/// Returns an error if `PORT` is set but not a valid port number.
pub fn port() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}
