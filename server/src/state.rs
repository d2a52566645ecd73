//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the process-wide database pool and the OAuth providers that were
//! configured at startup.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::DeployMode;
use crate::services::oauth::{OAuthConfig, OAuthProvider};

/// Shared application state, injected into Axum handlers via State extractor.
/// Axum requires Clone; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub mode: DeployMode,
    /// Providers with complete configuration. Missing ones are disabled.
    pub oauth: Arc<HashMap<OAuthProvider, OAuthConfig>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, mode: DeployMode, oauth: Vec<OAuthConfig>) -> Self {
        let oauth = oauth.into_iter().map(|c| (c.provider, c)).collect();
        Self { pool, mode, oauth: Arc::new(oauth) }
    }

    /// Load every provider whose env vars are present.
    #[must_use]
    pub fn oauth_from_env() -> Vec<OAuthConfig> {
        OAuthProvider::ALL.into_iter().filter_map(OAuthConfig::from_env).collect()
    }

    #[must_use]
    pub fn oauth_config(&self, provider: OAuthProvider) -> Option<&OAuthConfig> {
        self.oauth.get(&provider)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn oauth_config_lookup_by_provider() {
        let state = test_helpers::test_app_state(vec![test_helpers::github_config()]);
        assert!(state.oauth_config(OAuthProvider::Github).is_some());
        assert!(state.oauth_config(OAuthProvider::Google).is_none());
    }

    #[tokio::test]
    async fn later_duplicate_provider_wins() {
        let mut second = test_helpers::github_config();
        second.client_id = "other".into();
        let state = test_helpers::test_app_state(vec![test_helpers::github_config(), second]);
        assert_eq!(state.oauth_config(OAuthProvider::Github).map(|c| c.client_id.as_str()), Some("other"));
    }
}
