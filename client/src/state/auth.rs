//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware pages to coordinate sign-in redirects
//! and identity-dependent rendering.

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the first `/api/auth/me` lookup has completed.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}
