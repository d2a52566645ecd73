//! Shared DTOs for the client/server auth boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON bodies produced and accepted by the server's
//! `/api/register` and `/api/auth/*` routes so serde round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Signed-in user as returned by `/api/auth/me`, login, and registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address, absent for some social accounts.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub image: Option<String>,
    /// How the session was established (`"credentials"`, `"github"`, `"google"`).
    #[serde(default = "default_auth_method")]
    pub auth_method: String,
}

fn default_auth_method() -> String {
    "session".to_owned()
}

/// Body of `POST /api/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Error body returned by API routes on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Query parameter carrying an [`AuthRedirectError`] code back to `/`.
pub const AUTH_ERROR_PARAM: &str = "auth_error";

/// Why a browser-level sign-in redirect (OAuth start or callback) failed.
///
/// The server sends the browser to `/?auth_error=<code>` and the auth form
/// turns the code back into a failure line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRedirectError {
    UnknownProvider,
    ProviderUnavailable,
    Declined,
    InvalidState,
    AccountNotLinked,
    SignInFailed,
}

impl AuthRedirectError {
    pub const ALL: [Self; 6] = [
        Self::UnknownProvider,
        Self::ProviderUnavailable,
        Self::Declined,
        Self::InvalidState,
        Self::AccountNotLinked,
        Self::SignInFailed,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UnknownProvider => "unknown_provider",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::Declined => "declined",
            Self::InvalidState => "invalid_state",
            Self::AccountNotLinked => "account_not_linked",
            Self::SignInFailed => "sign_in_failed",
        }
    }

    /// Parse a code. Unrecognised codes read as a generic failure.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self::ALL.into_iter().find(|e| e.code() == code).unwrap_or(Self::SignInFailed)
    }

    /// Location the server redirects to for this failure.
    #[must_use]
    pub fn home_url(self) -> String {
        format!("/?{AUTH_ERROR_PARAM}={}", self.code())
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::UnknownProvider => "That sign-in provider is not supported",
            Self::ProviderUnavailable => "That sign-in provider is not available right now",
            Self::Declined => "Sign-in was cancelled",
            Self::InvalidState => "Sign-in expired, please try again",
            Self::AccountNotLinked => "An account with this email already exists. Sign in with your password",
            Self::SignInFailed => "Sign-in failed, please try again",
        }
    }
}
