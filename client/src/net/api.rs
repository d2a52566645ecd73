//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth failures
//! surface as a message in the form instead of crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::User;
#[cfg(feature = "hydrate")]
use super::types::{ApiErrorBody, LoginRequest, RegisterRequest};
use crate::state::auth_form::SocialProvider;

/// Browser destination that starts the OAuth flow for `provider`.
#[must_use]
pub fn social_sign_in_url(provider: SocialProvider) -> String {
    format!("/auth/{}", provider.id())
}

#[cfg(any(test, feature = "hydrate"))]
fn failed_message(action: &str, status: u16, server_error: Option<String>) -> String {
    match server_error {
        Some(error) if !error.trim().is_empty() => format!("{action} failed: {error}"),
        _ => format!("{action} failed: {status}"),
    }
}

#[cfg(feature = "hydrate")]
async fn read_user(resp: gloo_net::http::Response, action: &str) -> Result<User, String> {
    if !resp.ok() {
        let status = resp.status();
        let server_error = resp.json::<ApiErrorBody>().await.ok().map(|b| b.error);
        return Err(failed_message(action, status, server_error));
    }
    resp.json::<User>().await.map_err(|e| e.to_string())
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await;
    }
}

/// Create an account via `POST /api/register`. The server signs the new
/// user in on success.
///
/// # Errors
///
/// Returns an error string if the request fails or the server rejects it.
pub async fn register(name: &str, email: &str, password: &str) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/api/register")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_user(resp, "registration").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err("not available on server".to_owned())
    }
}

/// Sign in with email and password via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an error string if the request fails or the credentials are rejected.
pub async fn login(email: &str, password: &str) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_user(resp, "sign in").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}
