//! Auth routes: credential registration and sign-in, OAuth flow, session cookie.

use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::net::types::AuthRedirectError;
use serde::Deserialize;
use time::Duration;
use uuid::Uuid;

use crate::config::{DeployMode, env_bool};
use crate::services::account::{self, AccountError};
use crate::services::oauth::{self, OAuthError, OAuthProvider};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
pub(crate) const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
const SESSION_MAX_AGE_DAYS: i64 = 30;
const SIGNED_IN_HOME: &str = "/users";

/// Decide the cookie `Secure` flag: explicit override, then any `https://`
/// OAuth redirect URI, then production mode.
pub(crate) fn resolve_cookie_secure<'a>(
    explicit: Option<bool>,
    mut redirect_uris: impl Iterator<Item = &'a str>,
    mode: DeployMode,
) -> bool {
    if let Some(value) = explicit {
        return value;
    }
    redirect_uris.any(|uri| uri.starts_with("https://")) || mode.is_production()
}

fn cookie_secure(state: &AppState) -> bool {
    resolve_cookie_secure(
        env_bool("COOKIE_SECURE"),
        state.oauth.values().map(|c| c.redirect_uri.as_str()),
        state.mode,
    )
}

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

pub(crate) fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::MissingName | AccountError::NameTooLong | AccountError::InvalidEmail | AccountError::WeakPassword => {
            StatusCode::BAD_REQUEST
        }
        AccountError::EmailTaken => StatusCode::CONFLICT,
        AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountError::Password(_) | AccountError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn account_error_response(err: &AccountError) -> Response {
    let status = account_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "account request failed");
        return api_error(status, "internal error");
    }
    api_error(status, &err.to_string())
}

/// Code shown to the browser for a failed OAuth sign-in. Provider and
/// database detail stays in the server log.
pub(crate) fn oauth_error_to_redirect(err: &OAuthError) -> AuthRedirectError {
    match err {
        OAuthError::AccountNotLinked => AuthRedirectError::AccountNotLinked,
        OAuthError::Config(_) | OAuthError::TokenExchange(_) | OAuthError::ProviderApi(_) | OAuthError::Db(_) => {
            AuthRedirectError::SignInFailed
        }
    }
}

/// Send the browser back to the sign-in form with a failure code, dropping
/// any pending OAuth state.
fn auth_error_redirect(jar: CookieJar, err: AuthRedirectError, secure: bool) -> Response {
    let jar = jar.add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary(&err.home_url())).into_response()
}

/// Create a session for `user_id` and answer with the user JSON plus cookie.
async fn start_session(state: &AppState, jar: CookieJar, user_id: Uuid, auth_method: &str, status: StatusCode) -> Response {
    let token = match session::create_session(&state.pool, user_id, auth_method).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error");
        }
    };
    let user = match session::validate_session(&state.pool, &token).await {
        Ok(Some(user)) => user,
        Ok(None) => return api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error");
        }
    };
    tracing::info!(user_id = %user.id, auth_method, "user signed in");
    let jar = jar.add(session_cookie(token, cookie_secure(state)));
    (status, jar, Json(user)).into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user })
    }
}

// =============================================================================
// CREDENTIAL HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct RegisterBody {
    name: String,
    email: String,
    password: String,
}

/// `POST /api/register`: Create a credential account and sign it in.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Json(body): Json<RegisterBody>) -> Response {
    let new_account = match account::validate_registration(&body.name, &body.email, &body.password) {
        Ok(a) => a,
        Err(e) => return account_error_response(&e),
    };
    let user_id = match account::register(&state.pool, &new_account).await {
        Ok(id) => id,
        Err(e) => return account_error_response(&e),
    };
    tracing::info!(%user_id, "account registered");
    start_session(&state, jar, user_id, "credentials", StatusCode::CREATED).await
}

#[derive(Deserialize)]
pub struct LoginBody {
    email: String,
    password: String,
}

/// `POST /api/auth/login`: Email + password sign-in.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginBody>) -> Response {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "email and password are required");
    }
    let user_id = match account::verify_credentials(&state.pool, &body.email, &body.password).await {
        Ok(id) => id,
        Err(e) => return account_error_response(&e),
    };
    start_session(&state, jar, user_id, "credentials", StatusCode::OK).await
}

/// `GET /api/auth/me`: Return current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: Delete the session, if any, and always clear the
/// cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if !token.is_empty() {
        if let Err(e) = session::delete_session(&state.pool, token).await {
            tracing::warn!(error = %e, "session delete failed");
        }
    }
    let jar = jar.add(expired_cookie(COOKIE_NAME, cookie_secure(&state)));
    (jar, StatusCode::NO_CONTENT)
}

// =============================================================================
// OAUTH HANDLERS
// =============================================================================

/// `GET /auth/{provider}`: Redirect to the provider's authorization page.
pub async fn oauth_redirect(State(state): State<AppState>, jar: CookieJar, Path(provider): Path<String>) -> Response {
    let secure = cookie_secure(&state);
    let Some(provider) = OAuthProvider::from_id(&provider) else {
        return auth_error_redirect(jar, AuthRedirectError::UnknownProvider, secure);
    };
    let Some(config) = state.oauth_config(provider) else {
        tracing::warn!(provider = provider.id(), "sign-in requested for unconfigured provider");
        return auth_error_redirect(jar, AuthRedirectError::ProviderUnavailable, secure);
    };

    let oauth_state = session::generate_token();
    let url = match config.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, provider = provider.id(), "authorize url failed");
            return auth_error_redirect(jar, AuthRedirectError::SignInFailed, secure);
        }
    };

    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(10));

    (jar.add(cookie), Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/{provider}/callback`: Exchange code, upsert user, set cookie,
/// redirect to the signed-in landing page.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(provider): Path<String>,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let secure = cookie_secure(&state);
    let Some(provider) = OAuthProvider::from_id(&provider) else {
        return auth_error_redirect(jar, AuthRedirectError::UnknownProvider, secure);
    };
    let Some(config) = state.oauth_config(provider) else {
        return auth_error_redirect(jar, AuthRedirectError::ProviderUnavailable, secure);
    };

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(provider = provider.id(), error, "oauth sign-in declined");
        return auth_error_redirect(jar, AuthRedirectError::Declined, secure);
    }

    // Verify OAuth CSRF state from cookie.
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    let state_ok = params
        .state
        .as_deref()
        .is_some_and(|callback_state| !expected_state.is_empty() && expected_state == callback_state);
    if !state_ok {
        tracing::warn!(provider = provider.id(), "oauth callback with missing or mismatched state");
        return auth_error_redirect(jar, AuthRedirectError::InvalidState, secure);
    }
    let Some(code) = params.code.as_deref() else {
        tracing::warn!(provider = provider.id(), "oauth callback without code");
        return auth_error_redirect(jar, AuthRedirectError::SignInFailed, secure);
    };

    let user_id = match complete_oauth(&state, config, code).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, provider = provider.id(), "oauth sign-in failed");
            return auth_error_redirect(jar, oauth_error_to_redirect(&e), secure);
        }
    };

    let token = match session::create_session(&state.pool, user_id, provider.id()).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return auth_error_redirect(jar, AuthRedirectError::SignInFailed, secure);
        }
    };
    tracing::info!(%user_id, provider = provider.id(), "user signed in");

    let jar = jar
        .add(session_cookie(token, secure))
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary(SIGNED_IN_HOME)).into_response()
}

async fn complete_oauth(state: &AppState, config: &oauth::OAuthConfig, code: &str) -> Result<Uuid, OAuthError> {
    let access_token = oauth::exchange_code(config, code).await?;
    let profile = oauth::fetch_profile(config, &access_token).await?;
    oauth::upsert_oauth_user(&state.pool, config.provider, &profile).await
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
