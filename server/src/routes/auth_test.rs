use super::*;

// =============================================================================
// resolve_cookie_secure
// =============================================================================

#[test]
fn cookie_secure_explicit_override_wins() {
    let uris = ["https://chat.example.com/auth/github/callback"];
    assert!(!resolve_cookie_secure(Some(false), uris.into_iter(), DeployMode::Production));
    assert!(resolve_cookie_secure(Some(true), std::iter::empty(), DeployMode::Development));
}

#[test]
fn cookie_secure_inferred_from_https_redirect() {
    let uris = ["http://localhost:3000/auth/google/callback", "https://chat.example.com/auth/github/callback"];
    assert!(resolve_cookie_secure(None, uris.into_iter(), DeployMode::Development));
}

#[test]
fn cookie_secure_production_default() {
    assert!(resolve_cookie_secure(None, std::iter::empty(), DeployMode::Production));
    assert!(!resolve_cookie_secure(None, ["http://localhost/cb"].into_iter(), DeployMode::Development));
}

// =============================================================================
// Cookies
// =============================================================================

#[test]
fn session_cookie_attributes() {
    let cookie = session_cookie("tok".to_owned(), true);
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::days(30)));
}

#[test]
fn expired_cookie_clears_value() {
    let cookie = expired_cookie(OAUTH_STATE_COOKIE_NAME, false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.secure(), Some(false));
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn account_errors_map_to_client_statuses() {
    assert_eq!(account_error_to_status(&AccountError::MissingName), StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_status(&AccountError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_status(&AccountError::WeakPassword), StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_status(&AccountError::EmailTaken), StatusCode::CONFLICT);
    assert_eq!(account_error_to_status(&AccountError::InvalidCredentials), StatusCode::UNAUTHORIZED);
}

#[test]
fn account_db_error_is_server_error() {
    let err = AccountError::Db(sqlx::Error::RowNotFound);
    assert_eq!(account_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn oauth_errors_map_to_generic_redirect_codes() {
    assert_eq!(oauth_error_to_redirect(&OAuthError::AccountNotLinked), AuthRedirectError::AccountNotLinked);
    for err in [
        OAuthError::TokenExchange("bad_verification_code".into()),
        OAuthError::ProviderApi("401 Unauthorized: {\"message\":\"Bad credentials\"}".into()),
        OAuthError::Config("x".into()),
        OAuthError::Db(sqlx::Error::RowNotFound),
    ] {
        assert_eq!(oauth_error_to_redirect(&err), AuthRedirectError::SignInFailed);
    }
}

#[test]
fn auth_error_redirect_targets_form_and_drops_state() {
    let resp = auth_error_redirect(CookieJar::new(), AuthRedirectError::Declined, false);
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[axum::http::header::LOCATION], "/?auth_error=declined");
    let cookie = resp.headers()[axum::http::header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("oauth_state=;"));
    assert!(cookie.contains("Max-Age=0"));
}
