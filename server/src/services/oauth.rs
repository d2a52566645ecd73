//! OAuth sign-in for GitHub and Google: provider config, code exchange,
//! profile fetch and account linking.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "messenger";

/// Supported identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Github,
    Google,
}

impl OAuthProvider {
    pub const ALL: [Self; 2] = [Self::Github, Self::Google];

    /// Parse the `{provider}` path segment.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "github" => Some(Self::Github),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Google => "google",
        }
    }

    fn env_prefix(self) -> &'static str {
        match self {
            Self::Github => "GITHUB",
            Self::Google => "GOOGLE",
        }
    }

    fn authorize_endpoint(self) -> &'static str {
        match self {
            Self::Github => "https://github.com/login/oauth/authorize",
            Self::Google => "https://accounts.google.com/o/oauth2/v2/auth",
        }
    }

    fn token_endpoint(self) -> &'static str {
        match self {
            Self::Github => "https://github.com/login/oauth/access_token",
            Self::Google => "https://oauth2.googleapis.com/token",
        }
    }

    fn profile_endpoint(self) -> &'static str {
        match self {
            Self::Github => "https://api.github.com/user",
            Self::Google => "https://openidconnect.googleapis.com/v1/userinfo",
        }
    }

    fn scope(self) -> &'static str {
        match self {
            Self::Github => "read:user user:email",
            Self::Google => "openid email profile",
        }
    }
}

/// OAuth client registration loaded from environment.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub provider: OAuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthConfig {
    /// Load from `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`,
    /// `{PREFIX}_REDIRECT_URI`. Returns `None` if any are missing (the
    /// provider will be disabled).
    #[must_use]
    pub fn from_env(provider: OAuthProvider) -> Option<Self> {
        let prefix = provider.env_prefix();
        let var = |suffix: &str| std::env::var(format!("{prefix}_{suffix}")).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            provider,
            client_id: var("CLIENT_ID")?,
            client_secret: var("CLIENT_SECRET")?,
            redirect_uri: var("REDIRECT_URI")?,
        })
    }

    /// Build the provider authorization URL carrying the CSRF `state`.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Config` if the URL cannot be assembled.
    pub fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            self.provider.authorize_endpoint(),
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.provider.scope()),
                ("state", state),
            ],
        )
        .map_err(|e| OAuthError::Config(e.to_string()))?;
        Ok(url.into())
    }
}

/// Profile fields we keep from any provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider_account_id: String,
    pub name: String,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

impl From<GitHubUser> for OAuthProfile {
    fn from(gh: GitHubUser) -> Self {
        Self {
            provider_account_id: gh.id.to_string(),
            name: gh.name.filter(|n| !n.trim().is_empty()).unwrap_or(gh.login),
            email: gh.email.map(|e| e.to_ascii_lowercase()),
            image: gh.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleUser {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    picture: Option<String>,
}

impl From<GoogleUser> for OAuthProfile {
    fn from(g: GoogleUser) -> Self {
        let email = g.email.filter(|_| g.email_verified).map(|e| e.to_ascii_lowercase());
        let name = g
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| email.as_deref().and_then(|e| e.split('@').next()).map(str::to_owned))
            .unwrap_or_else(|| "Google user".to_owned());
        Self { provider_account_id: g.sub, name, email, image: g.picture }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("oauth configuration error: {0}")]
    Config(String),
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("provider api error: {0}")]
    ProviderApi(String),
    #[error("email belongs to an account that is not linked to this provider")]
    AccountNotLinked,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

fn http_client() -> Result<reqwest::Client, OAuthError> {
    reqwest::Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| OAuthError::Config(e.to_string()))
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(config: &OAuthConfig, code: &str) -> Result<String, OAuthError> {
    let client = http_client()?;
    let resp = client
        .post(config.provider.token_endpoint())
        .header("Accept", "application/json")
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

    let body = resp
        .text()
        .await
        .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
    parse_token_response(&body)
}

fn parse_token_response(body: &str) -> Result<String, OAuthError> {
    let token_resp: TokenResponse =
        serde_json::from_str(body).map_err(|_| OAuthError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token_resp.access_token)
}

/// Fetch the signed-in user's profile from the provider.
pub async fn fetch_profile(config: &OAuthConfig, access_token: &str) -> Result<OAuthProfile, OAuthError> {
    let client = http_client()?;
    let resp = client
        .get(config.provider.profile_endpoint())
        .bearer_auth(access_token)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| OAuthError::ProviderApi(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(OAuthError::ProviderApi(format!("{status}: {body}")));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| OAuthError::ProviderApi(e.to_string()))?;
    parse_profile(config.provider, &body)
}

fn parse_profile(provider: OAuthProvider, body: &str) -> Result<OAuthProfile, OAuthError> {
    let parsed = match provider {
        OAuthProvider::Github => serde_json::from_str::<GitHubUser>(body).map(OAuthProfile::from),
        OAuthProvider::Google => serde_json::from_str::<GoogleUser>(body).map(OAuthProfile::from),
    };
    parsed.map_err(|e| OAuthError::ProviderApi(format!("unexpected profile: {e}")))
}

/// Find or create the user linked to this provider account. Returns the
/// user's UUID.
///
/// A new provider account whose email already belongs to another user is
/// rejected with `AccountNotLinked` instead of being merged silently.
pub async fn upsert_oauth_user(pool: &PgPool, provider: OAuthProvider, profile: &OAuthProfile) -> Result<Uuid, OAuthError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query("SELECT user_id FROM accounts WHERE provider = $1 AND provider_account_id = $2")
        .bind(provider.id())
        .bind(&profile.provider_account_id)
        .fetch_optional(&mut *tx)
        .await?;

    if let Some(row) = existing {
        let user_id: Uuid = row.get("user_id");
        sqlx::query("UPDATE users SET image = COALESCE($2, image), updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(&profile.image)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        return Ok(user_id);
    }

    let inserted = sqlx::query(
        r"INSERT INTO users (name, email, image)
          VALUES ($1, $2, $3)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.image)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(row) = inserted else {
        return Err(OAuthError::AccountNotLinked);
    };
    let user_id: Uuid = row.get("id");

    sqlx::query("INSERT INTO accounts (user_id, provider, provider_account_id) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(provider.id())
        .bind(&profile.provider_account_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}

#[cfg(test)]
#[path = "oauth_test.rs"]
mod tests;
