#![recursion_limit = "256"]

mod config;
mod db;
mod routes;
mod services;
mod state;

use config::DeployMode;
use services::oauth::OAuthProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    tracing_subscriber::fmt::init();
    if dotenv_loaded {
        tracing::debug!("loaded .env");
    }

    let mode = DeployMode::from_env();
    let port = config::port()?;

    let pool = db::client()?.clone();
    db::migrate(&pool).await?;

    let oauth = state::AppState::oauth_from_env();
    for provider in OAuthProvider::ALL {
        if oauth.iter().any(|c| c.provider == provider) {
            tracing::info!(provider = provider.id(), "social sign-in enabled");
        } else {
            tracing::warn!(provider = provider.id(), "social sign-in not configured, provider disabled");
        }
    }

    let state = state::AppState::new(pool, mode, oauth);
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!(%port, mode = mode.as_str(), "messenger listening");
    axum::serve(listener, app).await?;
    Ok(())
}
