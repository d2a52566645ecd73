//! Process-wide database client and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request handler shares one `PgPool`. The pool is created lazily on
//! first use and cached for the life of the process; `PgPool` is internally
//! reference counted, so handing out `&'static PgPool` or clones is cheap.
//!
//! DESIGN
//! ======
//! Creation goes through a `OnceLock`, so concurrent first calls build at
//! most one pool. The pool connects lazily: construction never touches the
//! network, and the first query (normally the startup migration) surfaces
//! connection problems. The deployment mode is read once, at creation time,
//! to pick the default pool size.


use std::sync::OnceLock;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::DeployMode;

const PRODUCTION_MAX_CONNECTIONS: u32 = 5;
const DEVELOPMENT_MAX_CONNECTIONS: u32 = 2;

static CLIENT: ClientSlot = ClientSlot::new();

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingUrl,
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Inputs needed to build the pool.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub mode: DeployMode,
    pub max_connections: u32,
}

impl DbSettings {
    #[must_use]
    pub fn new(url: String, mode: DeployMode) -> Self {
        Self { url, mode, max_connections: resolve_max_connections(None, mode) }
    }

    /// Read `DATABASE_URL`, `APP_ENV`, and `DB_MAX_CONNECTIONS`.
    ///
    /// # Errors
    ///
    /// Returns `DbError::MissingUrl` if `DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, DbError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| DbError::MissingUrl)?;
        let mut settings = Self::new(url, DeployMode::from_env());
        settings.max_connections =
            resolve_max_connections(std::env::var("DB_MAX_CONNECTIONS").ok().as_deref(), settings.mode);
        Ok(settings)
    }
}

/// Pool size: an explicit positive override wins, otherwise the mode default.
#[must_use]
pub fn resolve_max_connections(raw: Option<&str>, mode: DeployMode) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(match mode {
            DeployMode::Production => PRODUCTION_MAX_CONNECTIONS,
            DeployMode::Development => DEVELOPMENT_MAX_CONNECTIONS,
        })
}

/// A lazily-filled, write-once holder for a pool.
pub struct ClientSlot {
    pool: OnceLock<PgPool>,
}

impl ClientSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { pool: OnceLock::new() }
    }

    /// The cached pool, if one has been created.
    #[must_use]
    pub fn get(&self) -> Option<&PgPool> {
        self.pool.get()
    }

    /// Return the cached pool, creating it from `settings` on first use.
    ///
    /// Settings passed after the first successful call are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidUrl` if the pool does not exist yet and the
    /// URL cannot be parsed. The slot stays empty in that case.
    pub fn get_or_init(&self, settings: &DbSettings) -> Result<&PgPool, DbError> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }
        let options: PgConnectOptions = settings.url.parse().map_err(DbError::InvalidUrl)?;
        Ok(self.pool.get_or_init(|| {
            tracing::info!(
                mode = settings.mode.as_str(),
                max_connections = settings.max_connections,
                "creating database pool"
            );
            PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect_lazy_with(options)
        }))
    }
}

impl Default for ClientSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide pool. The first call reads settings from the environment.
///
/// # Errors
///
/// Returns an error if the pool has not been created yet and the environment
/// does not describe a usable database.
pub fn client() -> Result<&'static PgPool, DbError> {
    if let Some(pool) = CLIENT.get() {
        return Ok(pool);
    }
    let settings = DbSettings::from_env()?;
    CLIENT.get_or_init(&settings)
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("src/db/migrations").run(pool).await?;
    Ok(())
}
