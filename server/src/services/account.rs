//! Credential accounts: registration and password sign-in.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::password::{self, PasswordError};

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("name is required")]
    MissingName,
    #[error("name is too long")]
    NameTooLong,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Some(normalized),
        _ => None,
    }
}

/// Check and normalize registration fields.
///
/// # Errors
///
/// Returns the first failing rule: name, then email, then password.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<NewAccount, AccountError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AccountError::MissingName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AccountError::NameTooLong);
    }
    let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::WeakPassword);
    }
    Ok(NewAccount { name: name.to_owned(), email, password: password.to_owned() })
}

/// Create a credential account. Returns the new user's id.
pub async fn register(pool: &PgPool, account: &NewAccount) -> Result<Uuid, AccountError> {
    let hashed = password::hash_password(&account.password)?;
    let row = sqlx::query(
        r"INSERT INTO users (name, email, hashed_password)
          VALUES ($1, $2, $3)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&account.name)
    .bind(&account.email)
    .bind(hashed)
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.get("id")).ok_or(AccountError::EmailTaken)
}

/// Check an email/password pair. Returns the user's id on success.
///
/// Unknown emails, accounts without a password (social-only), and wrong
/// passwords all map to `InvalidCredentials` after the same Argon2 work.
pub async fn verify_credentials(pool: &PgPool, email: &str, password: &str) -> Result<Uuid, AccountError> {
    let Some(email) = normalize_email(email) else {
        password::verify_against_dummy(password);
        return Err(AccountError::InvalidCredentials);
    };
    let row = sqlx::query("SELECT id, hashed_password FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let Some((id, Some(hashed))) = row.map(|r| (r.get::<Uuid, _>("id"), r.get::<Option<String>, _>("hashed_password")))
    else {
        password::verify_against_dummy(password);
        return Err(AccountError::InvalidCredentials);
    };
    if password::verify_password(password, &hashed)? {
        Ok(id)
    } else {
        Err(AccountError::InvalidCredentials)
    }
}
