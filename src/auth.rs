use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::rngs::OsRng;
use tracing::warn;

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;
use crate::store::Storage;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("stored password hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("password verification failed: {}", e))),
    }
}

/// Looks the user up and checks the password against the stored hash.
pub async fn authenticate(
    store: &dyn Storage,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = store.get_user_by_username(username).await else {
        warn!("login attempt for unknown user {}", username);
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        warn!("wrong password for user {}", username);
        Ok(None)
    }
}

/// Splits a `Basic` authorization value into username and password.
pub fn parse_basic_credentials(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// `Ok(None)` when no authorization header is present at all.
pub async fn admin_from_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Option<User>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let (username, password) = value
        .to_str()
        .ok()
        .and_then(parse_basic_credentials)
        .ok_or(AppError::Unauthorized("Authentication required"))?;

    authenticate(state.store.as_ref(), &username, &password)
        .await?
        .map(Some)
        .ok_or(AppError::Unauthorized("Invalid credentials"))
}

/// Extractor for routes reserved to administrators.
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_from_headers(&parts.headers, state)
            .await?
            .map(AdminUser)
            .ok_or(AppError::Unauthorized("Authentication required"))
    }
}
