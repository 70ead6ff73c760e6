use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::hash_password;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::NewUser;
use crate::store::{MemStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Fresh in-memory store with the configured admin account.
    pub async fn init(config: &AppConfig) -> Result<Self, AppError> {
        let state = Self::new(Arc::new(MemStorage::new()));

        match &config.admin_password {
            Some(password) => {
                state.seed_admin(&config.admin_username, password).await?;
                info!("seeded admin account {}", config.admin_username);
            }
            None => warn!("ADMIN_PASSWORD is not set, admin routes will reject every request"),
        }

        Ok(state)
    }

    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        let password_hash = hash_password(password)?;
        self.store
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map(|_| ())
            .ok_or_else(|| AppError::Conflict(format!("user {} already exists", username)))
    }
}
