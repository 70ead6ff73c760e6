use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub admin_username: String,
    /// No admin account is seeded when unset.
    pub admin_password: Option<String>,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let addr = env::var("PORTAL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr.parse::<SocketAddr>().map_err(|_| {
            AppError::BadRequest(format!("PORTAL_ADDR is not a socket address: {}", addr))
        })?;

        let admin_username =
            env::var("ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string());
        if admin_username.trim().is_empty() {
            return Err(AppError::BadRequest("ADMIN_USERNAME is empty".to_string()));
        }

        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());

        Ok(Self {
            addr,
            admin_username,
            admin_password,
        })
    }
}
