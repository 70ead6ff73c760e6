use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth;
use crate::error::AppError;
use crate::models::Id;
use crate::state::AppState;

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct LoginUser {
    id: Id,
    username: String,
}

#[derive(Serialize)]
struct LoginResponse {
    message: String,
    user: LoginUser,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = auth::authenticate(state.store.as_ref(), &req.username, &req.password)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials"))?;

    info!("admin {} logged in", user.username);
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: LoginUser {
            id: user.id,
            username: user.username,
        },
    }))
}
