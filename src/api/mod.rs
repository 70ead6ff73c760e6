mod exams;
mod files;
mod login;
mod quizzes;

use axum::{Router, http::StatusCode, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(login::routes())
        .merge(files::routes())
        .merge(exams::routes())
        .merge(quizzes::routes())
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
