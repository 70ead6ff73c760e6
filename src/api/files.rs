use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use super::MessageResponse;
use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{File, FileFilter, Id, NewFile, UpdateFile};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/files", get(list_files).post(create_file))
        .route(
            "/api/files/{id}",
            get(get_file).put(update_file).delete(delete_file),
        )
}

async fn list_files(
    State(state): State<AppState>,
    Query(filter): Query<FileFilter>,
) -> Json<Vec<File>> {
    Json(state.store.list_files_by_filters(&filter).await)
}

async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<File>, AppError> {
    let file = state.store.get_file(id).await.ok_or(AppError::NotFound("File"))?;
    Ok(Json(file))
}

/// Registers the metadata of a file already placed in file storage.
async fn create_file(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<NewFile>,
) -> Result<(StatusCode, Json<File>), AppError> {
    req.validate()?;
    let file = state.store.create_file(req).await;
    info!("{} registered file {} ({})", admin.username, file.id, file.file_name);
    Ok((StatusCode::CREATED, Json(file)))
}

async fn update_file(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Id>,
    Json(req): Json<UpdateFile>,
) -> Result<Json<File>, AppError> {
    req.validate()?;
    let file = state
        .store
        .update_file(id, req)
        .await
        .ok_or(AppError::NotFound("File"))?;
    Ok(Json(file))
}

async fn delete_file(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Id>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_file(id).await {
        return Err(AppError::NotFound("File"));
    }
    info!("{} deleted file {}", admin.username, id);
    Ok(Json(MessageResponse::new("File deleted successfully")))
}
