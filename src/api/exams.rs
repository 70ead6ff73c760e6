use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::MessageResponse;
use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{
    ExamDay, ExamDaySlot, ExamWeek, Id, NewExamDay, NewExamWeek, UpdateExamDay, UpdateExamWeek,
    Weekday,
};
use crate::state::AppState;

/// One row of the schedule form. Inactive rows are skipped on create and
/// deleted on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayInput {
    id: Option<Id>,
    #[serde(default)]
    active: bool,
    day: Weekday,
    #[serde(default)]
    date: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    lessons: String,
}

impl DayInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.date.trim().is_empty() || self.subject.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "date and subject are required for {:?}",
                self.day
            )));
        }
        Ok(())
    }

    fn into_slot(self) -> ExamDaySlot {
        ExamDaySlot {
            day: self.day,
            date: self.date,
            subject: self.subject,
            lessons: self.lessons,
        }
    }

    fn into_new(self, week_id: Id) -> NewExamDay {
        self.into_slot().into_new(week_id)
    }

    fn into_update(self, week_id: Id) -> UpdateExamDay {
        UpdateExamDay {
            week_id: Some(week_id),
            day: Some(self.day),
            date: Some(self.date),
            subject: Some(self.subject),
            lessons: Some(self.lessons),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateWeekRequest {
    name: String,
    #[serde(default)]
    days: Vec<DayInput>,
}

#[derive(Debug, Deserialize)]
struct UpdateWeekRequest {
    name: Option<String>,
    days: Option<Vec<DayInput>>,
}

#[derive(Debug, Serialize)]
struct WeekWithDays {
    #[serde(flatten)]
    week: ExamWeek,
    days: Vec<ExamDay>,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/exams/weeks", get(list_weeks).post(create_week))
        .route(
            "/api/exams/weeks/{id}",
            get(get_week).put(update_week).delete(delete_week),
        )
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("week name is required".to_string()));
    }
    Ok(())
}

async fn list_weeks(State(state): State<AppState>) -> Json<Vec<ExamWeek>> {
    Json(state.store.list_exam_weeks().await)
}

async fn get_week(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<WeekWithDays>, AppError> {
    let week = state
        .store
        .get_exam_week(id)
        .await
        .ok_or(AppError::NotFound("Exam week"))?;
    let days = state.store.list_exam_days_by_week(id).await;
    Ok(Json(WeekWithDays { week, days }))
}

async fn create_week(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateWeekRequest>,
) -> Result<(StatusCode, Json<WeekWithDays>), AppError> {
    validate_name(&req.name)?;
    let active: Vec<DayInput> = req.days.into_iter().filter(|d| d.active).collect();
    for day in &active {
        day.validate()?;
    }

    let slots: Vec<ExamDaySlot> = active.into_iter().map(DayInput::into_slot).collect();
    let (week, days) = state
        .store
        .create_exam_week_with_days(NewExamWeek { name: req.name }, slots)
        .await;

    info!("{} created exam week {} with {} days", admin.username, week.id, days.len());
    Ok((StatusCode::CREATED, Json(WeekWithDays { week, days })))
}

async fn update_week(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Id>,
    Json(req): Json<UpdateWeekRequest>,
) -> Result<Json<WeekWithDays>, AppError> {
    if let Some(name) = &req.name {
        validate_name(name)?;
    }
    if let Some(days) = &req.days {
        for day in days.iter().filter(|d| d.active) {
            day.validate()?;
        }
    }

    let week = state
        .store
        .update_exam_week(id, UpdateExamWeek { name: req.name })
        .await
        .ok_or(AppError::NotFound("Exam week"))?;

    let owned: HashSet<Id> = state
        .store
        .list_exam_days_by_week(id)
        .await
        .into_iter()
        .map(|d| d.id)
        .collect();

    // The store refuses to file a day under a week deleted meanwhile.
    for day in req.days.unwrap_or_default() {
        let filed = match (day.active, day.id) {
            (false, Some(day_id)) if owned.contains(&day_id) => {
                state.store.delete_exam_day(day_id).await;
                true
            }
            (false, _) => true,
            (true, Some(day_id)) if owned.contains(&day_id) => state
                .store
                .update_exam_day(day_id, day.into_update(id))
                .await
                .is_some(),
            (true, _) => state.store.create_exam_day(day.into_new(id)).await.is_some(),
        };
        if !filed && state.store.get_exam_week(id).await.is_none() {
            return Err(AppError::NotFound("Exam week"));
        }
    }

    let days = state.store.list_exam_days_by_week(id).await;
    info!("{} updated exam week {}", admin.username, id);
    Ok(Json(WeekWithDays { week, days }))
}

async fn delete_week(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Id>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_exam_week(id).await {
        return Err(AppError::NotFound("Exam week"));
    }
    info!("{} deleted exam week {}", admin.username, id);
    Ok(Json(MessageResponse::new("Exam week deleted successfully")))
}
