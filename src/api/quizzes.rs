use std::collections::HashSet;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::MessageResponse;
use crate::auth;
use crate::error::AppError;
use crate::models::{
    Id, NewQuiz, NewQuizAttempt, NewQuizQuestion, QuestionType, Quiz, QuizAttempt, QuizQuestion,
    SubmittedAnswer,
};
use crate::services::score_attempt;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct QuizWithQuestions {
    quiz: Quiz,
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRequest {
    question_text: String,
    question_type: QuestionType,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    /// Appended after the existing questions when omitted.
    order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttemptRequest {
    taker_name: String,
    #[serde(default)]
    answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteQuizRequest {
    creator_name: Option<String>,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quizzes", get(list_quizzes).post(create_quiz))
        .route("/api/quizzes/code/{code}", get(get_quiz_by_code))
        .route("/api/quizzes/{id}", get(get_quiz).delete(delete_quiz))
        .route("/api/quizzes/{id}/questions", post(add_question))
        .route(
            "/api/quizzes/{id}/attempts",
            get(list_attempts).post(submit_attempt),
        )
}

async fn find_quiz(state: &AppState, id: Id) -> Result<Quiz, AppError> {
    state.store.get_quiz(id).await.ok_or(AppError::NotFound("Quiz"))
}

async fn with_questions(state: &AppState, quiz: Quiz) -> QuizWithQuestions {
    let questions = state.store.list_questions_by_quiz(quiz.id).await;
    QuizWithQuestions { quiz, questions }
}

async fn list_quizzes(State(state): State<AppState>) -> Json<Vec<Quiz>> {
    Json(state.store.list_quizzes().await)
}

async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<QuizWithQuestions>, AppError> {
    let quiz = find_quiz(&state, id).await?;
    Ok(Json(with_questions(&state, quiz).await))
}

async fn get_quiz_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<QuizWithQuestions>, AppError> {
    let quiz = state
        .store
        .get_quiz_by_code(&code)
        .await
        .ok_or(AppError::NotFound("Quiz"))?;
    Ok(Json(with_questions(&state, quiz).await))
}

async fn create_quiz(
    State(state): State<AppState>,
    Json(req): Json<NewQuiz>,
) -> Result<(StatusCode, Json<Quiz>), AppError> {
    req.validate()?;
    let quiz = state.store.create_quiz(req).await;
    info!("quiz {} created by {} with code {}", quiz.id, quiz.creator_name, quiz.quiz_code);
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn add_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<Id>,
    Json(req): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<QuizQuestion>), AppError> {
    find_quiz(&state, quiz_id).await?;

    let order = match req.order {
        Some(order) => order,
        None => match state.store.list_questions_by_quiz(quiz_id).await.last() {
            Some(last) => last.order.checked_add(1).ok_or_else(|| {
                AppError::BadRequest(
                    "no order left after the last question; pass one explicitly".to_string(),
                )
            })?,
            None => 1,
        },
    };
    let question = NewQuizQuestion {
        quiz_id,
        question_text: req.question_text,
        question_type: req.question_type,
        options: req.options,
        correct_answer: req.correct_answer,
        order,
    };
    question.validate()?;

    let question = state
        .store
        .create_quiz_question(question)
        .await
        .ok_or(AppError::NotFound("Quiz"))?;
    Ok((StatusCode::CREATED, Json(question)))
}

async fn submit_attempt(
    State(state): State<AppState>,
    Path(quiz_id): Path<Id>,
    Json(req): Json<AttemptRequest>,
) -> Result<(StatusCode, Json<QuizAttempt>), AppError> {
    let quiz = find_quiz(&state, quiz_id).await?;

    if req.taker_name.trim().is_empty() {
        return Err(AppError::BadRequest("takerName is required".to_string()));
    }
    let mut seen = HashSet::new();
    if !req.answers.iter().all(|a| seen.insert(a.question_id)) {
        return Err(AppError::BadRequest(
            "each question may be answered only once".to_string(),
        ));
    }

    let questions = state.store.list_questions_by_quiz(quiz_id).await;
    let result = score_attempt(&quiz, &questions, &req.answers);

    let attempt = state
        .store
        .create_quiz_attempt(NewQuizAttempt {
            quiz_id,
            taker_name: req.taker_name,
            score: result.score,
            total_questions: result.total_questions,
            answers: req.answers,
        })
        .await
        .ok_or(AppError::NotFound("Quiz"))?;

    info!(
        "attempt {} on quiz {} scored {}/{}",
        attempt.id, quiz_id, attempt.score, attempt.total_questions
    );
    Ok((StatusCode::CREATED, Json(attempt)))
}

async fn list_attempts(
    State(state): State<AppState>,
    Path(quiz_id): Path<Id>,
) -> Result<Json<Vec<QuizAttempt>>, AppError> {
    find_quiz(&state, quiz_id).await?;
    Ok(Json(state.store.list_attempts_by_quiz(quiz_id).await))
}

/// Allowed for administrators and for the quiz creator, who names
/// themselves in the body. A wrong `Authorization` header does not stop
/// the creator.
async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let quiz = find_quiz(&state, id).await?;

    // Bad credentials only mean "not an admin" here; the creator check
    // still applies.
    let admin = match auth::admin_from_headers(&headers, &state).await {
        Ok(admin) => admin,
        Err(AppError::Unauthorized(_)) => None,
        Err(e) => return Err(e),
    };
    if admin.is_none() {
        let req: DeleteQuizRequest = if body.is_empty() {
            DeleteQuizRequest::default()
        } else {
            serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))?
        };
        if req.creator_name.as_deref() != Some(quiz.creator_name.as_str()) {
            return Err(AppError::Forbidden(
                "Only the creator or an admin can delete this quiz",
            ));
        }
    }

    if !state.store.delete_quiz(id).await {
        return Err(AppError::NotFound("Quiz"));
    }
    info!("quiz {} deleted", id);
    Ok(Json(MessageResponse::new("Quiz deleted successfully")))
}
