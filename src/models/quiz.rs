use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Id,
    pub title: String,
    pub subject: String,
    pub creator_name: String,
    /// Six characters from the quiz code alphabet, assigned by the store.
    pub quiz_code: String,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub title: String,
    pub subject: String,
    pub creator_name: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

impl NewQuiz {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(AppError::BadRequest("subject is required".to_string()));
        }
        if self.creator_name.trim().is_empty() {
            return Err(AppError::BadRequest("creatorName is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuiz {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator_name: Option<String>,
    pub is_public: Option<bool>,
}

impl Quiz {
    pub fn apply(&mut self, update: UpdateQuiz) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(creator_name) = update.creator_name {
            self.creator_name = creator_name;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Id,
    pub quiz_id: Id,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Empty for true/false questions.
    pub options: Vec<String>,
    pub correct_answer: String,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizQuestion {
    pub quiz_id: Id,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub order: i32,
}

impl NewQuizQuestion {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.question_text.trim().is_empty() {
            return Err(AppError::BadRequest("questionText is required".to_string()));
        }
        match self.question_type {
            QuestionType::MultipleChoice => {
                if self.options.len() < 2 {
                    return Err(AppError::BadRequest(
                        "multiple-choice questions need at least two options".to_string(),
                    ));
                }
                if !self.options.contains(&self.correct_answer) {
                    return Err(AppError::BadRequest(
                        "correctAnswer must be one of the options".to_string(),
                    ));
                }
            }
            QuestionType::TrueFalse => {
                if !self.options.is_empty() {
                    return Err(AppError::BadRequest(
                        "true-false questions take no options".to_string(),
                    ));
                }
                if self.correct_answer != "true" && self.correct_answer != "false" {
                    return Err(AppError::BadRequest(
                        "correctAnswer must be \"true\" or \"false\"".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizQuestion {
    pub quiz_id: Option<Id>,
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub order: Option<i32>,
}

impl QuizQuestion {
    pub fn apply(&mut self, update: UpdateQuizQuestion) {
        if let Some(quiz_id) = update.quiz_id {
            self.quiz_id = quiz_id;
        }
        if let Some(question_text) = update.question_text {
            self.question_text = question_text;
        }
        if let Some(question_type) = update.question_type {
            self.question_type = question_type;
        }
        if let Some(options) = update.options {
            self.options = options;
        }
        if let Some(correct_answer) = update.correct_answer {
            self.correct_answer = correct_answer;
        }
        if let Some(order) = update.order {
            self.order = order;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Id,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Id,
    pub quiz_id: Id,
    pub taker_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<SubmittedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizAttempt {
    pub quiz_id: Id,
    pub taker_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<SubmittedAnswer>,
}
