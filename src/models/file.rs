use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, IntoDeserializer, value::StringDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use super::Id;
use crate::error::AppError;

pub const MAX_FILE_SIZE: i64 = 10 * 1024 * 1024;

pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "image/png",
    "image/jpeg",
    "image/jpg",
    "text/plain",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Arabic,
    English,
    Math,
    Chemistry,
    Physics,
    Biology,
    Islamic,
    Constitution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "12")]
    Twelve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    First,
    Second,
}

/// Metadata of an uploaded study file. The bytes live with the file storage
/// collaborator under `file_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: Id,
    pub title: String,
    pub subject: Subject,
    pub grade: Grade,
    pub semester: Semester,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub title: String,
    pub subject: Subject,
    pub grade: Grade,
    pub semester: Semester,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
}

impl NewFile {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if self.file_name.is_empty() || self.file_path.is_empty() {
            return Err(AppError::BadRequest("fileName and filePath are required".to_string()));
        }
        if self.file_size <= 0 || self.file_size > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "fileSize must be between 1 and {} bytes",
                MAX_FILE_SIZE
            )));
        }
        if !ALLOWED_FILE_TYPES.contains(&self.file_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "file type not allowed: {}",
                self.file_type
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFile {
    pub title: Option<String>,
    pub subject: Option<Subject>,
    pub grade: Option<Grade>,
    pub semester: Option<Semester>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
}

impl UpdateFile {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::BadRequest("title may not be empty".to_string()));
        }
        if self.file_size.is_some_and(|size| size <= 0 || size > MAX_FILE_SIZE) {
            return Err(AppError::BadRequest(format!(
                "fileSize must be between 1 and {} bytes",
                MAX_FILE_SIZE
            )));
        }
        if let Some(file_type) = &self.file_type {
            if !ALLOWED_FILE_TYPES.contains(&file_type.as_str()) {
                return Err(AppError::BadRequest(format!("file type not allowed: {}", file_type)));
            }
        }
        Ok(())
    }
}

impl File {
    pub fn apply(&mut self, update: UpdateFile) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(grade) = update.grade {
            self.grade = grade;
        }
        if let Some(semester) = update.semester {
            self.semester = semester;
        }
        if let Some(file_path) = update.file_path {
            self.file_path = file_path;
        }
        if let Some(file_name) = update.file_name {
            self.file_name = file_name;
        }
        if let Some(file_size) = update.file_size {
            self.file_size = file_size;
        }
        if let Some(file_type) = update.file_type {
            self.file_type = file_type;
        }
    }
}

/// Either the `"all"` sentinel or one concrete value to match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Filter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == "all" {
            return Ok(Filter::All);
        }
        let inner: StringDeserializer<de::value::Error> = raw.into_deserializer();
        T::deserialize(inner)
            .map(Filter::Only)
            .map_err(<D::Error as de::Error>::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FileFilter {
    #[serde(default)]
    pub grade: Filter<Grade>,
    #[serde(default)]
    pub subject: Filter<Subject>,
    #[serde(default)]
    pub semester: Filter<Semester>,
}

impl FileFilter {
    pub fn matches(&self, file: &File) -> bool {
        self.grade.matches(&file.grade)
            && self.subject.matches(&file.subject)
            && self.semester.matches(&file.semester)
    }
}
