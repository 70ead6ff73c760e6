pub mod memory;
pub mod table;

use async_trait::async_trait;

use crate::models::*;

pub use memory::MemStorage;

/// The authoritative holder of every portal record.
///
/// Unknown ids are reported as `None` / `false`, never as errors. Input is
/// assumed to have been validated before it reaches the store. Deleting a
/// week or a quiz removes its children in the same step, and the returned
/// flag only says whether the parent existed.
///
/// Children are only ever filed under a parent that exists at the moment
/// of the write: creating a day, question or attempt for a missing parent,
/// or moving one onto a missing parent, yields `None` and stores nothing.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns `None` when the username is already taken.
    async fn create_user(&self, user: NewUser) -> Option<User>;
    async fn get_user(&self, id: Id) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn delete_user(&self, id: Id) -> bool;

    async fn list_files(&self) -> Vec<File>;
    async fn get_file(&self, id: Id) -> Option<File>;
    async fn list_files_by_filters(&self, filter: &FileFilter) -> Vec<File>;
    async fn create_file(&self, file: NewFile) -> File;
    async fn update_file(&self, id: Id, update: UpdateFile) -> Option<File>;
    async fn delete_file(&self, id: Id) -> bool;

    async fn list_exam_weeks(&self) -> Vec<ExamWeek>;
    async fn get_exam_week(&self, id: Id) -> Option<ExamWeek>;
    async fn create_exam_week(&self, week: NewExamWeek) -> ExamWeek;
    /// Creates the week and all of its days as one step. Days come back
    /// sunday first.
    async fn create_exam_week_with_days(
        &self,
        week: NewExamWeek,
        days: Vec<ExamDaySlot>,
    ) -> (ExamWeek, Vec<ExamDay>);
    async fn update_exam_week(&self, id: Id, update: UpdateExamWeek) -> Option<ExamWeek>;
    async fn delete_exam_week(&self, id: Id) -> bool;

    async fn get_exam_day(&self, id: Id) -> Option<ExamDay>;
    /// Days of one week, sunday first.
    async fn list_exam_days_by_week(&self, week_id: Id) -> Vec<ExamDay>;
    async fn create_exam_day(&self, day: NewExamDay) -> Option<ExamDay>;
    async fn update_exam_day(&self, id: Id, update: UpdateExamDay) -> Option<ExamDay>;
    async fn delete_exam_day(&self, id: Id) -> bool;

    async fn list_quizzes(&self) -> Vec<Quiz>;
    async fn get_quiz(&self, id: Id) -> Option<Quiz>;
    async fn get_quiz_by_code(&self, code: &str) -> Option<Quiz>;
    /// Assigns a quiz code not held by any stored quiz.
    async fn create_quiz(&self, quiz: NewQuiz) -> Quiz;
    async fn update_quiz(&self, id: Id, update: UpdateQuiz) -> Option<Quiz>;
    async fn delete_quiz(&self, id: Id) -> bool;

    async fn get_quiz_question(&self, id: Id) -> Option<QuizQuestion>;
    /// Questions of one quiz in ascending `order`.
    async fn list_questions_by_quiz(&self, quiz_id: Id) -> Vec<QuizQuestion>;
    async fn create_quiz_question(&self, question: NewQuizQuestion) -> Option<QuizQuestion>;
    async fn update_quiz_question(&self, id: Id, update: UpdateQuizQuestion) -> Option<QuizQuestion>;
    async fn delete_quiz_question(&self, id: Id) -> bool;

    async fn get_quiz_attempt(&self, id: Id) -> Option<QuizAttempt>;
    /// Attempts of one quiz, most recent first.
    async fn list_attempts_by_quiz(&self, quiz_id: Id) -> Vec<QuizAttempt>;
    async fn create_quiz_attempt(&self, attempt: NewQuizAttempt) -> Option<QuizAttempt>;
    async fn delete_quiz_attempt(&self, id: Id) -> bool;
}
