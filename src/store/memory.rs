use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::Storage;
use super::table::Table;
use crate::models::*;
use crate::services::generate_quiz_code;

type CodeGenerator = Box<dyn Fn() -> String + Send + Sync>;

#[derive(Default)]
struct Tables {
    users: Table<User>,
    files: Table<File>,
    exam_weeks: Table<ExamWeek>,
    exam_days: Table<ExamDay>,
    quizzes: Table<Quiz>,
    quiz_questions: Table<QuizQuestion>,
    quiz_attempts: Table<QuizAttempt>,
}

/// Process-local storage. All seven tables sit behind one lock so that
/// cascades and code assignment are observed as a single step.
pub struct MemStorage {
    tables: RwLock<Tables>,
    code_generator: CodeGenerator,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self::with_code_generator(generate_quiz_code)
    }

    pub fn with_code_generator(generator: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            code_generator: Box::new(generator),
        }
    }
}

fn insert_day(days: &mut Table<ExamDay>, day: NewExamDay) -> ExamDay {
    days.insert_with(|id| ExamDay {
        id,
        week_id: day.week_id,
        day: day.day,
        date: day.date,
        subject: day.subject,
        lessons: day.lessons,
    })
}

#[async_trait]
impl Storage for MemStorage {
    async fn create_user(&self, user: NewUser) -> Option<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return None;
        }
        Some(tables.users.insert_with(|id| User {
            id,
            username: user.username,
            password_hash: user.password_hash,
        }))
    }

    async fn get_user(&self, id: Id) -> Option<User> {
        self.tables.read().await.users.get(id)
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let tables = self.tables.read().await;
        tables.users.values().find(|u| u.username == username).cloned()
    }

    async fn delete_user(&self, id: Id) -> bool {
        self.tables.write().await.users.remove(id)
    }

    async fn list_files(&self) -> Vec<File> {
        self.tables.read().await.files.values().cloned().collect()
    }

    async fn get_file(&self, id: Id) -> Option<File> {
        self.tables.read().await.files.get(id)
    }

    async fn list_files_by_filters(&self, filter: &FileFilter) -> Vec<File> {
        let tables = self.tables.read().await;
        tables.files.values().filter(|f| filter.matches(f)).cloned().collect()
    }

    async fn create_file(&self, file: NewFile) -> File {
        let mut tables = self.tables.write().await;
        tables.files.insert_with(|id| File {
            id,
            title: file.title,
            subject: file.subject,
            grade: file.grade,
            semester: file.semester,
            file_path: file.file_path,
            file_name: file.file_name,
            file_size: file.file_size,
            file_type: file.file_type,
            upload_date: Utc::now(),
        })
    }

    async fn update_file(&self, id: Id, update: UpdateFile) -> Option<File> {
        let mut tables = self.tables.write().await;
        tables.files.update_with(id, |file| file.apply(update))
    }

    async fn delete_file(&self, id: Id) -> bool {
        self.tables.write().await.files.remove(id)
    }

    async fn list_exam_weeks(&self) -> Vec<ExamWeek> {
        self.tables.read().await.exam_weeks.values().cloned().collect()
    }

    async fn get_exam_week(&self, id: Id) -> Option<ExamWeek> {
        self.tables.read().await.exam_weeks.get(id)
    }

    async fn create_exam_week(&self, week: NewExamWeek) -> ExamWeek {
        let mut tables = self.tables.write().await;
        tables.exam_weeks.insert_with(|id| ExamWeek { id, name: week.name })
    }

    async fn create_exam_week_with_days(
        &self,
        week: NewExamWeek,
        days: Vec<ExamDaySlot>,
    ) -> (ExamWeek, Vec<ExamDay>) {
        let mut tables = self.tables.write().await;
        let week = tables.exam_weeks.insert_with(|id| ExamWeek { id, name: week.name });
        let mut days: Vec<ExamDay> = days
            .into_iter()
            .map(|slot| insert_day(&mut tables.exam_days, slot.into_new(week.id)))
            .collect();
        days.sort_by_key(|day| (day.day, day.id));
        (week, days)
    }

    async fn update_exam_week(&self, id: Id, update: UpdateExamWeek) -> Option<ExamWeek> {
        let mut tables = self.tables.write().await;
        tables.exam_weeks.update_with(id, |week| week.apply(update))
    }

    async fn delete_exam_week(&self, id: Id) -> bool {
        let mut tables = self.tables.write().await;
        if !tables.exam_weeks.contains(id) {
            return false;
        }
        let days = tables.exam_days.remove_where(|day| day.week_id == id);
        tables.exam_weeks.remove(id);
        debug!("deleted exam week {} with {} days", id, days);
        true
    }

    async fn get_exam_day(&self, id: Id) -> Option<ExamDay> {
        self.tables.read().await.exam_days.get(id)
    }

    async fn list_exam_days_by_week(&self, week_id: Id) -> Vec<ExamDay> {
        let tables = self.tables.read().await;
        let mut days: Vec<ExamDay> = tables
            .exam_days
            .values()
            .filter(|day| day.week_id == week_id)
            .cloned()
            .collect();
        days.sort_by_key(|day| (day.day, day.id));
        days
    }

    async fn create_exam_day(&self, day: NewExamDay) -> Option<ExamDay> {
        let mut tables = self.tables.write().await;
        if !tables.exam_weeks.contains(day.week_id) {
            debug!("refusing exam day for missing week {}", day.week_id);
            return None;
        }
        Some(insert_day(&mut tables.exam_days, day))
    }

    async fn update_exam_day(&self, id: Id, update: UpdateExamDay) -> Option<ExamDay> {
        let mut tables = self.tables.write().await;
        if let Some(week_id) = update.week_id {
            if !tables.exam_weeks.contains(week_id) {
                debug!("refusing to move exam day {} to missing week {}", id, week_id);
                return None;
            }
        }
        tables.exam_days.update_with(id, |day| day.apply(update))
    }

    async fn delete_exam_day(&self, id: Id) -> bool {
        self.tables.write().await.exam_days.remove(id)
    }

    async fn list_quizzes(&self) -> Vec<Quiz> {
        self.tables.read().await.quizzes.values().cloned().collect()
    }

    async fn get_quiz(&self, id: Id) -> Option<Quiz> {
        self.tables.read().await.quizzes.get(id)
    }

    async fn get_quiz_by_code(&self, code: &str) -> Option<Quiz> {
        let code = code.to_uppercase();
        let tables = self.tables.read().await;
        tables.quizzes.values().find(|q| q.quiz_code == code).cloned()
    }

    async fn create_quiz(&self, quiz: NewQuiz) -> Quiz {
        let mut tables = self.tables.write().await;
        let quiz_code = loop {
            let candidate = (self.code_generator)();
            if !tables.quizzes.values().any(|q| q.quiz_code == candidate) {
                break candidate;
            }
            debug!("quiz code {} already taken, drawing another", candidate);
        };
        tables.quizzes.insert_with(|id| Quiz {
            id,
            title: quiz.title,
            subject: quiz.subject,
            creator_name: quiz.creator_name,
            quiz_code,
            created_at: Utc::now(),
            is_public: quiz.is_public,
        })
    }

    async fn update_quiz(&self, id: Id, update: UpdateQuiz) -> Option<Quiz> {
        let mut tables = self.tables.write().await;
        tables.quizzes.update_with(id, |quiz| quiz.apply(update))
    }

    async fn delete_quiz(&self, id: Id) -> bool {
        let mut tables = self.tables.write().await;
        if !tables.quizzes.contains(id) {
            return false;
        }
        let questions = tables.quiz_questions.remove_where(|q| q.quiz_id == id);
        let attempts = tables.quiz_attempts.remove_where(|a| a.quiz_id == id);
        tables.quizzes.remove(id);
        debug!(
            "deleted quiz {} with {} questions and {} attempts",
            id, questions, attempts
        );
        true
    }

    async fn get_quiz_question(&self, id: Id) -> Option<QuizQuestion> {
        self.tables.read().await.quiz_questions.get(id)
    }

    async fn list_questions_by_quiz(&self, quiz_id: Id) -> Vec<QuizQuestion> {
        let tables = self.tables.read().await;
        let mut questions: Vec<QuizQuestion> = tables
            .quiz_questions
            .values()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| (q.order, q.id));
        questions
    }

    async fn create_quiz_question(&self, question: NewQuizQuestion) -> Option<QuizQuestion> {
        let mut tables = self.tables.write().await;
        if !tables.quizzes.contains(question.quiz_id) {
            debug!("refusing question for missing quiz {}", question.quiz_id);
            return None;
        }
        Some(tables.quiz_questions.insert_with(|id| QuizQuestion {
            id,
            quiz_id: question.quiz_id,
            question_text: question.question_text,
            question_type: question.question_type,
            options: question.options,
            correct_answer: question.correct_answer,
            order: question.order,
        }))
    }

    async fn update_quiz_question(&self, id: Id, update: UpdateQuizQuestion) -> Option<QuizQuestion> {
        let mut tables = self.tables.write().await;
        if let Some(quiz_id) = update.quiz_id {
            if !tables.quizzes.contains(quiz_id) {
                debug!("refusing to move question {} to missing quiz {}", id, quiz_id);
                return None;
            }
        }
        tables.quiz_questions.update_with(id, |question| question.apply(update))
    }

    async fn delete_quiz_question(&self, id: Id) -> bool {
        self.tables.write().await.quiz_questions.remove(id)
    }

    async fn get_quiz_attempt(&self, id: Id) -> Option<QuizAttempt> {
        self.tables.read().await.quiz_attempts.get(id)
    }

    async fn list_attempts_by_quiz(&self, quiz_id: Id) -> Vec<QuizAttempt> {
        let tables = self.tables.read().await;
        let mut attempts: Vec<QuizAttempt> = tables
            .quiz_attempts
            .values()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| Reverse((a.submitted_at, a.id)));
        attempts
    }

    async fn create_quiz_attempt(&self, attempt: NewQuizAttempt) -> Option<QuizAttempt> {
        let mut tables = self.tables.write().await;
        if !tables.quizzes.contains(attempt.quiz_id) {
            debug!("refusing attempt for missing quiz {}", attempt.quiz_id);
            return None;
        }
        Some(tables.quiz_attempts.insert_with(|id| QuizAttempt {
            id,
            quiz_id: attempt.quiz_id,
            taker_name: attempt.taker_name,
            score: attempt.score,
            total_questions: attempt.total_questions,
            answers: attempt.answers,
            submitted_at: Utc::now(),
        }))
    }

    async fn delete_quiz_attempt(&self, id: Id) -> bool {
        self.tables.write().await.quiz_attempts.remove(id)
    }
}
