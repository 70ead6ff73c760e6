pub mod exam;
pub mod file;
pub mod quiz;
pub mod user;

pub use exam::{
    ExamDay, ExamDaySlot, ExamWeek, NewExamDay, NewExamWeek, UpdateExamDay, UpdateExamWeek, Weekday,
};
pub use file::{File, FileFilter, Filter, Grade, NewFile, Semester, Subject, UpdateFile};
pub use quiz::{
    NewQuiz, NewQuizAttempt, NewQuizQuestion, QuestionType, Quiz, QuizAttempt, QuizQuestion,
    SubmittedAnswer, UpdateQuiz, UpdateQuizQuestion,
};
pub use user::{NewUser, User};

/// Identifier type shared by every entity kind. Wide enough that the
/// per-kind counters never run out.
pub type Id = i64;
