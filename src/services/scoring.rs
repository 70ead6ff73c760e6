use serde::Serialize;

use crate::models::{Quiz, QuizQuestion, SubmittedAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptScore {
    pub score: u32,
    pub total_questions: u32,
}

/// Scores a submission against the questions attached to `quiz`.
///
/// Every submitted answer whose text equals the stored correct answer of the
/// question it names adds one point. Answers naming unknown questions and
/// questions left unanswered add nothing. Comparison is exact: no trimming,
/// no case folding.
pub fn score_attempt(
    quiz: &Quiz,
    questions: &[QuizQuestion],
    answers: &[SubmittedAnswer],
) -> AttemptScore {
    let attached: Vec<&QuizQuestion> = questions.iter().filter(|q| q.quiz_id == quiz.id).collect();

    let score = answers
        .iter()
        .filter(|submitted| {
            attached
                .iter()
                .find(|q| q.id == submitted.question_id)
                .is_some_and(|q| q.correct_answer == submitted.answer)
        })
        .count();

    AttemptScore {
        score: score as u32,
        total_questions: attached.len() as u32,
    }
}
