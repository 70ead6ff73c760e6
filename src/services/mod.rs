pub mod quiz_code;
pub mod scoring;

pub use quiz_code::generate_quiz_code;
pub use scoring::{AttemptScore, score_attempt};
