use crate::{Answers, Question};

/// Trait for drivers that ask questions and collect answers.
///
/// A driver shares one `Answers` value across all questions it is handed.
/// For each question it skips it if `ignore` resolves to true, otherwise it
/// shows the resolved message, default and choices, reads a candidate and
/// calls `Question::validate` until a candidate is accepted.
pub trait Backend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Ask `questions` in order.
    ///
    /// # Returns
    /// * `Ok(answers)` with one entry per accepted (or defaulted) question
    /// * `Err` on cancellation or backend failure
    fn collect(&self, questions: &[Question]) -> Result<Answers, Self::Error>;
}
