//! Test backend for driving questions without user interaction.
//!
//! `TestBackend` plays the driver role from a script of pre-defined
//! responses. Every question is resolved and validated exactly as a terminal
//! driver would, so questions can be tested end to end.
//!
//! # Example
//!
//! ```rust
//! use querent::{AnswerValue, Backend, Question, QuestionParams, TestBackend};
//!
//! let questions = vec![
//!     Question::text("host", QuestionParams::new().message("Host:")),
//!     Question::confirm("tls", QuestionParams::new().message("Use TLS on {host}?")),
//! ];
//!
//! let answers = TestBackend::new()
//!     .with_string("host", "localhost")
//!     .collect(&questions)
//!     .unwrap();
//!
//! assert_eq!(answers.get("host"), Some(&AnswerValue::from("localhost")));
//! // no scripted response, so the confirm default is used
//! assert_eq!(answers.get("tls"), Some(&AnswerValue::Bool(false)));
//! ```

use std::collections::HashMap;

use crate::{AnswerValue, Answers, Backend, Question, ResolveError, ValidationError};

/// A test backend that answers from pre-configured responses.
///
/// Each question may have several scripted attempts. They are tried in order
/// and the first one the question accepts is recorded, the way a user would
/// retype an answer after a rejection.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    responses: HashMap<String, Vec<AnswerValue>>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("Missing response for question '{0}'")]
    MissingResponse(String),

    #[error("Every response for '{name}' was rejected")]
    Rejected {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to resolve question '{name}'")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },
}

impl TestBackend {
    /// Create a new empty test backend.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Add a response for the question with the given name.
    pub fn with_response(self, name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.with_attempts(name, [value])
    }

    /// Add a sequence of responses, tried in order until one is accepted.
    pub fn with_attempts<V: Into<AnswerValue>>(
        mut self,
        name: impl Into<String>,
        attempts: impl IntoIterator<Item = V>,
    ) -> Self {
        self.responses
            .entry(name.into())
            .or_default()
            .extend(attempts.into_iter().map(Into::into));
        self
    }

    /// Add a string response.
    pub fn with_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_response(name, AnswerValue::String(value.into()))
    }

    /// Add a boolean response.
    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with_response(name, AnswerValue::Bool(value))
    }

    fn answer(
        &self,
        question: &Question,
        answers: &Answers,
    ) -> Result<Option<AnswerValue>, TestBackendError> {
        let name = question.name();
        let resolve = |source: ResolveError| TestBackendError::Resolve {
            name: name.to_string(),
            source,
        };

        if question.ignore(answers).map_err(resolve)? {
            tracing::debug!(question = name, "skipping ignored question");
            return question.default(answers).map_err(resolve);
        }

        let message = question.message(answers).map_err(resolve)?;
        let choices = question.choices(answers).map_err(resolve)?;
        tracing::debug!(question = name, %message, choices = choices.len(), "asking");

        let attempts = match self.responses.get(name) {
            Some(attempts) if !attempts.is_empty() => attempts.clone(),
            _ => match question.default(answers).map_err(resolve)? {
                Some(default) => vec![default],
                None => return Err(TestBackendError::MissingResponse(name.to_string())),
            },
        };

        let mut last_rejection = None;
        for candidate in attempts {
            match question.validate(answers, &candidate) {
                Ok(()) => return Ok(Some(candidate)),
                Err(rejection) => last_rejection = Some(rejection),
            }
        }

        // attempts is never empty, so there is always a rejection here
        Err(TestBackendError::Rejected {
            name: name.to_string(),
            source: last_rejection.unwrap_or_else(|| ValidationError::new(AnswerValue::Null)),
        })
    }
}

impl Backend for TestBackend {
    type Error = TestBackendError;

    fn collect(&self, questions: &[Question]) -> Result<Answers, Self::Error> {
        let mut answers = Answers::new();

        for question in questions {
            if let Some(answer) = self.answer(question, &answers)? {
                tracing::trace!(question = question.name(), answer = %answer, "answer recorded");
                answers.insert(question.name(), answer);
            }
        }

        Ok(answers)
    }
}
