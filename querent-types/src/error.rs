use crate::AnswerValue;

/// A candidate answer was rejected.
///
/// This is the only error a driver needs to branch on when deciding whether
/// to ask again. Faults raised inside a custom validator are folded into this
/// error; the original fault stays reachable through `source()`.
#[derive(Debug, thiserror::Error)]
#[error(
    "Invalid answer '{value}'{}",
    .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
)]
pub struct ValidationError {
    value: AnswerValue,
    reason: Option<String>,
    #[source]
    cause: Option<anyhow::Error>,
}

impl ValidationError {
    /// Reject the given value without further explanation.
    pub fn new(value: impl Into<AnswerValue>) -> Self {
        Self {
            value: value.into(),
            reason: None,
            cause: None,
        }
    }

    /// Reject the given value with a message for the user.
    pub fn with_reason(value: impl Into<AnswerValue>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: Some(reason.into()),
            cause: None,
        }
    }

    pub(crate) fn caused_by(value: AnswerValue, cause: anyhow::Error) -> Self {
        Self {
            value,
            reason: None,
            cause: Some(cause),
        }
    }

    /// The rejected value.
    pub fn value(&self) -> &AnswerValue {
        &self.value
    }

    /// Why the value was rejected, if known.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// The validator fault that was folded into this rejection, if any.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }
}

/// Error type for property resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A template referenced a question that has not been answered yet.
    #[error("Template '{template}' references unanswered question '{key}'")]
    UnresolvedTemplate { template: String, key: String },

    /// A template had an unbalanced brace or an empty placeholder.
    #[error("Malformed template '{template}' at byte {position}")]
    MalformedTemplate { template: String, position: usize },

    /// A computed property failed.
    #[error("Computed property failed: {0}")]
    Computed(#[source] anyhow::Error),
}

/// Error type for question construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    /// The factory received a kind tag it does not know.
    #[error("Unknown question type '{0}'")]
    UnknownKind(String),

    /// A question's own default does not pass its validation rules.
    #[error("Default value '{}' of question '{name}' is not valid", .source.value())]
    InvalidDefault {
        name: String,
        #[source]
        source: ValidationError,
    },

    /// A property could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A question spec could not be parsed.
    #[error("Invalid question spec: {0}")]
    Json(#[from] serde_json::Error),

    /// A question document was neither a mapping nor a sequence of mappings.
    #[error("Expected a question object or a list of question objects, found {found}")]
    UnexpectedShape { found: &'static str },
}

impl QuestionError {
    /// Check if this error came from an unrecognized kind tag.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Self::UnknownKind(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = ValidationError::with_reason("/tmp/x", "must be a file");
        assert_eq!(err.to_string(), "Invalid answer '/tmp/x': must be a file");
        assert_eq!(ValidationError::new(3).to_string(), "Invalid answer '3'");
    }

    #[test]
    fn cause_is_exposed_as_source() {
        let err = ValidationError::caused_by(AnswerValue::from(1), anyhow::anyhow!("boom"));
        assert_eq!(err.source().map(ToString::to_string), Some("boom".to_string()));
        assert!(err.reason().is_none());
    }
}
