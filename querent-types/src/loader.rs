//! Building questions from JSON documents.
//!
//! A document is either one question object or an array of them:
//!
//! ```
//! use querent_types::{Loaded, load_from_json};
//!
//! let loaded = load_from_json(r#"[
//!     {"name": "user", "kind": "text", "message": "Who are you?"},
//!     {"name": "ok", "kind": "confirm", "message": "Proceed, {user}?"}
//! ]"#).unwrap();
//!
//! assert!(matches!(loaded, Loaded::Many(ref questions) if questions.len() == 2));
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{
    AnswerValue, PathPolicy, PathType, PropertySpec, Question, QuestionError, QuestionParams,
    RawChoice,
};

/// One question as written in a spec file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionSpec {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub default: Option<AnswerValue>,
    #[serde(default)]
    pub ignore: Option<Flag>,
    #[serde(default)]
    pub validate: Option<Flag>,
    #[serde(default)]
    pub choices: Option<Vec<RawChoice>>,
    #[serde(default)]
    pub show_default: bool,
    #[serde(default)]
    pub echo: Option<char>,
    #[serde(default)]
    pub carousel: bool,
    #[serde(default)]
    pub path_type: Option<PathType>,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub normalize_to_absolute_path: bool,
}

/// A boolean property: either a literal or a template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Template(String),
}

impl<X> From<Flag> for PropertySpec<bool, X> {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Bool(value) => Self::Static(value),
            Flag::Template(template) => Self::Template(template),
        }
    }
}

impl QuestionSpec {
    /// Build the question this spec describes.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let mut params = QuestionParams::new()
            .show_default(self.show_default)
            .carousel(self.carousel);

        if let Some(message) = self.message {
            params = params.message(message);
        }
        params.default = match self.default {
            Some(AnswerValue::String(text)) if text.contains(['{', '}']) => {
                PropertySpec::Template(text)
            }
            Some(value) => PropertySpec::from(value),
            None => PropertySpec::Static(None),
        };
        if let Some(ignore) = self.ignore {
            params = params.ignore(ignore);
        }
        if let Some(validate) = self.validate {
            params = params.validate(validate);
        }
        if let Some(choices) = self.choices {
            params = params.choices(choices);
        }
        if let Some(echo) = self.echo {
            params = params.echo(echo);
        }

        let mut policy = PathPolicy::new(self.path_type.unwrap_or_default());
        policy.exists = self.exists;
        policy.normalize_to_absolute = self.normalize_to_absolute_path;
        params = params.path_policy(policy);

        Question::create(&self.kind, self.name, params)
    }
}

impl TryFrom<QuestionSpec> for Question {
    type Error = QuestionError;

    fn try_from(spec: QuestionSpec) -> Result<Self, Self::Error> {
        spec.into_question()
    }
}

/// The result of loading a question document.
#[derive(Debug, Clone)]
pub enum Loaded {
    /// The document was a single question object.
    One(Question),

    /// The document was an array of question objects.
    Many(Vec<Question>),
}

impl Loaded {
    /// Flatten into a list of questions.
    pub fn into_vec(self) -> Vec<Question> {
        match self {
            Self::One(question) => vec![question],
            Self::Many(questions) => questions,
        }
    }
}

/// Load one question from a JSON object.
pub fn load_from_map(value: Value) -> Result<Question, QuestionError> {
    serde_json::from_value::<QuestionSpec>(value)?.into_question()
}

/// Load a question or a list of questions from a parsed JSON document.
pub fn load_from_value(value: Value) -> Result<Loaded, QuestionError> {
    match value {
        Value::Object(_) => load_from_map(value).map(Loaded::One),
        Value::Array(items) => items
            .into_iter()
            .map(load_from_map)
            .collect::<Result<Vec<_>, _>>()
            .map(Loaded::Many),
        other => Err(QuestionError::UnexpectedShape {
            found: json_type_name(&other),
        }),
    }
}

/// Load a question or a list of questions from JSON text.
pub fn load_from_json(json: &str) -> Result<Loaded, QuestionError> {
    load_from_value(serde_json::from_str(json)?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
