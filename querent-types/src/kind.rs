use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::QuestionError;

/// The tag naming a question variant, as used by the factory and spec files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Text,
    Password,
    Editor,
    Confirm,
    List,
    Checkbox,
    Path,
}

impl Kind {
    /// Every kind the factory knows.
    pub const ALL: [Kind; 7] = [
        Self::Text,
        Self::Password,
        Self::Editor,
        Self::Confirm,
        Self::List,
        Self::Checkbox,
        Self::Path,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Editor => "editor",
            Self::Confirm => "confirm",
            Self::List => "list",
            Self::Checkbox => "checkbox",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| QuestionError::UnknownKind(s.to_string()))
    }
}
