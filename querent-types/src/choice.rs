use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AnswerValue;

/// A choice with a display label and an underlying value.
///
/// Equality only looks at the value: `TaggedPair::new("Yes", 1) == 1`, and two
/// pairs with different labels but the same value are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedPair {
    pub label: String,
    pub value: AnswerValue,
}

impl TaggedPair {
    pub fn new(label: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl PartialEq for TaggedPair {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<AnswerValue> for TaggedPair {
    fn eq(&self, other: &AnswerValue) -> bool {
        self.value == *other
    }
}

impl PartialEq<TaggedPair> for AnswerValue {
    fn eq(&self, other: &TaggedPair) -> bool {
        *self == other.value
    }
}

impl fmt::Display for TaggedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A choice as configured on a question, before materialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChoice {
    /// A `{label, value}` pair.
    Pair { label: String, value: AnswerValue },

    /// A bare value that is its own label.
    Value(AnswerValue),
}

impl RawChoice {
    pub fn pair(label: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self::Pair {
            label: label.into(),
            value: value.into(),
        }
    }

    pub(crate) fn materialize(self) -> Choice {
        match self {
            Self::Pair { label, value } => Choice::Tagged(TaggedPair { label, value }),
            Self::Value(value) => Choice::Plain(value),
        }
    }
}

macro_rules! raw_choice_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawChoice {
                fn from(value: $ty) -> Self {
                    Self::Value(AnswerValue::from(value))
                }
            }
        )*
    };
}

raw_choice_from!(AnswerValue, String, &str, i64, i32, f64, bool);

impl<V: Into<AnswerValue>> From<(&str, V)> for RawChoice {
    fn from((label, value): (&str, V)) -> Self {
        Self::pair(label, value)
    }
}

/// A resolved choice as handed to the driver.
#[derive(Debug, Clone)]
pub enum Choice {
    Plain(AnswerValue),
    Tagged(TaggedPair),
}

impl Choice {
    /// The value recorded when this choice is picked.
    pub fn value(&self) -> &AnswerValue {
        match self {
            Self::Plain(value) => value,
            Self::Tagged(pair) => &pair.value,
        }
    }

    /// The text shown for this choice.
    pub fn label(&self) -> String {
        match self {
            Self::Plain(value) => value.to_string(),
            Self::Tagged(pair) => pair.label.clone(),
        }
    }
}

/// Choices compare by value, whether tagged or plain.
impl PartialEq for Choice {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl PartialEq<AnswerValue> for Choice {
    fn eq(&self, other: &AnswerValue) -> bool {
        self.value() == other
    }
}

impl PartialEq<TaggedPair> for Choice {
    fn eq(&self, other: &TaggedPair) -> bool {
        *self.value() == other.value
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => write!(f, "{value}"),
            Self::Tagged(pair) => write!(f, "{pair}"),
        }
    }
}

impl From<TaggedPair> for Choice {
    fn from(pair: TaggedPair) -> Self {
        Self::Tagged(pair)
    }
}

impl From<AnswerValue> for Choice {
    fn from(value: AnswerValue) -> Self {
        Self::Plain(value)
    }
}
