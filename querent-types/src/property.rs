//! Static, templated and computed question properties.

use std::{fmt, sync::Arc};

use crate::{AnswerValue, Answers, RawChoice, ResolveError, template};

/// A property function: receives the answers so far plus call-specific input.
pub type ComputeFn<T, X> = Arc<dyn Fn(&Answers, &X) -> anyhow::Result<T> + Send + Sync>;

/// How a question property is obtained.
///
/// `X` is the extra input handed to computed properties. It is `()` for every
/// property except the validator, which also receives the candidate answer.
pub enum PropertySpec<T, X = ()> {
    /// A literal value.
    Static(T),

    /// A `{name}` template rendered against the answers so far.
    Template(String),

    /// A function of the answers so far.
    Computed(ComputeFn<T, X>),
}

/// The validator property: a predicate over the answers and the candidate.
pub type Validator = PropertySpec<bool, AnswerValue>;

/// Conversion from rendered template text into a property value.
pub trait FromRendered: Sized {
    fn from_rendered(text: String) -> Self;
}

impl FromRendered for String {
    fn from_rendered(text: String) -> Self {
        text
    }
}

/// Rendered text is truthy unless it is empty. `"false"` and `"no"` are
/// non-empty, so they count as true.
impl FromRendered for bool {
    fn from_rendered(text: String) -> Self {
        !text.is_empty()
    }
}

impl FromRendered for Option<AnswerValue> {
    fn from_rendered(text: String) -> Self {
        Some(AnswerValue::String(text))
    }
}

/// One plain string choice per non-empty line.
impl FromRendered for Vec<RawChoice> {
    fn from_rendered(text: String) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| RawChoice::Value(AnswerValue::from(line)))
            .collect()
    }
}

impl<T, X> PropertySpec<T, X> {
    /// Create a templated property.
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// Create a computed property that also receives the extra input.
    pub fn computed_with(
        f: impl Fn(&Answers, &X) -> anyhow::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Check if this property is a function of the answers.
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Get the literal value, if this property is static.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve this property against the answers so far.
    ///
    /// Computed properties are called on every resolution; nothing is cached.
    pub fn resolve_with(&self, answers: &Answers, extra: &X) -> Result<T, ResolveError>
    where
        T: Clone + FromRendered,
    {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Template(template) => {
                tracing::trace!(template = %template, "rendering template property");
                template::render(template, answers).map(T::from_rendered)
            }
            Self::Computed(f) => f(answers, extra).map_err(ResolveError::Computed),
        }
    }
}

impl<T: 'static> PropertySpec<T, ()> {
    /// Create a computed property.
    pub fn computed(f: impl Fn(&Answers) -> anyhow::Result<T> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(move |answers: &Answers, _: &()| f(answers)))
    }

    /// Resolve this property against the answers so far.
    pub fn resolve(&self, answers: &Answers) -> Result<T, ResolveError>
    where
        T: Clone + FromRendered,
    {
        self.resolve_with(answers, &())
    }
}

impl<T: Clone, X> Clone for PropertySpec<T, X> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Template(template) => Self::Template(template.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug, X> fmt::Debug for PropertySpec<T, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T: Default, X> Default for PropertySpec<T, X> {
    fn default() -> Self {
        Self::Static(T::default())
    }
}

/// Plain strings are templates, so `"Hello {name}"` picks up earlier answers.
impl From<&str> for PropertySpec<String> {
    fn from(template: &str) -> Self {
        Self::Template(template.to_string())
    }
}

impl From<String> for PropertySpec<String> {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}

impl<X> From<bool> for PropertySpec<bool, X> {
    fn from(value: bool) -> Self {
        Self::Static(value)
    }
}

/// Null becomes "no default".
impl From<AnswerValue> for PropertySpec<Option<AnswerValue>> {
    fn from(value: AnswerValue) -> Self {
        if value.is_null() {
            Self::Static(None)
        } else {
            Self::Static(Some(value))
        }
    }
}

impl From<Vec<RawChoice>> for PropertySpec<Vec<RawChoice>> {
    fn from(choices: Vec<RawChoice>) -> Self {
        Self::Static(choices)
    }
}
