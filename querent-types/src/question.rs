use crate::{
    AnswerValue, Answers, Choice, Kind, PathPolicy, PathType, PropertySpec, QuestionError,
    RawChoice, ResolveError, ValidationError, Validator,
};

/// A single question in a prompt session.
///
/// Properties are stored unresolved and resolved against the caller's
/// `Answers` on every access, so a question always reflects the answers
/// collected so far.
#[derive(Debug, Clone)]
pub struct Question {
    /// The key this question's answer is stored under.
    name: String,

    /// The prompt text shown to the user.
    message: PropertySpec<String>,

    /// The value offered when the user gives no answer.
    default: PropertySpec<Option<AnswerValue>>,

    /// Whether the driver should skip this question.
    ignore: PropertySpec<bool>,

    /// Predicate over the answers so far and the candidate answer.
    validate: Validator,

    /// Options offered by List and Checkbox questions.
    choices: PropertySpec<Vec<RawChoice>>,

    /// Hint for the driver to display the default next to the prompt.
    show_default: bool,

    /// The variant and its capability data.
    kind: QuestionKind,
}

/// The variant of a question, carrying variant-specific options.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    /// Single-line text input.
    Text,

    /// Masked input for secrets.
    Password(PasswordOptions),

    /// Multi-line text composed in an external editor.
    Editor,

    /// Yes/no confirmation.
    Confirm,

    /// Pick one of the choices.
    List(ListOptions),

    /// Pick any number of the choices.
    Checkbox,

    /// A filesystem path checked against a policy.
    Path(PathPolicy),
}

impl QuestionKind {
    /// The tag for this variant.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Text => Kind::Text,
            Self::Password(_) => Kind::Password,
            Self::Editor => Kind::Editor,
            Self::Confirm => Kind::Confirm,
            Self::List(_) => Kind::List,
            Self::Checkbox => Kind::Checkbox,
            Self::Path(_) => Kind::Path,
        }
    }
}

/// Options for a password question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    /// Character echoed for each typed character.
    pub echo: char,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self { echo: '*' }
    }
}

/// Options for a list question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Wrap around when moving past the first or last choice.
    pub carousel: bool,
}

/// Unresolved properties and variant options used to build a question.
///
/// Options that do not apply to the kind being built are ignored.
#[derive(Debug, Clone)]
pub struct QuestionParams {
    pub message: PropertySpec<String>,
    pub default: PropertySpec<Option<AnswerValue>>,
    pub ignore: PropertySpec<bool>,
    pub validate: Validator,
    pub choices: PropertySpec<Vec<RawChoice>>,
    pub show_default: bool,
    pub echo: Option<char>,
    pub carousel: bool,
    pub path_policy: PathPolicy,
}

impl Default for QuestionParams {
    fn default() -> Self {
        Self {
            message: PropertySpec::default(),
            default: PropertySpec::Static(None),
            ignore: PropertySpec::Static(false),
            validate: PropertySpec::Static(true),
            choices: PropertySpec::Static(Vec::new()),
            show_default: false,
            echo: None,
            carousel: false,
            path_policy: PathPolicy::default(),
        }
    }
}

impl QuestionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt text. Plain strings are templates.
    pub fn message(mut self, message: impl Into<PropertySpec<String>>) -> Self {
        self.message = message.into();
        self
    }

    /// Set a literal default value.
    pub fn default_value(mut self, value: impl Into<AnswerValue>) -> Self {
        self.default = PropertySpec::from(value.into());
        self
    }

    /// Set the default from a template or a function of earlier answers.
    pub fn default_spec(mut self, default: PropertySpec<Option<AnswerValue>>) -> Self {
        self.default = default;
        self
    }

    /// Set whether the question is skipped.
    pub fn ignore(mut self, ignore: impl Into<PropertySpec<bool>>) -> Self {
        self.ignore = ignore.into();
        self
    }

    /// Set the validator.
    pub fn validate(mut self, validate: impl Into<Validator>) -> Self {
        self.validate = validate.into();
        self
    }

    /// Validate candidates with a predicate over the answers so far.
    ///
    /// Returning an `Err` that wraps a `ValidationError` rejects the answer
    /// with that error; any other `Err` rejects it with the fault attached.
    pub fn validate_with(
        self,
        f: impl Fn(&Answers, &AnswerValue) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.validate(Validator::computed_with(f))
    }

    /// Set the choices.
    pub fn choices(mut self, choices: impl Into<PropertySpec<Vec<RawChoice>>>) -> Self {
        self.choices = choices.into();
        self
    }

    pub fn show_default(mut self, show_default: bool) -> Self {
        self.show_default = show_default;
        self
    }

    pub fn echo(mut self, echo: char) -> Self {
        self.echo = Some(echo);
        self
    }

    pub fn carousel(mut self, carousel: bool) -> Self {
        self.carousel = carousel;
        self
    }

    /// Replace the whole path policy.
    pub fn path_policy(mut self, policy: PathPolicy) -> Self {
        self.path_policy = policy;
        self
    }

    pub fn path_type(mut self, path_type: PathType) -> Self {
        self.path_policy.path_type = path_type;
        self
    }

    pub fn exists(mut self, exists: bool) -> Self {
        self.path_policy.exists = Some(exists);
        self
    }

    pub fn normalize_to_absolute(mut self, normalize: bool) -> Self {
        self.path_policy.normalize_to_absolute = normalize;
        self
    }
}

impl Question {
    /// Build a question from its kind tag.
    ///
    /// Fails with `QuestionError::UnknownKind` for tags other than `text`,
    /// `password`, `editor`, `confirm`, `list`, `checkbox` and `path`.
    pub fn create(
        kind: &str,
        name: impl Into<String>,
        params: QuestionParams,
    ) -> Result<Self, QuestionError> {
        Self::of_kind(kind.parse()?, name, params)
    }

    /// Build a question of the given kind.
    pub fn of_kind(
        kind: Kind,
        name: impl Into<String>,
        params: QuestionParams,
    ) -> Result<Self, QuestionError> {
        match kind {
            Kind::Text => Ok(Self::text(name, params)),
            Kind::Password => Ok(Self::password(name, params)),
            Kind::Editor => Ok(Self::editor(name, params)),
            Kind::Confirm => Ok(Self::confirm(name, params)),
            Kind::List => Ok(Self::list(name, params)),
            Kind::Checkbox => Ok(Self::checkbox(name, params)),
            Kind::Path => Self::path(name, params),
        }
    }

    pub fn text(name: impl Into<String>, params: QuestionParams) -> Self {
        Self::build(name, coerce_text_default(params), QuestionKind::Text)
    }

    pub fn password(name: impl Into<String>, params: QuestionParams) -> Self {
        let options = PasswordOptions {
            echo: params.echo.unwrap_or(PasswordOptions::default().echo),
        };
        Self::build(
            name,
            coerce_text_default(params),
            QuestionKind::Password(options),
        )
    }

    pub fn editor(name: impl Into<String>, params: QuestionParams) -> Self {
        Self::build(name, coerce_text_default(params), QuestionKind::Editor)
    }

    /// A yes/no question. Without a configured default it defaults to `false`.
    pub fn confirm(name: impl Into<String>, mut params: QuestionParams) -> Self {
        if matches!(params.default, PropertySpec::Static(None)) {
            params.default = PropertySpec::Static(Some(AnswerValue::Bool(false)));
        }
        Self::build(name, params, QuestionKind::Confirm)
    }

    pub fn list(name: impl Into<String>, params: QuestionParams) -> Self {
        let options = ListOptions {
            carousel: params.carousel,
        };
        Self::build(name, params, QuestionKind::List(options))
    }

    pub fn checkbox(name: impl Into<String>, params: QuestionParams) -> Self {
        Self::build(name, params, QuestionKind::Checkbox)
    }

    /// A path question.
    ///
    /// A literal default must itself pass validation, otherwise construction
    /// fails with `QuestionError::InvalidDefault`. Templated and computed
    /// defaults depend on answers and are only checked when answered.
    pub fn path(name: impl Into<String>, params: QuestionParams) -> Result<Self, QuestionError> {
        let policy = params.path_policy.clone();
        let question = Self::build(name, coerce_text_default(params), QuestionKind::Path(policy));

        if let Some(Some(default)) = question.default.as_static() {
            question
                .validate(&Answers::new(), default)
                .map_err(|source| QuestionError::InvalidDefault {
                    name: question.name.clone(),
                    source,
                })?;
        }

        Ok(question)
    }

    fn build(name: impl Into<String>, params: QuestionParams, kind: QuestionKind) -> Self {
        Self {
            name: name.into(),
            message: params.message,
            default: params.default,
            ignore: params.ignore,
            validate: params.validate,
            choices: params.choices,
            show_default: params.show_default,
            kind,
        }
    }

    /// Get the question name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get the kind tag.
    pub fn tag(&self) -> Kind {
        self.kind.kind()
    }

    pub fn show_default(&self) -> bool {
        self.show_default
    }

    /// The echo character, for password questions.
    pub fn echo(&self) -> Option<char> {
        match &self.kind {
            QuestionKind::Password(options) => Some(options.echo),
            _ => None,
        }
    }

    /// Whether the choice cursor wraps around, for list questions.
    pub fn carousel(&self) -> bool {
        matches!(&self.kind, QuestionKind::List(options) if options.carousel)
    }

    /// The path policy, for path questions.
    pub fn path_policy(&self) -> Option<&PathPolicy> {
        match &self.kind {
            QuestionKind::Path(policy) => Some(policy),
            _ => None,
        }
    }

    /// Resolve the prompt text.
    pub fn message(&self, answers: &Answers) -> Result<String, ResolveError> {
        self.message.resolve(answers)
    }

    /// Resolve the default.
    ///
    /// An answer already recorded under this question's name wins over the
    /// configured default.
    pub fn default(&self, answers: &Answers) -> Result<Option<AnswerValue>, ResolveError> {
        if let Some(previous) = answers.get(&self.name) {
            return Ok(Some(previous.clone()));
        }
        self.default.resolve(answers)
    }

    /// Resolve whether the driver should skip this question.
    pub fn ignore(&self, answers: &Answers) -> Result<bool, ResolveError> {
        self.ignore.resolve(answers)
    }

    /// Resolve the choices, turning `(label, value)` pairs into `TaggedPair`s.
    pub fn choices(&self, answers: &Answers) -> Result<Vec<Choice>, ResolveError> {
        Ok(self
            .choices
            .resolve(answers)?
            .into_iter()
            .map(RawChoice::materialize)
            .collect())
    }

    /// Check a candidate answer.
    ///
    /// Every way a validator can fail (returning `false`, returning an error,
    /// a template that does not resolve) surfaces as a `ValidationError`.
    /// Path questions then apply their path policy.
    pub fn validate(
        &self,
        answers: &Answers,
        candidate: &AnswerValue,
    ) -> Result<(), ValidationError> {
        let result = self
            .run_validator(answers, candidate)
            .and_then(|()| match &self.kind {
                QuestionKind::Path(policy) => policy.validate(candidate),
                _ => Ok(()),
            });

        if let Err(err) = &result {
            tracing::debug!(question = %self.name, error = %err, "answer rejected");
        }
        result
    }

    fn run_validator(
        &self,
        answers: &Answers,
        candidate: &AnswerValue,
    ) -> Result<(), ValidationError> {
        match self.validate.resolve_with(answers, candidate) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ValidationError::new(candidate.clone())),
            Err(ResolveError::Computed(err)) => match err.downcast::<ValidationError>() {
                Ok(rejection) => Err(rejection),
                Err(fault) => {
                    tracing::debug!(question = %self.name, error = %fault, "validator failed");
                    Err(ValidationError::caused_by(candidate.clone(), fault))
                }
            },
            Err(err) => Err(ValidationError::caused_by(candidate.clone(), err.into())),
        }
    }
}

/// Literal defaults of text-based questions are stored in their string form.
fn coerce_text_default(mut params: QuestionParams) -> QuestionParams {
    let coerced = match &params.default {
        PropertySpec::Static(Some(value)) if !matches!(value, AnswerValue::String(_)) => {
            Some(value.to_string())
        }
        _ => None,
    };
    if let Some(text) = coerced {
        params.default = PropertySpec::Static(Some(AnswerValue::String(text)));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TaggedPair, UnixPathnames, probe::fake::FakeProbe};

    #[test]
    fn message_is_templated() {
        let q = Question::text("greeting", QuestionParams::new().message("Hi {name}!"));
        let answers: Answers = [("name", "Ada")].into_iter().collect();
        assert_eq!(q.message(&answers).unwrap(), "Hi Ada!");
    }

    #[test]
    fn message_with_unknown_key_fails() {
        let q = Question::text("greeting", QuestionParams::new().message("Hi {name}!"));
        assert!(matches!(
            q.message(&Answers::new()),
            Err(ResolveError::UnresolvedTemplate { .. })
        ));
    }

    #[test]
    fn previous_answer_wins_over_default() {
        let q = Question::text("q", QuestionParams::new().default_value("configured"));
        let mut answers = Answers::new();
        assert_eq!(q.default(&answers).unwrap(), Some(AnswerValue::from("configured")));

        answers.insert("q", "answered");
        assert_eq!(q.default(&answers).unwrap(), Some(AnswerValue::from("answered")));
    }

    #[test]
    fn computed_default_sees_answers() {
        let q = Question::text(
            "full",
            QuestionParams::new().default_spec(PropertySpec::computed(|answers| {
                Ok(answers.get("first").map(|v| AnswerValue::from(format!("{v} Smith"))))
            })),
        );
        let answers: Answers = [("first", "Jo")].into_iter().collect();
        assert_eq!(q.default(&answers).unwrap(), Some(AnswerValue::from("Jo Smith")));
    }

    #[test]
    fn text_default_is_stringified() {
        let q = Question::text("n", QuestionParams::new().default_value(42));
        assert_eq!(q.default(&Answers::new()).unwrap(), Some(AnswerValue::from("42")));
    }

    #[test]
    fn whole_float_default_keeps_its_decimal() {
        let q = Question::text("ratio", QuestionParams::new().default_value(2.0));
        assert_eq!(q.default(&Answers::new()).unwrap(), Some(AnswerValue::from("2.0")));
    }

    #[test]
    fn confirm_defaults_to_false() {
        let q = Question::confirm("ok", QuestionParams::new());
        assert_eq!(q.default(&Answers::new()).unwrap(), Some(AnswerValue::Bool(false)));

        let q = Question::confirm("ok", QuestionParams::new().default_value(true));
        assert_eq!(q.default(&Answers::new()).unwrap(), Some(AnswerValue::Bool(true)));
    }

    #[test]
    fn ignore_follows_answers() {
        let q = Question::text(
            "details",
            QuestionParams::new().ignore(PropertySpec::computed(|answers| {
                Ok(answers.get("wants_details") != Some(&AnswerValue::Bool(true)))
            })),
        );
        let mut answers = Answers::new();
        assert!(q.ignore(&answers).unwrap());
        answers.insert("wants_details", true);
        assert!(!q.ignore(&answers).unwrap());
    }

    #[test]
    fn choices_are_materialized() {
        let q = Question::list(
            "pick",
            QuestionParams::new().choices(vec![
                RawChoice::from(("Yes", 1)),
                RawChoice::from(("No", 0)),
                RawChoice::from(2),
            ]),
        );
        let choices = q.choices(&Answers::new()).unwrap();
        assert_eq!(choices[0], TaggedPair::new("Yes", 1));
        assert_eq!(choices[1], TaggedPair::new("No", 0));
        assert_eq!(choices[2], AnswerValue::from(2));
        assert!(matches!(choices[2], Choice::Plain(_)));
    }

    #[test]
    fn choices_are_recomputed() {
        let q = Question::checkbox(
            "toppings",
            QuestionParams::new().choices(PropertySpec::computed(|answers| {
                let mut choices = vec![RawChoice::from("cheese")];
                if answers.get("vegan") != Some(&AnswerValue::Bool(true)) {
                    choices.push(RawChoice::from("ham"));
                }
                Ok(choices)
            })),
        );
        let mut answers = Answers::new();
        assert_eq!(q.choices(&answers).unwrap().len(), 2);
        answers.insert("vegan", true);
        assert_eq!(q.choices(&answers).unwrap().len(), 1);
    }

    #[test]
    fn non_list_questions_have_no_choices() {
        let q = Question::confirm("ok", QuestionParams::new());
        assert!(q.choices(&Answers::new()).unwrap().is_empty());
    }

    #[test]
    fn static_validator_is_a_gate() {
        let open = Question::text("a", QuestionParams::new());
        assert!(open.validate(&Answers::new(), &AnswerValue::from("x")).is_ok());

        let closed = Question::text("a", QuestionParams::new().validate(false));
        let err = closed.validate(&Answers::new(), &AnswerValue::from("x")).unwrap_err();
        assert_eq!(err.value(), &AnswerValue::from("x"));
    }

    #[test]
    fn predicate_receives_candidate() {
        let q = Question::text(
            "age",
            QuestionParams::new().validate_with(|_, candidate| {
                Ok(candidate.as_str().is_some_and(|s| s.parse::<u8>().is_ok()))
            }),
        );
        assert!(q.validate(&Answers::new(), &AnswerValue::from("42")).is_ok());
        assert!(q.validate(&Answers::new(), &AnswerValue::from("old")).is_err());
    }

    #[test]
    fn validator_faults_are_normalized() {
        let q = Question::text(
            "n",
            QuestionParams::new().validate_with(|_, candidate| {
                let n: i64 = candidate.as_str().unwrap_or_default().parse()?;
                Ok(100 / n > 1)
            }),
        );
        let err = q.validate(&Answers::new(), &AnswerValue::from("abc")).unwrap_err();
        assert_eq!(err.value(), &AnswerValue::from("abc"));
        assert!(err.cause().is_some());
    }

    #[test]
    fn validator_rejections_propagate_unchanged() {
        let q = Question::text(
            "user",
            QuestionParams::new().validate_with(|_, candidate| {
                Err(ValidationError::with_reason(candidate.clone(), "name is taken").into())
            }),
        );
        let err = q.validate(&Answers::new(), &AnswerValue::from("root")).unwrap_err();
        assert_eq!(err.reason(), Some("name is taken"));
        assert!(err.cause().is_none());
    }

    #[test]
    fn validator_can_use_other_answers() {
        let q = Question::password(
            "confirm_password",
            QuestionParams::new().validate_with(|answers, candidate| {
                Ok(answers.get("password") == Some(candidate))
            }),
        );
        let answers: Answers = [("password", "hunter2")].into_iter().collect();
        assert!(q.validate(&answers, &AnswerValue::from("hunter2")).is_ok());
        assert!(q.validate(&answers, &AnswerValue::from("hunter3")).is_err());
    }

    #[test]
    fn template_validator_accepts_any_non_empty_rendering() {
        let q = Question::text("a", QuestionParams::new().validate(Validator::template("{prev}")));
        let candidate = AnswerValue::from("x");

        for prev in ["no", "False", "0"] {
            let answers: Answers = [("prev", prev)].into_iter().collect();
            assert!(q.validate(&answers, &candidate).is_ok());
        }

        let answers: Answers = [("prev", "")].into_iter().collect();
        assert!(q.validate(&answers, &candidate).is_err());
    }

    #[test]
    fn template_validator_with_missing_key_rejects() {
        let q = Question::text("a", QuestionParams::new().validate(Validator::template("{nope}")));
        assert!(q.validate(&Answers::new(), &AnswerValue::from("x")).is_err());
    }

    #[test]
    fn variant_options() {
        let pw = Question::password("pw", QuestionParams::new().echo('#'));
        assert_eq!(pw.echo(), Some('#'));
        assert_eq!(Question::password("pw", QuestionParams::new()).echo(), Some('*'));

        let list = Question::list("l", QuestionParams::new().carousel(true));
        assert!(list.carousel());
        assert!(!Question::checkbox("c", QuestionParams::new().carousel(true)).carousel());
    }

    #[test]
    fn factory_dispatches_on_tag() {
        for kind in Kind::ALL {
            let q = Question::create(kind.as_str(), "x", QuestionParams::new()).unwrap();
            assert_eq!(q.tag(), kind);
            assert_eq!(q.name(), "x");
        }
    }

    #[test]
    fn factory_rejects_unknown_tag() {
        let err = Question::create("bogus", "x", QuestionParams::new()).unwrap_err();
        assert!(matches!(err, QuestionError::UnknownKind(ref tag) if tag == "bogus"));
    }

    fn fake_policy(probe: FakeProbe) -> PathPolicy {
        PathPolicy::default()
            .with_probe(probe)
            .with_checker(UnixPathnames)
    }

    #[test]
    fn path_runs_base_validator_first() {
        let q = Question::path(
            "p",
            QuestionParams::new()
                .path_policy(fake_policy(FakeProbe::new()))
                .validate_with(|_, candidate| Ok(candidate.as_str() != Some("/forbidden"))),
        )
        .unwrap();
        assert!(q.validate(&Answers::new(), &AnswerValue::from("/fine")).is_ok());
        let err = q.validate(&Answers::new(), &AnswerValue::from("/forbidden")).unwrap_err();
        assert!(err.reason().is_none());
    }

    #[test]
    fn path_rejects_null() {
        let q = Question::path("p", QuestionParams::new().path_policy(fake_policy(FakeProbe::new())))
            .unwrap();
        assert!(q.validate(&Answers::new(), &AnswerValue::Null).is_err());
    }

    #[test]
    fn path_default_must_be_valid() {
        let params = QuestionParams::new()
            .path_policy(fake_policy(FakeProbe::new()))
            .exists(true)
            .default_value("/does/not/exist");
        let err = Question::path("p", params).unwrap_err();
        assert!(matches!(err, QuestionError::InvalidDefault { ref name, .. } if name == "p"));
    }

    #[test]
    fn path_default_that_exists_is_accepted() {
        let params = QuestionParams::new()
            .path_policy(fake_policy(FakeProbe::new().with_dir("/srv")))
            .path_type(PathType::Directory)
            .exists(true)
            .default_value("/srv");
        let q = Question::path("p", params).unwrap();
        assert_eq!(q.default(&Answers::new()).unwrap(), Some(AnswerValue::from("/srv")));
    }

    #[test]
    fn factory_propagates_invalid_path_default() {
        let params = QuestionParams::new()
            .path_policy(fake_policy(FakeProbe::new()))
            .path_type(PathType::Directory)
            .default_value("not/a/dir");
        assert!(matches!(
            Question::create("path", "p", params),
            Err(QuestionError::InvalidDefault { .. })
        ));
    }
}
