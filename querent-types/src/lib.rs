//! Core types for the querent crate.
//!
//! This crate models the questions of an interactive prompt session:
//! - `Question` and `QuestionKind` - A question and its variant
//! - `PropertySpec` - Static, templated or computed properties resolved against `Answers`
//! - `AnswerValue` and `Answers` - Candidate answers and the answers collected so far
//! - `PathPolicy` and `PathnameChecker` - Filesystem path validation
//! - `Backend` trait - For implementing drivers that ask the questions

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::Answers;

mod template;
pub use template::render;

mod property;
pub use property::{ComputeFn, FromRendered, PropertySpec, Validator};

mod choice;
pub use choice::{Choice, RawChoice, TaggedPair};

mod probe;
pub use probe::{FsProbe, OsProbe};

pub mod pathname;
pub use pathname::{PathnameChecker, UnixPathnames, WindowsPathnames, is_pathname_valid};

mod path;
pub use path::{PathPolicy, PathType};

mod kind;
pub use kind::Kind;

mod question;
pub use question::{ListOptions, PasswordOptions, Question, QuestionKind, QuestionParams};

mod loader;
pub use loader::{Flag, Loaded, QuestionSpec, load_from_json, load_from_map, load_from_value};

mod error;
pub use error::{QuestionError, ResolveError, ValidationError};

mod traits;
pub use traits::Backend;
