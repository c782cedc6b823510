//! # querent
//!
//! Questions for interactive prompt sessions. Backend-agnostic.
//!
//! A question's message, default, choices, skip flag and validator may each be
//! a literal, a `{name}` template over earlier answers, or a function of the
//! earlier answers. A driver resolves them against one shared `Answers` value
//! and runs every candidate through `Question::validate` before storing it.
//!
//! ## Usage
//!
//! ```rust
//! use querent::{Answers, AnswerValue, Question, QuestionParams};
//!
//! let greeting = Question::text(
//!     "greeting",
//!     QuestionParams::new()
//!         .message("Say hello to {user}")
//!         .validate_with(|_, candidate| Ok(candidate.is_truthy())),
//! );
//!
//! let mut answers = Answers::new();
//! answers.insert("user", "Ada");
//!
//! assert_eq!(greeting.message(&answers).unwrap(), "Say hello to Ada");
//! assert!(greeting.validate(&answers, &AnswerValue::from("hi")).is_ok());
//! assert!(greeting.validate(&answers, &AnswerValue::from("")).is_err());
//! ```
//!
//! ## Question kinds
//!
//! - `text` - Single-line input, literal defaults are stored as text
//! - `password` - Masked input with an echo character
//! - `editor` - Multi-line input through an external editor
//! - `confirm` - Yes/no, defaults to `false`
//! - `list` - Pick one choice, optionally wrapping around
//! - `checkbox` - Pick any number of choices
//! - `path` - A filesystem path checked against a `PathPolicy`
//!
//! ## Backends
//!
//! Drivers implement `Backend`. `TestBackend` answers from a script and is
//! meant for tests.

// Re-export all types from querent-types
pub use querent_types::*;

// Test backend for driving questions without user interaction
mod test_backend;
pub use test_backend::{TestBackend, TestBackendError};
