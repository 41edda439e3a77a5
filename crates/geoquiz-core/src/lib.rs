//! geoquiz-core: Question generation, quiz session state, and scoring.
//!
//! This crate defines the country data model, the random question generator,
//! and the `QuizSession` state machine that every geoquiz front end drives.

pub mod dataset;
pub mod error;
pub mod generator;
pub mod model;
pub mod report;
pub mod session;

pub use dataset::{validate_dataset, ValidationWarning};
pub use error::{GenerationError, TransitionError};
pub use generator::{GeneratorConfig, QuestionGenerator};
pub use model::{Country, Dataset, Field, Question, QuestionKind};
pub use report::{Feedback, QuizSummary};
pub use session::{OptionMark, Progress, QuestionView, QuizSession, SessionState, Verdict};
