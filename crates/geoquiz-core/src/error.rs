//! Core error types.
//!
//! Generation failures and invalid session transitions are reported as
//! typed errors so front ends can tell a broken dataset apart from a
//! control they should have disabled.

use thiserror::Error;

use crate::model::QuestionKind;

/// Errors that can occur while generating questions from a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The dataset has no records to ask about.
    #[error("dataset contains no records")]
    EmptyDataset,

    /// A quiz of zero questions was requested.
    #[error("a quiz needs at least one question")]
    NoQuestionsRequested,

    /// The candidate pool cannot supply three distinct distractors.
    #[error("not enough distinct values for a {kind} question: need 3 distractors, found {available}")]
    InsufficientDistractors { kind: QuestionKind, available: usize },

    /// Rejection sampling hit its draw limit before collecting the distractors.
    #[error("gave up sampling distractors for a {kind} question after {attempts} draws")]
    SamplingExhausted { kind: QuestionKind, attempts: usize },

    /// No randomly drawn record carried the fields its template needed.
    #[error("no record had the fields needed for a question after {attempts} attempts")]
    NoUsableSubject { attempts: usize },

    /// A targeted record lacks a field the requested template needs.
    #[error("record {index} is missing a field required by a {kind} question")]
    IncompleteRecord { index: usize, kind: QuestionKind },

    /// A targeted record index is past the end of the dataset.
    #[error("record {index} is out of range for a dataset of {len} records")]
    SubjectOutOfRange { index: usize, len: usize },
}

/// A session operation that is not valid in the current state.
///
/// The session is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("question {} has already been answered", .index + 1)]
    AlreadyAnswered { index: usize },

    #[error("question {} has not been answered yet", .index + 1)]
    NotAnswered { index: usize },

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("the quiz is already finished")]
    Finished,

    #[error("'{choice}' is not an option for question {}", .index + 1)]
    UnknownOption { index: usize, choice: String },
}
