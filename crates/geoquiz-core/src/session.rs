//! The quiz session state machine.
//!
//! A session owns an ordered list of questions, the player's answer for each,
//! and the running score. It is mutated only through `submit_answer`,
//! `advance`, `retreat` and `restart`; everything a front end needs to draw
//! is available through read-only queries.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{GenerationError, TransitionError};
use crate::generator::QuestionGenerator;
use crate::model::{Dataset, Question};
use crate::report::{self, Feedback, QuestionOutcome, QuizSummary};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress { current_index: usize },
    Finished,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct!"),
            Verdict::Incorrect => write!(f, "Incorrect!"),
        }
    }
}

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The question is unanswered; the option can be picked.
    Selectable,
    /// Answered question, option neither chosen nor correct.
    Neutral,
    ChosenCorrect,
    ChosenIncorrect,
    /// The correct answer, revealed after a wrong pick.
    RevealedCorrect,
}

/// Everything needed to render one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    /// One-based question number.
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: &'a [String],
    pub chosen: Option<&'a str>,
    /// Only revealed once the question has been answered.
    pub correct_answer: Option<&'a str>,
}

impl QuestionView<'_> {
    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }

    pub fn mark(&self, option: &str) -> OptionMark {
        let (Some(chosen), Some(correct)) = (self.chosen, self.correct_answer) else {
            return OptionMark::Selectable;
        };
        match (option == chosen, option == correct) {
            (true, true) => OptionMark::ChosenCorrect,
            (true, false) => OptionMark::ChosenIncorrect,
            (false, true) => OptionMark::RevealedCorrect,
            (false, false) => OptionMark::Neutral,
        }
    }
}

/// Position and completion counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// One-based position of the current question; `total` once finished.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    /// `position / total`, the fill of a progress bar.
    pub fraction: f64,
}

/// One playthrough of a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    questions: Vec<Question>,
    answers: Vec<Option<String>>,
    state: SessionState,
    score: usize,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Generate a fresh quiz and start at the first question.
    pub fn start<R: Rng>(
        dataset: &Dataset,
        generator: &mut QuestionGenerator<R>,
    ) -> Result<Self, GenerationError> {
        let questions = generator.generate_quiz(dataset)?;
        Self::from_questions(questions)
    }

    /// Start a session over an existing question list.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, GenerationError> {
        if questions.is_empty() {
            return Err(GenerationError::NoQuestionsRequested);
        }

        let session = Self {
            id: Uuid::new_v4(),
            answers: vec![None; questions.len()],
            questions,
            state: SessionState::InProgress { current_index: 0 },
            score: 0,
            started_at: Utc::now(),
            finished_at: None,
        };
        info!(session = %session.id, questions = session.total(), "quiz started");
        Ok(session)
    }

    /// Replace this session with a freshly generated one.
    ///
    /// The current session is kept if generation fails.
    pub fn restart<R: Rng>(
        &mut self,
        dataset: &Dataset,
        generator: &mut QuestionGenerator<R>,
    ) -> Result<(), GenerationError> {
        *self = Self::start(dataset, generator)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Record `choice` as the answer to the current question.
    pub fn submit_answer(&mut self, choice: &str) -> Result<Verdict, TransitionError> {
        let index = self.in_progress_index()?;
        if self.answers[index].is_some() {
            return Err(TransitionError::AlreadyAnswered { index });
        }

        let question = &self.questions[index];
        if !question.has_option(choice) {
            return Err(TransitionError::UnknownOption {
                index,
                choice: choice.to_string(),
            });
        }

        let is_correct = question.is_correct(choice);
        if is_correct {
            self.score += 1;
        }
        self.answers[index] = Some(choice.to_string());

        debug!(index, choice, is_correct, score = self.score, "answer recorded");
        Ok(if is_correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        })
    }

    /// Record the option at zero-based `option` of the current question.
    pub fn submit_option(&mut self, option: usize) -> Result<Verdict, TransitionError> {
        let index = self.in_progress_index()?;
        let Some(choice) = self.questions[index].options.get(option).cloned() else {
            return Err(TransitionError::UnknownOption {
                index,
                choice: format!("#{}", option + 1),
            });
        };
        self.submit_answer(&choice)
    }

    /// Move to the next question, or finish after the last one.
    pub fn advance(&mut self) -> Result<SessionState, TransitionError> {
        let index = self.in_progress_index()?;
        if self.answers[index].is_none() {
            return Err(TransitionError::NotAnswered { index });
        }

        self.state = if index + 1 == self.questions.len() {
            self.finished_at = Some(Utc::now());
            info!(session = %self.id, score = self.score, total = self.total(), "quiz finished");
            SessionState::Finished
        } else {
            SessionState::InProgress {
                current_index: index + 1,
            }
        };
        Ok(self.state)
    }

    /// Move back one question. Recorded answers are kept.
    pub fn retreat(&mut self) -> Result<usize, TransitionError> {
        let index = self.in_progress_index()?;
        if index == 0 {
            return Err(TransitionError::AtFirstQuestion);
        }
        self.state = SessionState::InProgress {
            current_index: index - 1,
        };
        Ok(index - 1)
    }

    fn in_progress_index(&self) -> Result<usize, TransitionError> {
        match self.state {
            SessionState::InProgress { current_index } => Ok(current_index),
            SessionState::Finished => Err(TransitionError::Finished),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Index of the current question, or `None` once finished.
    pub fn current_index(&self) -> Option<usize> {
        self.in_progress_index().ok()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|i| &self.questions[i])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(Option::is_some)
    }

    /// The recorded answer for question `index`.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(|a| a.as_deref())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index() == Some(self.total() - 1)
    }

    pub fn can_advance(&self) -> bool {
        self.current_index().is_some_and(|i| self.is_answered(i))
    }

    pub fn can_retreat(&self) -> bool {
        self.current_index().is_some_and(|i| i > 0)
    }

    pub fn score_percentage(&self) -> f64 {
        report::percentage(self.score, self.total())
    }

    pub fn summary_feedback(&self) -> Feedback {
        Feedback::for_percentage(self.score_percentage())
    }

    pub fn progress(&self) -> Progress {
        let total = self.total();
        let position = self.current_index().map_or(total, |i| i + 1);
        Progress {
            position,
            total,
            answered: self.answered_count(),
            fraction: position as f64 / total as f64,
        }
    }

    /// Render data for question `index`.
    pub fn question_view(&self, index: usize) -> Option<QuestionView<'_>> {
        let question = self.questions.get(index)?;
        let chosen = self.answer(index);
        Some(QuestionView {
            number: index + 1,
            total: self.total(),
            prompt: &question.prompt,
            options: &question.options,
            chosen,
            correct_answer: chosen.map(|_| question.correct_answer.as_str()),
        })
    }

    pub fn current_view(&self) -> Option<QuestionView<'_>> {
        self.current_index().and_then(|i| self.question_view(i))
    }

    /// The final summary, available once the session is finished.
    pub fn summary(&self) -> Option<QuizSummary> {
        let finished_at = self.finished_at.filter(|_| self.is_finished())?;
        let outcomes = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, chosen)| QuestionOutcome {
                prompt: question.prompt.clone(),
                chosen: chosen.clone(),
                correct_answer: question.correct_answer.clone(),
                is_correct: chosen.as_deref().is_some_and(|c| question.is_correct(c)),
            })
            .collect();

        Some(QuizSummary {
            session_id: self.id,
            started_at: self.started_at,
            finished_at,
            score: self.score,
            total: self.total(),
            percentage: self.score_percentage(),
            feedback: self.summary_feedback(),
            outcomes,
        })
    }
}
