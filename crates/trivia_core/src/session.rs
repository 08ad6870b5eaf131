//! crates/trivia_core/src/session.rs
//!
//! The in-memory controller for one quiz attempt: the loaded questions, the
//! current position, and the answer picked for the question on screen.

use crate::domain::{AnswerRecord, Question, QuestionSet};
use crate::ports::PortError;
use crate::repository::LoadState;

/// Index from which the score bar is shown.
pub const PROGRESS_VISIBLE_FROM: usize = 3;

/// Errors from answering a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("there is no current question")]
    NoCurrentQuestion,
    #[error("choice {index} is out of range for {len} choices")]
    ChoiceOutOfRange { index: usize, len: usize },
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Failed,
    Ready(usize),
    Exhausted(usize),
}

/// Width of the score bar as a fraction of its container. Not clamped.
pub fn progress_fraction(index: usize) -> f32 {
    index as f32 * 0.005
}

/// The score shown to the player. Counts questions advanced past, not correct answers.
pub fn display_score(index: usize) -> usize {
    index * 10
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: QuestionSet,
    current_index: usize,
    loading: bool,
    error: Option<PortError>,
    /// Keyed on the question itself so a reorder never shows a stale answer.
    selection: Option<(Question, AnswerRecord)>,
}

impl QuizSession {
    /// A session waiting for its questions.
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Builds a session from a repository load. Data and error are kept side by side:
    /// a failed reload still plays the questions from the earlier load.
    pub fn from_load_state(state: LoadState) -> Self {
        let mut session = Self::new();
        session.initialize(state.data.unwrap_or_default());
        if let Some(error) = state.error {
            session.fail(error);
        }
        session
    }

    pub fn initialize(&mut self, questions: QuestionSet) {
        self.questions = questions;
        self.current_index = 0;
        self.loading = false;
        self.error = None;
        self.selection = None;
    }

    /// Records a load failure for the presentation layer to render.
    /// Questions already held are kept.
    pub fn fail(&mut self, error: PortError) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&PortError> {
        self.error.as_ref()
    }

    /// `None` means the quiz is out of questions; it is not an error.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn select_choice(&mut self, choice_index: usize) -> Result<AnswerRecord, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::NoCurrentQuestion)?
            .clone();
        let choice = question
            .choices()
            .get(choice_index)
            .ok_or(SessionError::ChoiceOutOfRange {
                index: choice_index,
                len: question.choices().len(),
            })?;

        let record = AnswerRecord {
            selected_choice_index: choice_index,
            is_correct: choice == question.answer(),
        };
        self.selection = Some((question, record));
        Ok(record)
    }

    /// The answer picked for the question currently shown, if any.
    pub fn current_answer(&self) -> Option<AnswerRecord> {
        let (question, record) = self.selection.as_ref()?;
        (self.current_question() == Some(question)).then_some(*record)
    }

    /// Moves to the next question. There is no upper bound.
    pub fn advance(&mut self) -> usize {
        self.current_index += 1;
        self.current_index
    }

    pub fn total_question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn tracker_label(&self) -> String {
        format!("Question {}/{}", self.current_index, self.total_question_count())
    }

    pub fn shows_progress(&self) -> bool {
        self.current_index >= PROGRESS_VISIBLE_FROM
    }

    pub fn score(&self) -> usize {
        display_score(self.current_index)
    }

    pub fn progress(&self) -> f32 {
        progress_fraction(self.current_index)
    }

    /// An error only fails the session when there are no questions to fall back on.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.error.is_some() && self.questions.is_empty() {
            SessionPhase::Failed
        } else if self.current_question().is_some() {
            SessionPhase::Ready(self.current_index)
        } else {
            SessionPhase::Exhausted(self.current_index)
        }
    }
}
