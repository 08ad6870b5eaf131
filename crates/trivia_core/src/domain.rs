//! crates/trivia_core/src/domain.rs
//!
//! Defines the pure, core data structures for a quiz run.
//! These structs are independent of any network or serialization format.

use std::fmt;

/// Reasons a question cannot be built from its parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question has no choices")]
    NoChoices,
    #[error("answer '{0}' is not one of the choices")]
    AnswerNotAmongChoices(String),
}

/// A single multiple-choice question. Immutable once loaded.
///
/// The correct answer is stored as text and must equal one of the choices by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    text: String,
    category: String,
    choices: Vec<String>,
    answer: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        choices: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }
        if !choices.iter().any(|choice| *choice == answer) {
            return Err(QuestionError::AnswerNotAmongChoices(answer));
        }
        Ok(Self {
            text: text.into(),
            category: category.into(),
            choices,
            answer,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The ordered, fixed list of questions loaded once per attempt.
/// Insertion order is presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// Renders as a bracketed list, so an empty set is `[]`, never the empty string.
impl fmt::Display for QuestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, question) in self.questions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{question}")?;
        }
        write!(f, "]")
    }
}

/// The selected choice and its correctness for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selected_choice_index: usize,
    pub is_correct: bool,
}
