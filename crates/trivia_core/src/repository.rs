//! crates/trivia_core/src/repository.rs
//!
//! A thin adapter over a `QuestionSource` that turns a failed fetch into state
//! instead of an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::QuestionSet;
use crate::ports::{PortError, QuestionSource};

/// The tri-state outcome of a load: data, a loading flag, and the last error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub data: Option<QuestionSet>,
    pub loading: bool,
    pub error: Option<PortError>,
}

/// Wraps the question source and keeps the latest `LoadState` between calls.
pub struct QuizRepository {
    source: Arc<dyn QuestionSource>,
    state: LoadState,
}

impl QuizRepository {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            state: LoadState::default(),
        }
    }

    /// The state produced by the most recent `load_all`.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetches every question. Never fails: a fault is logged and stored in the
    /// returned state, and any previously loaded data is left untouched.
    pub async fn load_all(&mut self) -> LoadState {
        let prior_loading = self.state.loading;
        self.state.loading = true;

        match self.source.fetch_all_questions().await {
            Ok(questions) => {
                // Success is signalled by the payload having a textual form at all.
                self.state.loading = !questions.to_string().is_empty();
                debug!(count = questions.len(), "Loaded questions");
                self.state.data = Some(questions);
                self.state.error = None;
            }
            Err(e) => {
                warn!("load_all: {}", e);
                self.state.loading = prior_loading;
                self.state.error = Some(e);
            }
        }

        self.state.clone()
    }
}
