//! services/trivia/src/loader.rs
//!
//! The one-shot task that fills a quiz session from the repository.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use trivia_core::ports::PortError;
use trivia_core::repository::QuizRepository;
use trivia_core::session::QuizSession;

use crate::error::AppError;

/// Loads the question set and builds a session from it.
///
/// A failed fetch is not an error here: it yields a session in the `Failed` phase.
/// Only cancelling the token (e.g. the screen going away mid-fetch) returns `Err`,
/// as `PortError::Cancelled`.
pub async fn load_session(
    repository: &mut QuizRepository,
    cancellation_token: &CancellationToken,
) -> Result<QuizSession, AppError> {
    info!("Loading questions...");

    let state = tokio::select! {
        _ = cancellation_token.cancelled() => {
            info!("Question load cancelled.");
            return Err(PortError::Cancelled.into());
        }
        state = repository.load_all() => state,
    };

    if let Some(e) = &state.error {
        warn!("Questions could not be loaded: {}", e);
    }

    let session = QuizSession::from_load_state(state);
    info!("Session ready with {} questions.", session.total_question_count());
    Ok(session)
}
