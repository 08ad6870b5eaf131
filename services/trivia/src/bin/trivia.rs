//! services/trivia/src/bin/trivia.rs

use std::io;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia_core::repository::QuizRepository;
use trivia_lib::{
    adapters::HttpQuestionSource,
    config::Config,
    console::{run_until_interrupted, ConsoleQuiz},
    error::AppError,
    loader::load_session,
};

/// Exit status for a run ended by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Resolves on Ctrl-C. If the signal cannot be watched it never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    info!("Configuration loaded.");

    // --- 2. Initialize the Question Source ---
    let source = Arc::new(HttpQuestionSource::new(
        config.questions_url(),
        config.fetch_timeout,
    )?);
    let mut repository = QuizRepository::new(source);

    // --- 3. Load Questions, Cancellable with Ctrl-C ---
    // Once tokio owns SIGINT it keeps it, so the watcher lives until the process ends.
    let cancellation_token = CancellationToken::new();
    let watcher = {
        let token = cancellation_token.clone();
        tokio::spawn(async move {
            ctrl_c().await;
            warn!("Interrupted.");
            token.cancel();
        })
    };

    let session = load_session(&mut repository, &cancellation_token).await?;

    // --- 4. Play until done or interrupted ---
    let played = run_until_interrupted(
        move || {
            let stdin = io::stdin();
            let stdout = io::stdout();
            ConsoleQuiz::new(session, stdin.lock(), stdout.lock()).run()
        },
        cancellation_token.cancelled(),
    )
    .await?;

    match played {
        Some(score) => {
            watcher.abort();
            info!("Quiz finished with score {}.", score);
            Ok(())
        }
        None => std::process::exit(INTERRUPTED_EXIT_CODE),
    }
}
