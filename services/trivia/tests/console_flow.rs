use std::io::{self, BufReader, Cursor, Read};
use std::sync::{mpsc, Arc};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use trivia_core::domain::{Question, QuestionSet};
use trivia_core::ports::{PortError, PortResult, QuestionSource};
use trivia_core::repository::QuizRepository;
use trivia_core::session::SessionPhase;
use trivia_lib::console::{run_until_interrupted, ConsoleQuiz};
use trivia_lib::error::AppError;
use trivia_lib::loader::load_session;

struct FixedSource(PortResult<QuestionSet>);

#[async_trait]
impl QuestionSource for FixedSource {
    async fn fetch_all_questions(&self) -> PortResult<QuestionSet> {
        self.0.clone()
    }
}

/// Answers with each scripted outcome in turn.
struct SequenceSource(std::sync::Mutex<Vec<PortResult<QuestionSet>>>);

#[async_trait]
impl QuestionSource for SequenceSource {
    async fn fetch_all_questions(&self) -> PortResult<QuestionSet> {
        self.0.lock().unwrap().remove(0)
    }
}

/// Never answers; used to exercise cancellation.
struct PendingSource;

#[async_trait]
impl QuestionSource for PendingSource {
    async fn fetch_all_questions(&self) -> PortResult<QuestionSet> {
        std::future::pending().await
    }
}

fn question(text: &str, choices: &[&str], answer: &str) -> Question {
    Question::new(
        text,
        "general",
        choices.iter().map(|s| s.to_string()).collect(),
        answer,
    )
    .unwrap()
}

fn sample() -> QuestionSet {
    QuestionSet::new(vec![
        question("2+2?", &["3", "4", "5", "6"], "4"),
        question("Capital of France?", &["Berlin", "Paris", "Rome", "Madrid"], "Paris"),
    ])
}

fn play(session: trivia_core::session::QuizSession, input: &str) -> (usize, String) {
    let mut output = Vec::new();
    let score = ConsoleQuiz::new(session, Cursor::new(input.to_string()), &mut output)
        .run()
        .unwrap();
    (score, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn plays_through_every_question() {
    let mut repository = QuizRepository::new(Arc::new(FixedSource(Ok(sample()))));
    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Ready(0));

    // Wrong answer on the first question, right on the second: score is still 20.
    let (score, transcript) = play(session, "1\nn\n2\nn\n");

    assert_eq!(score, 20);
    assert!(transcript.contains("Question 0/2"));
    assert!(transcript.contains("(x) 1. 3"));
    assert!(transcript.contains("(+) 2. Paris"));
    assert!(transcript.ends_with("Final score: 20\n"));
}

#[tokio::test]
async fn out_of_range_choice_is_reported() {
    let mut repository = QuizRepository::new(Arc::new(FixedSource(Ok(sample()))));
    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();

    let (score, transcript) = play(session, "9\nq\n");

    assert_eq!(score, 0);
    assert!(transcript.contains("Pick a number from 1 to 4."));
}

#[tokio::test]
async fn failed_load_is_rendered_not_raised() {
    let mut repository = QuizRepository::new(Arc::new(FixedSource(Err(PortError::Timeout))));
    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Failed);

    let (score, transcript) = play(session, "");

    assert_eq!(score, 0);
    assert!(transcript.contains("Could not load questions: Request timed out"));
}

#[tokio::test]
async fn cancelling_abandons_the_load() {
    let mut repository = QuizRepository::new(Arc::new(PendingSource));
    let token = CancellationToken::new();
    token.cancel();

    let result = load_session(&mut repository, &token).await;

    assert!(matches!(result, Err(AppError::Port(PortError::Cancelled))));
}

/// Blocks on every read until a line arrives or the sender is dropped.
struct ChannelReader(mpsc::Receiver<Vec<u8>>);

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.recv() {
            Ok(bytes) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Err(_) => Ok(0),
        }
    }
}

#[tokio::test]
async fn interrupt_ends_a_console_blocked_on_input() {
    let mut repository = QuizRepository::new(Arc::new(FixedSource(Ok(sample()))));
    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();

    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    let token = CancellationToken::new();
    token.cancel();

    let played = run_until_interrupted(
        move || ConsoleQuiz::new(session, BufReader::new(ChannelReader(rx)), io::sink()).run(),
        token.cancelled(),
    )
    .await
    .unwrap();

    assert_eq!(played, None);
    // Unblocks the parked reader so the runtime can shut down.
    drop(tx);
}

#[tokio::test]
async fn finished_console_reports_its_score() {
    let mut repository = QuizRepository::new(Arc::new(FixedSource(Ok(sample()))));
    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();

    let played = run_until_interrupted(
        move || ConsoleQuiz::new(session, Cursor::new("n\nn\n"), io::sink()).run(),
        std::future::pending::<()>(),
    )
    .await
    .unwrap();

    assert_eq!(played, Some(20));
}

#[tokio::test]
async fn failed_refresh_still_plays_earlier_questions() {
    let source = SequenceSource(std::sync::Mutex::new(vec![Ok(sample()), Err(PortError::Timeout)]));
    let mut repository = QuizRepository::new(Arc::new(source));
    repository.load_all().await;

    let session = load_session(&mut repository, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Ready(0));

    let (score, transcript) = play(session, "n\n");

    assert_eq!(score, 10);
    assert!(transcript.starts_with("Refresh failed (Request timed out), using earlier questions."));
}
