//! services/trivia/src/console.rs
//!
//! A line-based front end for a `QuizSession`. It only reads session state and
//! forwards the player's input as `select_choice` and `advance` calls.

use std::future::Future;
use std::io::{self, BufRead, Write};

use tracing::debug;
use trivia_core::session::{QuizSession, SessionError, SessionPhase};

use crate::error::AppError;

const SCORE_BAR_WIDTH: usize = 40;

//=========================================================================================
// Player Input
//=========================================================================================

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based choice index.
    Select(usize),
    Next,
    Quit,
    Unknown,
}

impl Command {
    /// Choices are entered one-based (`1`..`N`); `n` or an empty line moves on.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" | "n" | "next" => Command::Next,
            "q" | "quit" => Command::Quit,
            _ => match line.parse::<usize>() {
                Ok(n) if n > 0 => Command::Select(n - 1),
                _ => Command::Unknown,
            },
        }
    }
}

/// Draws the score bar. Fractions above 1.0 fill the whole width.
pub fn render_score_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.max(0.0) * width as f32) as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}

//=========================================================================================
// The Console Driver
//=========================================================================================

pub struct ConsoleQuiz<R, W> {
    session: QuizSession,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleQuiz<R, W> {
    pub fn new(session: QuizSession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Plays until the questions run out, the player quits, or input ends.
    /// Returns the final displayed score.
    pub fn run(&mut self) -> std::io::Result<usize> {
        match self.session.phase() {
            SessionPhase::Loading => {
                writeln!(self.output, "Still loading questions.")?;
                return Ok(0);
            }
            SessionPhase::Failed => {
                let message = self
                    .session
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                writeln!(self.output, "Could not load questions: {}", message)?;
                return Ok(0);
            }
            SessionPhase::Ready(_) | SessionPhase::Exhausted(_) => {
                if let Some(e) = self.session.error() {
                    writeln!(self.output, "Refresh failed ({}), using earlier questions.", e)?;
                }
            }
        }

        let mut line = String::new();
        while self.session.current_question().is_some() {
            self.render()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line) {
                Command::Select(index) => match self.session.select_choice(index) {
                    Ok(record) => debug!(?record, "Choice selected"),
                    Err(SessionError::ChoiceOutOfRange { len, .. }) => {
                        writeln!(self.output, "Pick a number from 1 to {}.", len)?;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                Command::Next => {
                    self.session.advance();
                }
                Command::Quit => break,
                Command::Unknown => {
                    writeln!(self.output, "Enter a choice number, 'n' for next or 'q' to quit.")?;
                }
            }
        }

        let score = self.session.score();
        writeln!(self.output, "Final score: {}", score)?;
        Ok(score)
    }

    fn render(&mut self) -> std::io::Result<()> {
        let Some(question) = self.session.current_question() else {
            return Ok(());
        };
        let answer = self.session.current_answer();

        if self.session.shows_progress() {
            writeln!(
                self.output,
                "{} {}",
                render_score_bar(self.session.progress(), SCORE_BAR_WIDTH),
                self.session.score()
            )?;
        }
        writeln!(self.output, "{}", self.session.tracker_label())?;
        writeln!(self.output, "{}", "- ".repeat(SCORE_BAR_WIDTH / 2))?;
        writeln!(self.output, "{}", question.text())?;

        for (i, choice) in question.choices().iter().enumerate() {
            let marker = match answer {
                Some(record) if record.selected_choice_index == i && record.is_correct => "(+)",
                Some(record) if record.selected_choice_index == i => "(x)",
                _ => "( )",
            };
            writeln!(self.output, "{} {}. {}", marker, i + 1, choice)?;
        }
        Ok(())
    }
}

//=========================================================================================
// Blocking Play with an Interrupt
//=========================================================================================

/// Runs a blocking console job off the async runtime and races it against `interrupt`.
///
/// Returns `Ok(None)` when `interrupt` fires first. The job is left parked on its
/// blocking thread; callers are expected to exit right after.
pub async fn run_until_interrupted<T, F, I>(job: F, interrupt: I) -> Result<Option<T>, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
    I: Future<Output = ()>,
{
    let handle = tokio::task::spawn_blocking(job);
    tokio::select! {
        _ = interrupt => Ok(None),
        joined = handle => {
            let value = joined.map_err(io::Error::other)??;
            Ok(Some(value))
        }
    }
}
