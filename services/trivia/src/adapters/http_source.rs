//! services/trivia/src/adapters/http_source.rs
//!
//! This module contains the HTTP adapter for the question document.
//! It implements the `QuestionSource` port from the `core` crate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use trivia_core::domain::{Question, QuestionSet};
use trivia_core::ports::{PortError, PortResult, QuestionSource};

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

/// One entry of the question document as it appears on the wire.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    question: String,
    #[serde(default)]
    category: String,
    choices: Vec<String>,
    answer: String,
}

impl QuestionRecord {
    fn to_domain(self) -> PortResult<Question> {
        Question::new(self.question, self.category, self.choices, self.answer)
            .map_err(|e| PortError::Malformed(e.to_string()))
    }
}

/// Parses a question document: a JSON array of question records.
pub fn parse_questions(body: &[u8]) -> PortResult<QuestionSet> {
    let records: Vec<QuestionRecord> =
        serde_json::from_slice(body).map_err(|e| PortError::Malformed(e.to_string()))?;

    let questions = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record
                .to_domain()
                .map_err(|e| PortError::Malformed(format!("question {}: {}", i, e)))
        })
        .collect::<PortResult<Vec<_>>>()?;

    Ok(QuestionSet::new(questions))
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuestionSource` with a single unauthenticated GET.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    url: String,
}

impl HttpQuestionSource {
    /// Creates a new `HttpQuestionSource` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Timeout
    } else {
        PortError::Network(e.to_string())
    }
}

//=========================================================================================
// `QuestionSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_all_questions(&self) -> PortResult<QuestionSet> {
        info!("Fetching questions from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let questions = parse_questions(&body)?;
        debug!(count = questions.len(), "Parsed question document");
        Ok(questions)
    }
}
