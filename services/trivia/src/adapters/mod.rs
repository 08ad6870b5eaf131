pub mod http_source;

pub use http_source::{parse_questions, HttpQuestionSource};
