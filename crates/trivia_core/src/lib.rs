pub mod domain;
pub mod ports;
pub mod repository;
pub mod session;

pub use domain::{AnswerRecord, Question, QuestionError, QuestionSet};
pub use ports::{PortError, PortResult, QuestionSource};
pub use repository::{LoadState, QuizRepository};
pub use session::{display_score, progress_fraction, QuizSession, SessionError, SessionPhase};
