// src/quiz/mod.rs

pub mod random;
pub mod score;
pub mod selector;
pub mod session;
pub mod snapshot;

pub use random::RandomSource;
pub use score::{AnswerOutcome, ScoreTracker};
pub use selector::select_question;
pub use session::{ActiveRound, InMemorySessionStore, QuizSession, SessionId, SessionStore};
pub use snapshot::SharedWorkingSet;
