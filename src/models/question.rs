// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::flag::FlagRecord;

/// One round of the quiz: the flag to guess plus the shuffled choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Name of the correct record.
    pub correct_answer: String,

    /// Flag reference of the correct record.
    pub flag: String,

    /// All choices in display order; the correct record appears exactly once.
    pub options: Vec<FlagRecord>,
}

impl Question {
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|option| option.name == name)
    }
}

/// Render payload shared by the index and submit pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub question: Question,
    pub score: u32,

    /// `None` on a fresh quiz, otherwise whether the previous answer was right.
    pub was_correct: Option<bool>,
}

/// Form body posted by the answer buttons.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[serde(rename = "chooseOption", default)]
    #[validate(length(min = 1))]
    pub choose_option: String,
}
