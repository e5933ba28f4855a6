// src/quiz/score.rs

/// Result of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub new_score: u32,
}

/// Streak counter: consecutive correct answers since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Grades `submitted` against `expected` with strict, case-sensitive matching.
    /// A hit extends the streak, a miss resets it.
    pub fn record_answer(&mut self, submitted: &str, expected: &str) -> AnswerOutcome {
        let correct = submitted == expected;
        self.score = if correct { self.score.saturating_add(1) } else { 0 };

        AnswerOutcome {
            correct,
            new_score: self.score,
        }
    }

    pub fn start_fresh_quiz(&mut self) {
        self.score = 0;
    }
}
