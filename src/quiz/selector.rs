// src/quiz/selector.rs

use rand::{
    Rng,
    seq::{SliceRandom, index},
};

use crate::{
    config::OPTION_COUNT,
    error::QuizError,
    models::{flag::WorkingSet, question::Question},
};

/// Builds a question from the working set.
///
/// * Picks the correct record uniformly at random.
/// * Draws `OPTION_COUNT - 1` distinct distractors from the remaining records.
/// * Shuffles the correct record in among them.
///
/// Fails with `EmptyDataset` or `InsufficientOptions` when the set cannot fill
/// every option slot.
pub fn select_question<R: Rng + ?Sized>(
    working_set: &WorkingSet,
    rng: &mut R,
) -> Result<Question, QuizError> {
    let records = working_set.records();

    if records.is_empty() {
        return Err(QuizError::EmptyDataset);
    }
    if records.len() < OPTION_COUNT {
        return Err(QuizError::InsufficientOptions {
            available: records.len(),
            required: OPTION_COUNT,
        });
    }

    let correct_idx = rng.gen_range(0..records.len());
    let correct = &records[correct_idx];

    // Sample over the set with the correct record removed, then shift indices back.
    let mut options: Vec<_> = index::sample(rng, records.len() - 1, OPTION_COUNT - 1)
        .into_iter()
        .map(|i| if i >= correct_idx { i + 1 } else { i })
        .map(|i| records[i].clone())
        .collect();
    options.push(correct.clone());
    options.shuffle(rng);

    Ok(Question {
        correct_answer: correct.name.clone(),
        flag: correct.flag.clone(),
        options,
    })
}
