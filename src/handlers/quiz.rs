// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    error::{AppError, QuizError},
    models::question::{QuizView, SubmitAnswerRequest},
    quiz::{
        ActiveRound, RandomSource, SessionId, SessionStore, SharedWorkingSet, select_question,
    },
    repository::FlagRepository,
    views,
};

/// Starts a fresh quiz for the caller's session.
///
/// * Resets the streak to 0 (persisted even if loading flags fails).
/// * Reloads the working set from the flags table into the shared snapshot.
/// * Draws the first question and stores it as the active round.
pub async fn index(
    State(repository): State<Arc<dyn FlagRepository>>,
    State(sessions): State<Arc<dyn SessionStore>>,
    State(snapshot): State<SharedWorkingSet>,
    State(rng): State<RandomSource>,
    Extension(session_id): Extension<SessionId>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = sessions.load(session_id).await.unwrap_or_default();
    session.score.start_fresh_quiz();
    sessions.save(session_id, session.clone()).await;

    let working_set = snapshot.refresh(repository.fetch_all().await?);
    tracing::info!("Loaded {} flag records", working_set.len());

    let question = rng.with(|rng| select_question(&working_set, rng))?;
    tracing::debug!("Session {} drew {:?}", session_id, question.correct_answer);

    let view = QuizView {
        question: question.clone(),
        score: session.score.score(),
        was_correct: None,
    };

    session.round = Some(ActiveRound {
        working_set,
        question,
    });
    sessions.save(session_id, session).await;

    Ok(views::render(&headers, view))
}

/// Grades the submitted option and advances to the next question.
///
/// Fails with `MissingCurrentQuestion` (500) when the session never
/// visited the index page, and with 400 when the body is not a form
/// carrying `chooseOption`.
pub async fn submit(
    State(sessions): State<Arc<dyn SessionStore>>,
    State(rng): State<RandomSource>,
    Extension(session_id): Extension<SessionId>,
    headers: HeaderMap,
    form: Result<Form<SubmitAnswerRequest>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(req) = form?;
    req.validate()?;

    let mut session = sessions
        .load(session_id)
        .await
        .ok_or(QuizError::MissingCurrentQuestion)?;
    let round = session
        .round
        .as_mut()
        .ok_or(QuizError::MissingCurrentQuestion)?;

    let outcome = session
        .score
        .record_answer(&req.choose_option, &round.question.correct_answer);
    tracing::debug!(
        "Session {} answered {:?}: correct={} score={}",
        session_id,
        req.choose_option,
        outcome.correct,
        outcome.new_score
    );

    round.question = rng.with(|rng| select_question(&round.working_set, rng))?;

    let view = QuizView {
        question: round.question.clone(),
        score: outcome.new_score,
        was_correct: Some(outcome.correct),
    };
    sessions.save(session_id, session).await;

    Ok(views::render(&headers, view))
}

/// Fallback for paths that match neither a route nor a static asset.
pub async fn not_found() -> impl IntoResponse {
    AppError::NotFound("Not Found".to_string())
}
