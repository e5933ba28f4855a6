// src/views.rs

use axum::{
    Json,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, html};

use crate::models::question::QuizView;

/// Renders the quiz payload as JSON when the client asks for it, HTML otherwise.
pub fn render(headers: &HeaderMap, view: QuizView) -> Response {
    if wants_json(headers) {
        Json(view).into_response()
    } else {
        Html(quiz_page(&view).into_string()).into_response()
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

pub fn quiz_page(view: &QuizView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Flag Quiz" }
                link rel="stylesheet" href="/styles/main.css";
            }
            body {
                div.container {
                    h1 { "Guess the Flag" }
                    @if let Some(was_correct) = view.was_correct {
                        @if was_correct {
                            p.feedback.correct { "Correct!" }
                        } @else {
                            p.feedback.wrong { "Wrong answer, streak reset." }
                        }
                    }
                    p.score { "Total Score: " span id="score" { (view.score) } }
                    div.flag { (flag(&view.question.flag)) }
                    form.options action="/submit" method="post" {
                        @for option in &view.question.options {
                            button type="submit" name="chooseOption" value=(option.name) {
                                (option.name)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Flag references are either image locations or inline glyphs.
fn flag(reference: &str) -> Markup {
    let is_image = reference.starts_with('/')
        || reference.starts_with("http://")
        || reference.starts_with("https://");

    html! {
        @if is_image {
            img src=(reference) alt="Flag to guess";
        } @else {
            span.glyph { (reference) }
        }
    }
}
