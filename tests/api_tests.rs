// tests/api_tests.rs

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use flag_quiz::{
    config::{Config, DatabaseConfig},
    error::QuizError,
    models::flag::FlagRecord,
    quiz::{InMemorySessionStore, RandomSource, SessionStore, SharedWorkingSet},
    repository::{FlagRepository, InMemoryFlagRepository},
    routes,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

/// Repository that always fails, standing in for an unreachable database.
struct UnavailableRepository;

#[async_trait]
impl FlagRepository for UnavailableRepository {
    async fn fetch_all(&self) -> Result<Vec<FlagRecord>, QuizError> {
        Err(QuizError::RepositoryUnavailable("connection refused".to_string()))
    }
}

fn sample_flags() -> Vec<FlagRecord> {
    [
        "France", "Spain", "Japan", "Brazil", "Canada", "Kenya", "Peru", "Norway",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| FlagRecord::new(i as i32 + 1, *name, format!("/flags/{}.png", name.to_lowercase())))
    .collect()
}

fn test_state(
    repository: Arc<dyn FlagRepository>,
    sessions: Arc<dyn SessionStore>,
) -> AppState {
    let config = Config {
        database: DatabaseConfig::Url("postgres://unused".to_string()),
        port: 0,
        rust_log: "error".to_string(),
        static_dir: "public".to_string(),
        log_dir: "logs".to_string(),
        session_ttl: Duration::from_secs(3600),
        max_sessions: 1000,
    };

    AppState {
        repository,
        sessions,
        working_set: SharedWorkingSet::default(),
        rng: RandomSource::seeded(7),
        config,
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(repository: Arc<dyn FlagRepository>) -> String {
    let state = test_state(repository, Arc::new(InMemorySessionStore::default()));

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn spawn_default_app() -> String {
    spawn_app(Arc::new(InMemoryFlagRepository::new(sample_flags()))).await
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

async fn get_index(client: &reqwest::Client, address: &str) -> Value {
    let response = client
        .get(format!("{}/", address))
        .header("Accept", "application/json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    response.json().await.expect("Failed to parse index json")
}

async fn submit(client: &reqwest::Client, address: &str, choice: &str) -> Value {
    let response = client
        .post(format!("{}/submit", address))
        .header("Accept", "application/json")
        .form(&[("chooseOption", choice)])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    response.json().await.expect("Failed to parse submit json")
}

fn correct_answer(view: &Value) -> String {
    view["question"]["correctAnswer"]
        .as_str()
        .expect("correctAnswer missing")
        .to_string()
}

fn wrong_answer(view: &Value) -> String {
    let correct = correct_answer(view);
    view["question"]["options"]
        .as_array()
        .expect("options missing")
        .iter()
        .filter_map(|o| o["name"].as_str())
        .find(|name| *name != correct)
        .expect("no distractor")
        .to_string()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_default_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn index_starts_fresh_quiz() {
    let address = spawn_default_app().await;
    let client = client();

    let view = get_index(&client, &address).await;

    assert_eq!(view["score"], 0);
    assert!(view["wasCorrect"].is_null());

    let options = view["question"]["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    let correct = correct_answer(&view);
    assert_eq!(options.iter().filter(|o| o["name"] == correct.as_str()).count(), 1);
    assert_eq!(
        view["question"]["flag"],
        format!("/flags/{}.png", correct.to_lowercase())
    );
}

#[tokio::test]
async fn index_renders_html_and_issues_session_cookie() {
    let address = spawn_default_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie missing")
        .to_string();
    assert!(cookie.starts_with("quiz_session="));
    assert!(cookie.contains("HttpOnly"));

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.unwrap();
    assert!(body.contains("name=\"chooseOption\""));
    assert!(body.contains("Total Score: "));
    assert!(body.contains("<span id=\"score\">0</span>"));
}

#[tokio::test]
async fn streak_grows_on_correct_answers_and_resets_on_wrong_one() {
    let address = spawn_default_app().await;
    let client = client();

    let mut view = get_index(&client, &address).await;

    for expected in 1..=3 {
        let answer = correct_answer(&view);
        view = submit(&client, &address, &answer).await;
        assert_eq!(view["wasCorrect"], true);
        assert_eq!(view["score"], expected);
        assert_eq!(view["question"]["options"].as_array().unwrap().len(), 4);
    }

    let answer = wrong_answer(&view);
    view = submit(&client, &address, &answer).await;
    assert_eq!(view["wasCorrect"], false);
    assert_eq!(view["score"], 0);
}

#[tokio::test]
async fn index_resets_streak() {
    let address = spawn_default_app().await;
    let client = client();

    let view = get_index(&client, &address).await;
    let view = submit(&client, &address, &correct_answer(&view)).await;
    assert_eq!(view["score"], 1);

    let view = get_index(&client, &address).await;
    assert_eq!(view["score"], 0);
    assert!(view["wasCorrect"].is_null());

    // The streak restarts from zero after the reset.
    let view = submit(&client, &address, &correct_answer(&view)).await;
    assert_eq!(view["score"], 1);
}

#[tokio::test]
async fn sessions_do_not_share_scores() {
    let address = spawn_default_app().await;
    let alice = client();
    let bob = client();

    let alice_view = get_index(&alice, &address).await;
    let bob_view = get_index(&bob, &address).await;

    let alice_view = submit(&alice, &address, &correct_answer(&alice_view)).await;
    let alice_view = submit(&alice, &address, &correct_answer(&alice_view)).await;
    assert_eq!(alice_view["score"], 2);

    let bob_view = submit(&bob, &address, &correct_answer(&bob_view)).await;
    assert_eq!(bob_view["score"], 1);
}

#[tokio::test]
async fn submit_without_active_question_fails() {
    let address = spawn_default_app().await;
    let client = client();

    let response = client
        .post(format!("{}/submit", address))
        .form(&[("chooseOption", "France")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn submit_without_choice_is_rejected() {
    let address = spawn_default_app().await;
    let client = client();
    get_index(&client, &address).await;

    let response = client
        .post(format!("{}/submit", address))
        .form(&[("somethingElse", "France")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn index_fails_when_repository_is_unavailable() {
    let address = spawn_app(Arc::new(UnavailableRepository)).await;
    let client = client();

    let response = client
        .get(format!("{}/", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn index_fails_with_too_few_flags() {
    let flags = sample_flags().into_iter().take(3).collect();
    let address = spawn_app(Arc::new(InMemoryFlagRepository::new(flags))).await;
    let client = client();

    let response = client
        .get(format!("{}/", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn static_assets_are_served() {
    let address = spawn_default_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/styles/main.css", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn submit_with_json_body_is_rejected_as_json_error() {
    let address = spawn_default_app().await;
    let client = client();
    get_index(&client, &address).await;

    let response = client
        .post(format!("{}/submit", address))
        .json(&serde_json::json!({ "chooseOption": "France" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("error body should be json");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cookieless_requests_do_not_grow_sessions_past_the_cap() {
    let flags: Vec<FlagRecord> = (0..200)
        .map(|i| FlagRecord::new(i + 1, format!("Country {}", i), format!("/flags/{}.png", i)))
        .collect();
    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(3600), 50));
    let state = test_state(Arc::new(InMemoryFlagRepository::new(flags)), sessions.clone());
    let app = routes::create_router(state);

    for _ in 0..1000 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(sessions.len().await, 50);
}

#[tokio::test]
async fn sessions_share_one_flag_snapshot() {
    let state = test_state(
        Arc::new(InMemoryFlagRepository::new(sample_flags())),
        Arc::new(InMemorySessionStore::default()),
    );
    let snapshot = state.working_set.clone();
    let app = routes::create_router(state);

    let first = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let after_first = snapshot.current();

    let second = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    assert_eq!(after_first.len(), sample_flags().len());
    assert!(snapshot.current().shares_records_with(&after_first));
}
