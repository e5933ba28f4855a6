// src/main.rs

use flag_quiz::config::{Config, SESSION_SWEEP_INTERVAL_SECS};
use flag_quiz::quiz::{InMemorySessionStore, RandomSource, SharedWorkingSet};
use flag_quiz::repository::PgFlagRepository;
use flag_quiz::routes;
use flag_quiz::state::AppState;
use dotenvy::dotenv;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const MAX_CONNECT_RETRIES: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "flag-quiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let pool = connect_with_retry(&config).await?;
    tracing::info!("Connected to PostgreSQL");

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    let sessions = Arc::new(InMemorySessionStore::new(
        config.session_ttl,
        config.max_sessions,
    ));
    spawn_session_sweeper(sessions.clone());

    let state = AppState {
        repository: Arc::new(PgFlagRepository::new(pool)),
        sessions,
        working_set: SharedWorkingSet::default(),
        rng: RandomSource::from_entropy(),
        config: config.clone(),
    };

    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://localhost:{}/", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops idle sessions so abandoned ones do not pile up.
fn spawn_session_sweeper(sessions: Arc<InMemorySessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                tracing::debug!("Expired {} quiz sessions", removed);
            }
        }
    });
}

/// Connects to the flags database, retrying while it comes up.
/// Gives up after `MAX_CONNECT_RETRIES` attempts; the caller treats that as fatal.
async fn connect_with_retry(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = config.database.connect_options()?;
    let mut retry_count = 0;

    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > MAX_CONNECT_RETRIES {
                    tracing::error!(
                        "Failed to connect to database after {} retries: {}",
                        MAX_CONNECT_RETRIES,
                        e
                    );
                    return Err(e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
