// src/config.rs

use std::{env, fmt, str::FromStr, time::Duration};

use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;

/// Number of options shown for every question (one correct, the rest distractors).
pub const OPTION_COUNT: usize = 4;

/// Name of the cookie carrying the quiz session identifier.
pub const SESSION_COOKIE_NAME: &str = "quiz_session";

/// Idle time after which a quiz session is forgotten.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Upper bound on sessions held in memory at once.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// How often expired sessions are swept.
pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {}: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Connection settings for the flags database.
///
/// Either a full `DATABASE_URL` or the discrete `PG*` variables.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        user: String,
        password: Option<String>,
        database: String,
        port: u16,
    },
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            DatabaseConfig::Url(url) => url.parse(),
            DatabaseConfig::Parts {
                host,
                user,
                password,
                database,
                port,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .username(user)
                    .database(database)
                    .port(*port);
                Ok(match password {
                    Some(password) => options.password(password),
                    None => options,
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub port: u16,
    pub rust_log: String,
    pub static_dir: String,
    pub log_dir: String,
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database = match env::var("DATABASE_URL") {
            Ok(url) => DatabaseConfig::Url(url),
            Err(_) => DatabaseConfig::Parts {
                host: required("PGHOST")?,
                user: required("PGUSER")?,
                password: env::var("PGPASSWORD").ok(),
                database: required("PGDATABASE")?,
                port: parsed_or("PGPORT", DEFAULT_PG_PORT)?,
            },
        };

        Ok(Self {
            database,
            port: parsed_or("PORT", 3000)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            session_ttl: Duration::from_secs(parsed_or(
                "SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
            max_sessions: parsed_or("MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parsed_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
