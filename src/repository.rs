// src/repository.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{error::QuizError, models::flag::FlagRecord};

/// Read-only access to the flags table.
#[async_trait]
pub trait FlagRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<FlagRecord>, QuizError>;
}

/// Postgres-backed repository.
#[derive(Clone)]
pub struct PgFlagRepository {
    pool: PgPool,
}

impl PgFlagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlagRepository for PgFlagRepository {
    async fn fetch_all(&self) -> Result<Vec<FlagRecord>, QuizError> {
        let flags = sqlx::query_as::<_, FlagRecord>(
            r#"
            SELECT id, name, flag
            FROM flags
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch flags: {:?}", e);
            QuizError::from(e)
        })?;

        Ok(flags)
    }
}

/// Fixed in-memory dataset, for tests and local runs without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlagRepository {
    flags: Vec<FlagRecord>,
}

impl InMemoryFlagRepository {
    pub fn new(flags: Vec<FlagRecord>) -> Self {
        Self { flags }
    }
}

#[async_trait]
impl FlagRepository for InMemoryFlagRepository {
    async fn fetch_all(&self) -> Result<Vec<FlagRecord>, QuizError> {
        Ok(self.flags.clone())
    }
}
