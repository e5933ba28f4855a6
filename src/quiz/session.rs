// src/quiz/session.rs

use std::{collections::HashMap, fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};
use uuid::Uuid;

use crate::{
    config::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS},
    models::{flag::WorkingSet, question::Question},
    quiz::score::ScoreTracker,
};

/// Client-issued identifier for one quiz session, carried in a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The question currently on screen and the snapshot it was drawn from.
#[derive(Debug, Clone)]
pub struct ActiveRound {
    pub working_set: WorkingSet,
    pub question: Question,
}

/// Per-client quiz state.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    pub score: ScoreTracker,

    /// `None` until the first index page has been served.
    pub round: Option<ActiveRound>,
}

/// Storage for quiz sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: SessionId) -> Option<QuizSession>;

    /// Inserts or replaces the session; concurrent writers resolve last-write-wins.
    async fn save(&self, id: SessionId, session: QuizSession);
}

/// Process-local session store. Sessions are lost on restart.
///
/// Entries idle longer than `ttl` are dropped, and the store never holds more
/// than `max_sessions`; when full, the least recently used session is evicted.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    ttl: Duration,
    max_sessions: usize,
}

#[derive(Debug)]
struct StoredSession {
    session: QuizSession,
    last_seen: Instant,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for longer than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| now.duration_since(stored.last_seen) <= self.ttl);
        before - sessions.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            DEFAULT_MAX_SESSIONS,
        )
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: SessionId) -> Option<QuizSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id)?;

        if now.duration_since(stored.last_seen) > self.ttl {
            sessions.remove(&id);
            return None;
        }

        stored.last_seen = now;
        Some(stored.session.clone())
    }

    async fn save(&self, id: SessionId, session: QuizSession) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&id) && sessions.len() >= self.max_sessions {
            sessions.retain(|_, stored| now.duration_since(stored.last_seen) <= self.ttl);

            if sessions.len() >= self.max_sessions {
                let oldest = sessions
                    .iter()
                    .min_by_key(|(_, stored)| stored.last_seen)
                    .map(|(oldest, _)| *oldest);
                if let Some(oldest) = oldest {
                    tracing::debug!("Session store full, evicting {}", oldest);
                    sessions.remove(&oldest);
                }
            }
        }

        sessions.insert(
            id,
            StoredSession {
                session,
                last_seen: now,
            },
        );
    }
}
