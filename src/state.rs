use std::sync::Arc;

use crate::config::Config;
use crate::quiz::{RandomSource, SessionStore, SharedWorkingSet};
use crate::repository::FlagRepository;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FlagRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub working_set: SharedWorkingSet,
    pub rng: RandomSource,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn FlagRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.repository.clone()
    }
}

impl FromRef<AppState> for Arc<dyn SessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for RandomSource {
    fn from_ref(state: &AppState) -> Self {
        state.rng.clone()
    }
}

impl FromRef<AppState> for SharedWorkingSet {
    fn from_ref(state: &AppState) -> Self {
        state.working_set.clone()
    }
}
