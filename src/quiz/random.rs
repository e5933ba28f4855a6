// src/quiz/random.rs

use std::sync::{Arc, Mutex, PoisonError};

use rand::{SeedableRng, rngs::StdRng};

/// Shared random number provider for question selection.
///
/// Production uses an entropy-seeded generator; tests pass a fixed seed to get
/// reproducible questions.
#[derive(Clone)]
pub struct RandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Runs `f` with exclusive access to the generator.
    /// Must not be held across an `.await`.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic mid-draw leaves the generator in a usable state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}
