//! Identifier allocation for the in-memory stores.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::domain::{ENTITY_ID_LEN, EntityId};

struct IdState {
    rng: SmallRng,
    issued: HashSet<EntityId>,
}

/// Hands out unique random identifiers. Clones share the same state, so
/// users and posts never collide.
#[derive(Clone)]
pub struct IdGenerator {
    state: Arc<Mutex<IdState>>,
}

impl IdGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Deterministic generator for reproducible tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            state: Arc::new(Mutex::new(IdState {
                rng,
                issued: HashSet::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IdState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Next identifier not issued before by this generator.
    pub fn next_id(&self) -> EntityId {
        let mut state = self.lock();
        loop {
            let mut bytes = [0_u8; ENTITY_ID_LEN];
            state.rng.fill_bytes(&mut bytes);
            let id = EntityId::from_bytes(bytes);
            if state.issued.insert(id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
