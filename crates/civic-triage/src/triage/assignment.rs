use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::catalog::Catalog;
use crate::config::{AssignmentMode, TriageConfig};

const FALLBACK_POOL_KEY: &str = "*fallback*";

/// Picks one caseworker out of a department's pool.
///
/// `pool` is never empty; implementations must return an index into it.
pub trait AssignmentStrategy: Send + Sync {
    fn select(&self, department_id: &str, pool: &[String]) -> usize;
}

/// Cycles through each department's pool independently, starting at the first entry.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursors: Mutex<HashMap<String, usize>>,
}

impl AssignmentStrategy for RoundRobin {
    fn select(&self, department_id: &str, pool: &[String]) -> usize {
        let mut cursors = self
            .cursors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let cursor = cursors.entry(department_id.to_string()).or_insert(0);
        let index = *cursor % pool.len();
        *cursor = cursor.wrapping_add(1);
        index
    }
}

/// Uniform random choice; seed it for reproducible runs.
#[derive(Debug)]
pub struct RandomSelection {
    rng: Mutex<StdRng>,
}

impl RandomSelection {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AssignmentStrategy for RandomSelection {
    fn select(&self, _department_id: &str, pool: &[String]) -> usize {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..pool.len())
    }
}

/// Build the strategy named by configuration.
pub fn strategy_from_config(config: &TriageConfig) -> Arc<dyn AssignmentStrategy> {
    match (config.assignment, config.assignment_seed) {
        (AssignmentMode::RoundRobin, _) => Arc::new(RoundRobin::default()),
        (AssignmentMode::Random, Some(seed)) => Arc::new(RandomSelection::seeded(seed)),
        (AssignmentMode::Random, None) => Arc::new(RandomSelection::from_entropy()),
    }
}

/// Assigns a caseworker from the catalog's pool for a department.
pub struct CaseworkerAssigner {
    catalog: Arc<Catalog>,
    strategy: Arc<dyn AssignmentStrategy>,
}

impl CaseworkerAssigner {
    pub fn new(catalog: Arc<Catalog>, strategy: Arc<dyn AssignmentStrategy>) -> Self {
        Self { catalog, strategy }
    }

    pub fn round_robin(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, Arc::new(RoundRobin::default()))
    }

    /// Unknown departments draw from the fallback pool and share one selection key.
    pub fn assign(&self, department_id: &str) -> String {
        let pool = self.catalog.officer_pool(department_id);
        let key = if self.catalog.has_officer_pool(department_id) {
            department_id
        } else {
            FALLBACK_POOL_KEY
        };
        let index = self.strategy.select(key, pool);
        pool.get(index)
            .or_else(|| pool.first())
            .cloned()
            .unwrap_or_default()
    }
}
