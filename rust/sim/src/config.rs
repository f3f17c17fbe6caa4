//! Everything a run needs, as one owned value that can be cloned into each
//! worker task.

use serde::{Deserialize, Serialize};

use ridesim_engine::config::TableConfig;
use ridesim_engine::seed::{validate_seed, Seed};
use ridesim_strategy::StrategyConfig;

use crate::errors::SimError;

pub const MAX_WORKERS: usize = 64;

/// Below this many sessions a run stays on the calling thread.
pub const DEFAULT_MIN_PARALLEL_SESSIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// Available hardware parallelism, capped at [`MAX_WORKERS`].
    #[default]
    Auto,
    Fixed(usize),
}

impl WorkerCount {
    pub fn resolve(self) -> Result<usize, SimError> {
        match self {
            WorkerCount::Auto => Ok(std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_WORKERS)),
            WorkerCount::Fixed(n) if (1..=MAX_WORKERS).contains(&n) => Ok(n),
            WorkerCount::Fixed(n) => Err(SimError::InvalidWorkerCount {
                requested: n,
                max: MAX_WORKERS,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub table: TableConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Drawn from OS entropy when absent; the chosen seed is reported back.
    #[serde(default)]
    pub base_seed: Option<Seed>,
    #[serde(default)]
    pub workers: WorkerCount,
    #[serde(default = "default_min_parallel_sessions")]
    pub min_parallel_sessions: usize,
}

fn default_min_parallel_sessions() -> usize {
    DEFAULT_MIN_PARALLEL_SESSIONS
}

impl SimulationConfig {
    pub fn new(table: TableConfig) -> Self {
        Self {
            table,
            strategy: StrategyConfig::default(),
            base_seed: None,
            workers: WorkerCount::Auto,
            min_parallel_sessions: DEFAULT_MIN_PARALLEL_SESSIONS,
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_base_seed(mut self, seed: Seed) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: WorkerCount) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_min_parallel_sessions(mut self, threshold: usize) -> Self {
        self.min_parallel_sessions = threshold;
        self
    }

    /// Checks what the table config cannot check itself. Returns the resolved
    /// worker count.
    pub fn validate(&self) -> Result<usize, SimError> {
        if let Some(seed) = self.base_seed {
            validate_seed(u64::from(seed))?;
        }
        self.workers.resolve()
    }
}
