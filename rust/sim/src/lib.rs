//! # ridesim-sim: Parallel Session Runner
//!
//! Runs N independent table sessions across a pool of scoped worker threads
//! and merges them into one session-id ordered result. The output for a given
//! base seed is identical whatever the worker count.
//!
//! ## Core Components
//!
//! - [`config::SimulationConfig`] - Table, strategy, seed and worker settings
//! - [`executor::ParallelExecutor`] - Partition, run and merge
//! - [`worker`] - Owned task/result messages and the per-worker loop
//! - [`output::SimulationOutput`] - Merged tables plus an outcome tally
//! - [`errors::SimError`] - Configuration, seed, worker and merge failures
//!
//! ## Quick Start
//!
//! ```rust
//! use ridesim_engine::config::{SessionConfig, TableConfig};
//! use ridesim_sim::config::{SimulationConfig, WorkerCount};
//! use ridesim_sim::simulate;
//!
//! let session = SessionConfig::builder(500, 5)
//!     .win_limit(100)
//!     .loss_limit(100)
//!     .max_hands(200)
//!     .build()
//!     .unwrap();
//! let config = SimulationConfig::new(TableConfig::single_seat(session))
//!     .with_base_seed(42)
//!     .with_workers(WorkerCount::Fixed(2));
//!
//! let output = simulate(&config, 50).unwrap();
//! assert_eq!(output.session_results().len(), 50);
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod output;
pub mod worker;

use config::SimulationConfig;
use errors::SimError;
use executor::ParallelExecutor;
use output::SimulationOutput;

/// Validate `config` and run `num_sessions` sessions.
pub fn simulate(
    config: &SimulationConfig,
    num_sessions: usize,
) -> Result<SimulationOutput, SimError> {
    ParallelExecutor::new(config.clone())?.execute(num_sessions)
}
