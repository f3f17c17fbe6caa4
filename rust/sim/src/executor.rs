//! Partition, run and merge.
//!
//! Seeds are derived up front in session-id order, split into contiguous
//! batches and played on scoped OS threads. Workers report back over a
//! channel as they finish; the merge then puts every table back at its
//! session id. Because the seed of a session never depends on which worker
//! plays it, the merged output is the same for any worker count.

use std::collections::BTreeMap;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, warn};

use ridesim_engine::result::TableSessionResult;
use ridesim_engine::seed::{Seed, SeedAuthority, SessionId};

use crate::config::SimulationConfig;
use crate::errors::{SimError, WorkerFailure};
use crate::output::SimulationOutput;
use crate::worker::{panic_message, run_worker, WorkerResult, WorkerTask};

/// Reported once per worker as it finishes, in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerProgress {
    pub worker_id: usize,
    pub sessions_completed: usize,
    pub failed: bool,
    pub workers_finished: usize,
    pub workers_total: usize,
}

pub fn should_parallelize(num_sessions: usize, worker_count: usize, threshold: usize) -> bool {
    worker_count > 1 && num_sessions >= threshold
}

/// Contiguous ranges of `ceil(n / w)` ids covering `0..n`; never empty.
pub fn partition_ranges(num_sessions: usize, worker_count: usize) -> Vec<Range<SessionId>> {
    if num_sessions == 0 {
        return Vec::new();
    }
    let workers = worker_count.clamp(1, num_sessions);
    let chunk = num_sessions.div_ceil(workers);
    (0..workers)
        .map(|w| w * chunk)
        .take_while(|&start| start < num_sessions)
        .map(|start| start..(start + chunk).min(num_sessions))
        .collect()
}

pub struct ParallelExecutor {
    config: SimulationConfig,
    workers: usize,
}

impl ParallelExecutor {
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        let workers = config.validate()?;
        Ok(Self { config, workers })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Resolved worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn should_parallelize(&self, num_sessions: usize) -> bool {
        should_parallelize(
            num_sessions,
            self.workers,
            self.config.min_parallel_sessions,
        )
    }

    pub fn partition(
        &self,
        seeds: &BTreeMap<SessionId, Seed>,
        worker_count: usize,
    ) -> Vec<WorkerTask> {
        partition_ranges(seeds.len(), worker_count)
            .into_iter()
            .enumerate()
            .map(|(worker_id, range)| WorkerTask {
                worker_id,
                seeds: seeds
                    .range(range.clone())
                    .map(|(&id, &seed)| (id, seed))
                    .collect(),
                range,
                config: self.config.clone(),
            })
            .collect()
    }

    /// Run each task on its own thread. Results come back sorted by worker id.
    pub fn run(
        &self,
        tasks: Vec<WorkerTask>,
        progress: Option<&mut dyn FnMut(WorkerProgress)>,
    ) -> Vec<WorkerResult> {
        run_tasks(tasks, run_worker, progress)
    }

    /// Place every table at its session id.
    ///
    /// Any failed worker fails the whole merge, listing every failure. Ids
    /// outside `0..num_sessions`, ids seen twice and ids never seen are
    /// rejected.
    pub fn merge(
        results: Vec<WorkerResult>,
        num_sessions: usize,
    ) -> Result<Vec<TableSessionResult>, SimError> {
        let failures: Vec<WorkerFailure> = results
            .iter()
            .filter_map(|r| {
                r.failure.as_ref().map(|message| WorkerFailure {
                    worker_id: r.worker_id,
                    sessions: r.range.clone(),
                    message: message.clone(),
                })
            })
            .collect();
        if !failures.is_empty() {
            return Err(SimError::WorkerFailures(failures));
        }

        let mut slots: Vec<Option<TableSessionResult>> = Vec::new();
        slots.resize_with(num_sessions, || None);
        for result in results {
            for (id, table) in result.sessions {
                let slot = slots.get_mut(id).ok_or(SimError::UnexpectedSession {
                    id,
                    total: num_sessions,
                })?;
                if slot.is_some() {
                    return Err(SimError::DuplicateSession(id));
                }
                *slot = Some(table);
            }
        }

        let missing: Vec<SessionId> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(id, _)| id)
            .collect();
        if let Some(&first) = missing.first() {
            return Err(SimError::MissingSessions {
                count: missing.len(),
                first,
            });
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Derive seeds from the configured base seed (or OS entropy), play and
    /// merge.
    pub fn execute(&self, num_sessions: usize) -> Result<SimulationOutput, SimError> {
        let mut authority = match self.config.base_seed {
            Some(seed) => SeedAuthority::new(seed)?,
            None => SeedAuthority::from_entropy()?,
        };
        self.execute_with(&mut authority, num_sessions, None)
    }

    /// Full pipeline against a caller-owned authority, so a run can continue
    /// from an imported checkpoint.
    pub fn execute_with(
        &self,
        authority: &mut SeedAuthority,
        num_sessions: usize,
        progress: Option<&mut dyn FnMut(WorkerProgress)>,
    ) -> Result<SimulationOutput, SimError> {
        let seeds = authority.derive_session_seeds(num_sessions)?;
        let parallel = self.should_parallelize(num_sessions);
        let worker_count = if parallel { self.workers } else { 1 };
        let tasks = self.partition(&seeds, worker_count);
        info!(
            base_seed = authority.base_seed(),
            sessions = num_sessions,
            seats = self.config.table.seats(),
            workers = tasks.len(),
            parallel,
            "starting simulation"
        );
        for task in &tasks {
            debug!(
                worker = task.worker_id,
                start = task.range.start,
                end = task.range.end,
                "partitioned"
            );
        }

        let workers_used = tasks.len();
        let results = if parallel {
            self.run(tasks, progress)
        } else {
            run_inline(tasks, progress)
        };
        let tables = Self::merge(results, num_sessions)?;
        info!(tables = tables.len(), "simulation finished");

        Ok(SimulationOutput {
            base_seed: authority.base_seed(),
            workers_used,
            parallel,
            tables,
            seed_state: authority.export_state(),
        })
    }
}

fn guarded<F>(worker: &F, task: WorkerTask) -> WorkerResult
where
    F: Fn(WorkerTask) -> WorkerResult,
{
    let fallback = WorkerResult::failed(&task, "");
    match panic::catch_unwind(AssertUnwindSafe(|| worker(task))) {
        Ok(result) => result,
        Err(payload) => WorkerResult {
            failure: Some(panic_message(payload.as_ref())),
            ..fallback
        },
    }
}

fn report(
    progress: &mut Option<&mut dyn FnMut(WorkerProgress)>,
    result: &WorkerResult,
    finished: usize,
    total: usize,
) {
    if let Some(message) = &result.failure {
        warn!(worker = result.worker_id, %message, "worker failed");
    }
    if let Some(callback) = progress.as_deref_mut() {
        callback(WorkerProgress {
            worker_id: result.worker_id,
            sessions_completed: result.sessions.len(),
            failed: result.is_failure(),
            workers_finished: finished,
            workers_total: total,
        });
    }
}

fn run_inline(
    tasks: Vec<WorkerTask>,
    mut progress: Option<&mut dyn FnMut(WorkerProgress)>,
) -> Vec<WorkerResult> {
    let total = tasks.len();
    tasks
        .into_iter()
        .enumerate()
        .map(|(i, task)| {
            let result = guarded(&run_worker, task);
            report(&mut progress, &result, i + 1, total);
            result
        })
        .collect()
}

/// Scoped-thread fan-out shared by [`ParallelExecutor::run`] and tests that
/// need to inject a misbehaving worker.
pub(crate) fn run_tasks<F>(
    tasks: Vec<WorkerTask>,
    worker: F,
    mut progress: Option<&mut dyn FnMut(WorkerProgress)>,
) -> Vec<WorkerResult>
where
    F: Fn(WorkerTask) -> WorkerResult + Sync,
{
    let total = tasks.len();
    let (tx, rx) = mpsc::channel();
    let mut results = Vec::with_capacity(total);

    thread::scope(|scope| {
        let worker = &worker;
        for task in tasks {
            let tx = tx.clone();
            scope.spawn(move || {
                // the receiver outlives every worker
                let _ = tx.send(guarded(worker, task));
            });
        }
        drop(tx);
        for result in rx {
            report(&mut progress, &result, results.len() + 1, total);
            results.push(result);
        }
    });

    results.sort_by_key(|r| r.worker_id);
    results
}
