//! Messages exchanged with workers and the per-worker session loop.
//!
//! Tasks and results are plain owned values: a worker gets its own copy of
//! the configuration and its own seed slice, and hands back everything it
//! produced. Nothing is shared while the worker runs.

use std::any::Any;
use std::ops::Range;

use tracing::debug;

use ridesim_engine::result::TableSessionResult;
use ridesim_engine::seed::{Seed, SessionId};
use ridesim_engine::table::TableSession;
use ridesim_strategy::create_strategy;

use crate::config::SimulationConfig;

#[derive(Debug, Clone)]
pub struct WorkerTask {
    pub worker_id: usize,
    pub range: Range<SessionId>,
    pub seeds: Vec<(SessionId, Seed)>,
    pub config: SimulationConfig,
}

#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub range: Range<SessionId>,
    pub sessions: Vec<(SessionId, TableSessionResult)>,
    pub failure: Option<String>,
}

impl WorkerResult {
    pub fn failed(task: &WorkerTask, message: impl Into<String>) -> Self {
        Self {
            worker_id: task.worker_id,
            range: task.range.clone(),
            sessions: Vec::new(),
            failure: Some(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Play every session of `task` in id order with a strategy built for this
/// worker alone.
pub fn run_worker(task: WorkerTask) -> WorkerResult {
    let strategy = create_strategy(&task.config.strategy);
    let mut sessions = Vec::with_capacity(task.seeds.len());
    for &(id, seed) in &task.seeds {
        match TableSession::new(&task.config.table, strategy.as_ref(), seed).run_to_completion() {
            Ok(result) => sessions.push((id, result)),
            Err(e) => return WorkerResult::failed(&task, format!("session {id}: {e}")),
        }
    }
    debug!(
        worker = task.worker_id,
        sessions = sessions.len(),
        "worker finished"
    );
    WorkerResult {
        worker_id: task.worker_id,
        range: task.range,
        sessions,
        failure: None,
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
