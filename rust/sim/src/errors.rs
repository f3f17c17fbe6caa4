use std::fmt;
use std::ops::Range;

use thiserror::Error;

use ridesim_engine::errors::{ConfigError, EngineError, SeedError};
use ridesim_engine::seed::SessionId;

/// One worker that did not deliver its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    pub worker_id: usize,
    pub sessions: Range<SessionId>,
    pub message: String,
}

impl fmt::Display for WorkerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "worker {} (sessions {}..{}): {}",
            self.worker_id, self.sessions.start, self.sessions.end, self.message
        )
    }
}

fn list_failures(failures: &[WorkerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("worker count must be between 1 and {max}, got {requested}")]
    InvalidWorkerCount { requested: usize, max: usize },
    #[error("{} worker(s) failed: {}", .0.len(), list_failures(.0))]
    WorkerFailures(Vec<WorkerFailure>),
    #[error("{count} session(s) produced no result (first missing id {first})")]
    MissingSessions { count: usize, first: SessionId },
    #[error("session {0} was reported more than once")]
    DuplicateSession(SessionId),
    #[error("session {id} is outside the requested range 0..{total}")]
    UnexpectedSession { id: SessionId, total: usize },
}
