//! Simulation command handler.
//!
//! Resolves the layered configuration, runs the requested number of table
//! sessions through the parallel executor and prints an outcome tally.
//!
//! With `--output` every table session is written as one JSON line, preceded
//! by a summary header record:
//!
//! ```text
//! {"type":"summary","generated_at":"2026-01-05T10:00:00+00:00","base_seed":42,...}
//! {"type":"session","session_id":0,"seed":1817236409,"mode":"classic",...}
//! ```
//!
//! `--checkpoint` saves the seed authority state after the run; passing that
//! file to `--resume` continues the seed sequence exactly where it stopped.

use crate::cli::SimArgs;
use crate::config;
use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, read_json, write_json};
use crate::ui;
use ridesim_engine::result::TableSessionResult;
use ridesim_engine::seed::SeedAuthority;
use ridesim_sim::executor::{ParallelExecutor, WorkerProgress};
use ridesim_sim::output::{OutcomeTally, SimulationOutput};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct SummaryRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    generated_at: String,
    base_seed: u32,
    sessions: usize,
    seats: usize,
    table_rounds: Option<u64>,
    strategy: &'static str,
    workers_used: usize,
    parallel: bool,
    tally: OutcomeTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    resumed_from: Option<&'a str>,
}

#[derive(Serialize)]
struct SessionRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    session_id: usize,
    #[serde(flatten)]
    table: &'a TableSessionResult,
}

/// Handle the sim command.
///
/// # Errors
///
/// - `CliError::InvalidInput` for zero sessions or an unreadable checkpoint
/// - `CliError::Config` for an invalid configuration
/// - `CliError::Engine` when a worker fails or the merge is incomplete
/// - `CliError::Io` when an output file cannot be written
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.sessions == 0 {
        ui::write_error(err, "sessions must be >= 1")?;
        return Err(CliError::InvalidInput("sessions must be >= 1".to_string()));
    }

    let resolved = config::load_with_sources(&args.overrides())
        .map_err(|e| CliError::Config(e.to_string()))?;
    let sim_config = resolved
        .config
        .simulation_config()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let executor = ParallelExecutor::new(sim_config)?;

    let mut authority = match &args.resume {
        Some(path) => {
            let state = read_json(path).map_err(CliError::InvalidInput)?;
            let authority = SeedAuthority::from_state(&state)?;
            if let Some(seed) = executor.config().base_seed
                && seed != authority.base_seed()
            {
                ui::display_warning(
                    err,
                    &format!(
                        "seed {} ignored; continuing checkpoint with seed {}",
                        seed,
                        authority.base_seed()
                    ),
                )?;
            }
            writeln!(
                out,
                "Resumed seed sequence after {} session(s)",
                authority.sessions_derived()
            )?;
            authority
        }
        None => match executor.config().base_seed {
            Some(seed) => SeedAuthority::new(seed)?,
            None => SeedAuthority::from_entropy()?,
        },
    };

    let output = {
        let mut report = |p: WorkerProgress| {
            // progress is advisory; a closed stderr must not fail the run
            let _ = writeln!(
                err,
                "worker {} finished: {} session(s){} [{}/{}]",
                p.worker_id,
                p.sessions_completed,
                if p.failed { " FAILED" } else { "" },
                p.workers_finished,
                p.workers_total
            );
        };
        let progress: Option<&mut dyn FnMut(WorkerProgress)> = if args.progress {
            Some(&mut report)
        } else {
            None
        };
        executor.execute_with(&mut authority, args.sessions, progress)?
    };
    let tally = output.tally();

    if let Some(path) = &args.output {
        let resumed_from = args.resume.as_deref().and_then(Path::to_str);
        write_records(path, &output, args.sessions, &executor, resumed_from)?;
        info!(path = %path.display(), records = output.tables.len(), "wrote session records");
    }
    if let Some(path) = &args.checkpoint {
        write_json(path, &output.seed_state).map_err(io_failure)?;
    }

    writeln!(
        out,
        "Simulated {} table session(s) with seed {} ({} worker(s), {})",
        output.tables.len(),
        output.base_seed,
        output.workers_used,
        if output.parallel { "parallel" } else { "sequential" }
    )?;
    ui::write_tally(out, &tally)?;
    if let Some(path) = &args.output {
        writeln!(out, "Wrote {} record(s) to {}", output.tables.len(), path.display())?;
    }
    if let Some(path) = &args.checkpoint {
        writeln!(out, "Checkpoint saved to {}", path.display())?;
    }
    Ok(())
}

fn io_failure(msg: String) -> CliError {
    CliError::Io(std::io::Error::other(msg))
}

fn write_records(
    path: &Path,
    output: &SimulationOutput,
    sessions: usize,
    executor: &ParallelExecutor,
    resumed_from: Option<&str>,
) -> Result<(), CliError> {
    ensure_parent_dir(path).map_err(io_failure)?;
    let mut writer = BufWriter::new(File::create(path)?);

    let config = executor.config();
    let summary = SummaryRecord {
        kind: "summary",
        generated_at: chrono::Utc::now().to_rfc3339(),
        base_seed: output.base_seed,
        sessions,
        seats: config.table.seats(),
        table_rounds: config.table.table_rounds(),
        strategy: config.strategy.name(),
        workers_used: output.workers_used,
        parallel: output.parallel,
        tally: output.tally(),
        resumed_from,
    };
    serde_json::to_writer(&mut writer, &summary).map_err(std::io::Error::other)?;
    writeln!(writer)?;

    for (session_id, table) in output.tables.iter().enumerate() {
        let record = SessionRecord {
            kind: "session",
            session_id,
            table,
        };
        serde_json::to_writer(&mut writer, &record).map_err(std::io::Error::other)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
