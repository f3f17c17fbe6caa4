use ridesim_engine::config::{SessionConfig, TableConfig};
use ridesim_engine::result::TableSessionResult;
use ridesim_engine::seed::SeedAuthority;
use ridesim_sim::config::{SimulationConfig, WorkerCount};
use ridesim_sim::executor::ParallelExecutor;
use ridesim_sim::simulate;
use ridesim_strategy::StrategyConfig;

fn reference_config(workers: WorkerCount) -> SimulationConfig {
    let session = SessionConfig::builder(500, 5)
        .win_limit(100)
        .loss_limit(100)
        .max_hands(200)
        .build()
        .unwrap();
    SimulationConfig::new(TableConfig::single_seat(session))
        .with_strategy(StrategyConfig::Basic)
        .with_base_seed(42)
        .with_workers(workers)
        .with_min_parallel_sessions(0)
}

fn tables(workers: WorkerCount, sessions: usize) -> Vec<TableSessionResult> {
    simulate(&reference_config(workers), sessions).unwrap().tables
}

#[test]
fn results_do_not_depend_on_worker_count() {
    let sequential = simulate(&reference_config(WorkerCount::Fixed(1)), 1_000).unwrap();
    assert!(!sequential.parallel);
    assert_eq!(sequential.workers_used, 1);
    assert_eq!(sequential.session_results().len(), 1_000);

    for workers in [2, 4, 8] {
        let parallel = simulate(&reference_config(WorkerCount::Fixed(workers)), 1_000).unwrap();
        assert!(parallel.parallel);
        assert_eq!(parallel.workers_used, workers);
        assert_eq!(
            parallel.tables, sequential.tables,
            "{workers} workers diverged from the sequential run"
        );
    }
}

#[test]
fn each_session_plays_its_derived_seed() {
    let output = simulate(&reference_config(WorkerCount::Fixed(4)), 200).unwrap();
    let seeds = SeedAuthority::new(42)
        .unwrap()
        .derive_session_seeds(200)
        .unwrap();
    for (id, table) in output.tables.iter().enumerate() {
        assert_eq!(table.seed, seeds[&id]);
    }
    assert_eq!(output.base_seed, 42);
}

#[test]
fn small_runs_stay_sequential_below_threshold() {
    let config = reference_config(WorkerCount::Fixed(8)).with_min_parallel_sessions(100);
    let executor = ParallelExecutor::new(config).unwrap();
    assert!(!executor.should_parallelize(99));
    assert!(executor.should_parallelize(100));
    let output = executor.execute(50).unwrap();
    assert!(!output.parallel);
    assert_eq!(output.workers_used, 1);
    assert_eq!(output.tables, tables(WorkerCount::Fixed(1), 50));
}

#[test]
fn checkpoint_resumes_the_seed_sequence() {
    let config = reference_config(WorkerCount::Fixed(2));
    let executor = ParallelExecutor::new(config).unwrap();

    let mut authority = SeedAuthority::new(42).unwrap();
    let first = executor.execute_with(&mut authority, 30, None).unwrap();
    let expected = executor.execute_with(&mut authority, 30, None).unwrap();

    let mut resumed = SeedAuthority::from_state(&first.seed_state).unwrap();
    let second = executor.execute_with(&mut resumed, 30, None).unwrap();
    assert_eq!(second.tables, expected.tables);
    assert_ne!(second.tables, first.tables);
}

#[test]
fn seat_replacement_histories_cover_every_round() {
    let session = SessionConfig::builder(100, 5)
        .max_hands(5)
        .loss_limit(20)
        .build()
        .unwrap();
    let config = SimulationConfig::new(TableConfig::new(6, session, Some(50)).unwrap())
        .with_base_seed(42)
        .with_workers(WorkerCount::Fixed(3))
        .with_min_parallel_sessions(0);
    let output = simulate(&config, 12).unwrap();

    let histories = output.seat_histories();
    assert_eq!(histories.len(), 6);
    for seat in &histories {
        let hands: u64 = seat.iter().map(|s| u64::from(s.hands_played)).sum();
        assert_eq!(hands, 12 * 50);
    }
    let tally = output.tally();
    assert_eq!(tally.hands_played, 6 * 12 * 50);
    assert_eq!(
        tally.sessions,
        tally.wins + tally.losses + tally.pushes
    );
}
