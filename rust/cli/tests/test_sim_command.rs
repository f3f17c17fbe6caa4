use std::fs;
use std::path::Path;
use std::process::Command;

use ridesim_engine::seed::SeedAuthority;
use serde_json::Value;
use serial_test::serial;

fn clear_env() {
    for key in [
        "RIDESIM_CONFIG",
        "RIDESIM_SEED",
        "RIDESIM_WORKERS",
        "RIDESIM_SEATS",
        "RIDESIM_STRATEGY",
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["ridesim"];
    argv.extend_from_slice(args);
    let code = ridesim_cli::run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn records(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn session_seeds(records: &[Value]) -> Vec<u64> {
    records[1..]
        .iter()
        .map(|r| r["seed"].as_u64().unwrap())
        .collect()
}

#[test]
#[serial]
fn sim_writes_summary_then_one_record_per_session() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("sessions.jsonl");
    let path_str = path.to_string_lossy().into_owned();

    let (code, out, err) = run(&[
        "sim", "--sessions", "25", "--seed", "42", "--workers", "1", "--output", &path_str,
    ]);
    assert_eq!(code, 0, "stderr={err}");
    assert!(out.contains("Simulated 25 table session(s) with seed 42"));
    assert!(out.contains("Sessions: 25"));

    let recs = records(&path);
    assert_eq!(recs.len(), 26);
    let summary = &recs[0];
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["base_seed"], 42);
    assert_eq!(summary["sessions"], 25);
    assert_eq!(summary["strategy"], "basic");
    assert!(summary["generated_at"].as_str().unwrap().contains('T'));
    assert_eq!(summary["tally"]["sessions"], 25);

    for (id, rec) in recs[1..].iter().enumerate() {
        assert_eq!(rec["type"], "session");
        assert_eq!(rec["session_id"].as_u64(), Some(id as u64));
        assert_eq!(rec["mode"], "classic");
        assert_eq!(rec["seats"].as_array().unwrap().len(), 1);
    }

    let expected: Vec<u64> = SeedAuthority::new(42)
        .unwrap()
        .derive_session_seeds(25)
        .unwrap()
        .values()
        .map(|&s| u64::from(s))
        .collect();
    assert_eq!(session_seeds(&recs), expected);
}

#[test]
#[serial]
fn worker_count_does_not_change_records() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let seq = dir.path().join("seq.jsonl");
    let par = dir.path().join("par.jsonl");
    let seq_str = seq.to_string_lossy().into_owned();
    let par_str = par.to_string_lossy().into_owned();

    let base = ["sim", "--sessions", "40", "--seed", "7", "--seats", "3"];
    let mut a = base.to_vec();
    a.extend(["--workers", "1", "--output", &seq_str]);
    let mut b = base.to_vec();
    b.extend(["--workers", "4", "--min-parallel", "0", "--progress", "--output", &par_str]);

    assert_eq!(run(&a).0, 0);
    let (code, out, err) = run(&b);
    assert_eq!(code, 0, "stderr={err}");
    assert!(out.contains("4 worker(s), parallel"));
    assert_eq!(err.matches("worker ").count(), 4, "stderr={err}");

    let seq = records(&seq);
    let par = records(&par);
    assert_eq!(seq[1..], par[1..]);
    assert_eq!(seq[0]["tally"], par[0]["tally"]);
}

#[test]
#[serial]
fn checkpoint_then_resume_continues_seed_sequence() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("ckpt.json");
    let out_path = dir.path().join("second.jsonl");
    let ckpt_str = ckpt.to_string_lossy().into_owned();
    let out_str = out_path.to_string_lossy().into_owned();

    let (code, out, _) = run(&[
        "sim", "--sessions", "10", "--seed", "99", "--workers", "1", "--checkpoint", &ckpt_str,
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Checkpoint saved to"));

    let state: Value = serde_json::from_str(&fs::read_to_string(&ckpt).unwrap()).unwrap();
    assert_eq!(state["base_seed"], 99);
    assert_eq!(state["sessions_derived"], 10);

    let (code, out, err) = run(&[
        "sim", "--sessions", "10", "--workers", "1", "--resume", &ckpt_str, "--output", &out_str,
    ]);
    assert_eq!(code, 0, "stderr={err}");
    assert!(out.contains("Resumed seed sequence after 10 session(s)"));

    let mut authority = SeedAuthority::new(99).unwrap();
    authority.derive_session_seeds(10).unwrap();
    let expected: Vec<u64> = authority
        .derive_session_seeds(10)
        .unwrap()
        .values()
        .map(|&s| u64::from(s))
        .collect();
    let recs = records(&out_path);
    assert_eq!(session_seeds(&recs), expected);
    assert_eq!(recs[0]["resumed_from"].as_str(), Some(ckpt_str.as_str()));
}

#[test]
#[serial]
fn corrupt_checkpoint_is_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("bad.json");
    fs::write(&ckpt, r#"{"version": 1, "sessions_derived": 3}"#).unwrap();
    let ckpt_str = ckpt.to_string_lossy().into_owned();

    let (code, out, err) = run(&["sim", "--sessions", "5", "--resume", &ckpt_str]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("base_seed"), "stderr={err}");
}

#[test]
#[serial]
fn seat_replacement_tables_report_every_seat() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replace.jsonl");
    let path_str = path.to_string_lossy().into_owned();

    let (code, _, err) = run(&[
        "sim",
        "--sessions",
        "4",
        "--seed",
        "42",
        "--seats",
        "6",
        "--max-hands",
        "5",
        "--loss-limit",
        "20",
        "--table-rounds",
        "50",
        "--output",
        &path_str,
    ]);
    assert_eq!(code, 0, "stderr={err}");

    let recs = records(&path);
    assert_eq!(recs[0]["table_rounds"], 50);
    for rec in &recs[1..] {
        assert_eq!(rec["rounds_played"], 50);
        for seat in rec["seats"].as_array().unwrap() {
            let hands: u64 = seat["sessions"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["hands_played"].as_u64().unwrap())
                .sum();
            assert_eq!(hands, 50);
        }
    }
}

#[test]
#[serial]
fn invalid_configuration_exits_with_error() {
    clear_env();
    let (code, out, err) = run(&["sim", "--sessions", "5", "--seats", "9"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Configuration error"), "stderr={err}");

    let (code, _, err) = run(&["sim", "--sessions", "5", "--strategy", "martingale"]);
    assert_eq!(code, 2);
    assert!(err.contains("unknown strategy 'martingale'"), "stderr={err}");

    let (code, out, err) = run(&[
        "sim",
        "--sessions",
        "5",
        "--bankroll",
        "1000000000000",
        "--bet",
        "4611686018427387903",
    ]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("base_bet must be at most"), "stderr={err}");
}

#[test]
#[serial]
fn environment_seed_feeds_sim_and_cfg() {
    clear_env();
    unsafe {
        std::env::set_var("RIDESIM_SEED", "1234");
    }
    let (code, out, _) = run(&["sim", "--sessions", "3", "--workers", "1"]);
    let (cfg_code, cfg_out, _) = run(&["cfg"]);
    clear_env();

    assert_eq!(code, 0);
    assert!(out.contains("with seed 1234"));
    assert_eq!(cfg_code, 0);
    let json: Value = serde_json::from_str(&cfg_out).unwrap();
    assert_eq!(json["seed"]["value"], 1234);
    assert_eq!(json["seed"]["source"], "env");
}

#[test]
#[serial]
fn binary_runs_rng_report() {
    clear_env();
    let output = Command::new(env!("CARGO_BIN_EXE_ridesim"))
        .args(["rng", "--seed", "42", "--samples", "10000", "--buckets", "20"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Seed: 42"));
    assert!(stdout.contains("Overall: "));
    let code = output.status.code().unwrap();
    assert!(code == 0 || code == 2);
}
