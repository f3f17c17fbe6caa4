//! Random number generator quality command.
//!
//! Runs the uniformity (chi-square) and independence (runs) checks on the
//! ChaCha20 stream a given seed produces. A pass only means the generator is
//! not obviously broken; it is not a cryptographic assessment.

use crate::error::CliError;
use crate::ui;
use ridesim_engine::quality::validate_quality;
use ridesim_engine::seed::{create_generator, secure_seed, validate_seed};
use std::io::Write;

/// Handle the rng command.
///
/// Draws `samples` values from the generator for `seed` (or a fresh seed from
/// OS entropy) and prints the report.
///
/// # Errors
///
/// `CliError::InvalidInput` for an out-of-range seed, sample size or bucket
/// count; `CliError::Engine` if the generator fails either check.
pub fn handle_rng_command(
    seed: Option<u64>,
    samples: usize,
    buckets: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = match seed {
        Some(s) => validate_seed(s)?,
        None => secure_seed()?,
    };
    let mut rng = create_generator(seed);
    let report = validate_quality(&mut rng, samples, buckets)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Samples: {}  Buckets: {}", report.sample_size, report.buckets)?;
    writeln!(
        out,
        "Uniformity (chi-square): statistic {:.3}, p-value {:.4} {}",
        report.uniformity.statistic,
        report.uniformity.p_value,
        ui::pass_fail(report.uniformity.passed)
    )?;
    writeln!(
        out,
        "Independence (runs): z {:.3}, p-value {:.4} {}",
        report.independence.statistic,
        report.independence.p_value,
        ui::pass_fail(report.independence.passed)
    )?;
    writeln!(out, "Overall: {}", ui::pass_fail(report.passed()))?;

    if report.passed() {
        Ok(())
    } else {
        Err(CliError::Engine(format!(
            "generator for seed {} failed the quality check",
            seed
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(seed: u64) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = handle_rng_command(Some(seed), 10_000, 20, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rng_command_reports_both_checks() {
        let (_, text) = output(42);
        assert!(text.starts_with("Seed: 42\n"));
        assert!(text.contains("Samples: 10000  Buckets: 20"));
        assert!(text.contains("Uniformity (chi-square)"));
        assert!(text.contains("Independence (runs)"));
        assert!(text.contains("Overall: "));
    }

    #[test]
    fn test_rng_command_produces_deterministic_output() {
        let (_, first) = output(7);
        let (_, second) = output(7);
        assert_eq!(first, second, "Same seed should produce same output");
    }

    #[test]
    fn test_rng_command_rejects_bad_input() {
        let mut out = Vec::new();
        let result = handle_rng_command(Some(1 << 40), 10_000, 20, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let result = handle_rng_command(Some(1), 10, 20, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rng_command_without_seed() {
        let mut out = Vec::new();
        let _ = handle_rng_command(None, 5_000, 10, &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Seed: "));
    }
}
