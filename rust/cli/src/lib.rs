//! # ridesim CLI Library
//!
//! Command-line front end for the ridesim Let It Ride session simulator.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the matching subcommand against the given output
//! streams. The binary only adds logging setup and the process exit.
//!
//! ## Available Subcommands
//!
//! - `sim`: Run N table sessions, optionally writing JSONL records and a seed checkpoint
//! - `rng`: Check generator output quality for a seed
//! - `cfg`: Display the effective configuration and the source of each value

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, RidesimCli};
use commands::{handle_cfg_command, handle_rng_command, handle_sim_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] or
/// [`exit_code::ERROR`].
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["ridesim", "sim", "--sessions", "5", "--seed", "42", "--workers", "1"];
/// let code = ridesim_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "rng", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = RidesimCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "ridesim: Let It Ride session simulator").is_err()
                        || writeln!(err, "Usage: ridesim <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    let _ = writeln!(err, "\nFor full help, run: ridesim --help");
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Sim(args) => handle_sim_command(&args, out, err),
                Commands::Rng {
                    seed,
                    samples,
                    buckets,
                } => handle_rng_command(seed, samples, buckets, out),
                Commands::Cfg { config } => handle_cfg_command(config, out, err),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    let _ = writeln!(err, "Error: {}", e);
                    exit_code::ERROR
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, err) = run_args(&["ridesim", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("sim"));
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, out, err) = run_args(&["ridesim", "deal"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.contains("Commands:"));
        assert!(err.contains("  rng"));
    }

    #[test]
    fn zero_sessions_is_rejected() {
        let (code, _, err) = run_args(&["ridesim", "sim", "--sessions", "0"]);
        assert_eq!(code, 2);
        assert!(err.contains("sessions must be >= 1"));
    }
}
