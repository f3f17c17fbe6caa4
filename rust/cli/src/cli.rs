//! Command-line surface, parsed with clap derive.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "ridesim",
    version,
    about = "Deterministic multi-seat Let It Ride session simulator"
)]
pub struct RidesimCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run N table sessions and report the outcome tally
    Sim(SimArgs),
    /// Check generator output quality for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 100_000)]
        samples: usize,
        #[arg(long, default_value_t = 100)]
        buckets: usize,
    },
    /// Show the effective configuration and where each value came from
    Cfg {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// Number of independent table sessions
    #[arg(long, short = 'n')]
    pub sessions: usize,
    /// TOML config file (overrides RIDESIM_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub workers: Option<usize>,
    #[arg(long)]
    pub seats: Option<u8>,
    #[arg(long)]
    pub bankroll: Option<i64>,
    #[arg(long = "bet")]
    pub base_bet: Option<i64>,
    #[arg(long = "bonus")]
    pub bonus_bet: Option<i64>,
    #[arg(long)]
    pub win_limit: Option<i64>,
    #[arg(long)]
    pub loss_limit: Option<i64>,
    #[arg(long)]
    pub max_hands: Option<u32>,
    /// Round budget; enables seat replacement
    #[arg(long)]
    pub table_rounds: Option<u64>,
    /// basic, always_ride or always_pull
    #[arg(long)]
    pub strategy: Option<String>,
    /// Minimum session count before work is spread across threads
    #[arg(long)]
    pub min_parallel: Option<usize>,
    /// Write one JSON record per table session
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Save the seed authority state after the run
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,
    /// Continue the seed sequence from a saved checkpoint
    #[arg(long)]
    pub resume: Option<PathBuf>,
    /// Report each worker as it finishes
    #[arg(long)]
    pub progress: bool,
}

impl SimArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            seed: self.seed,
            workers: self.workers,
            seats: self.seats,
            bankroll: self.bankroll,
            base_bet: self.base_bet,
            bonus_bet: self.bonus_bet,
            win_limit: self.win_limit,
            loss_limit: self.loss_limit,
            max_hands: self.max_hands,
            table_rounds: self.table_rounds,
            strategy: self.strategy.clone(),
            min_parallel_sessions: self.min_parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_flags_map_onto_overrides() {
        let cli = RidesimCli::try_parse_from([
            "ridesim",
            "sim",
            "-n",
            "10",
            "--seed",
            "42",
            "--bet",
            "10",
            "--table-rounds",
            "50",
            "--strategy",
            "always_pull",
        ])
        .unwrap();
        let Commands::Sim(args) = cli.cmd else {
            panic!("expected sim");
        };
        assert_eq!(args.sessions, 10);
        let o = args.overrides();
        assert_eq!(o.seed, Some(42));
        assert_eq!(o.base_bet, Some(10));
        assert_eq!(o.table_rounds, Some(50));
        assert_eq!(o.strategy.as_deref(), Some("always_pull"));
        assert_eq!(o.workers, None);
    }

    #[test]
    fn rng_defaults() {
        let cli = RidesimCli::try_parse_from(["ridesim", "rng"]).unwrap();
        match cli.cmd {
            Commands::Rng {
                seed,
                samples,
                buckets,
            } => {
                assert_eq!(seed, None);
                assert_eq!(samples, 100_000);
                assert_eq!(buckets, 100);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sessions_is_required() {
        assert!(RidesimCli::try_parse_from(["ridesim", "sim"]).is_err());
    }
}
