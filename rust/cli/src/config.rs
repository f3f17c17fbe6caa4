//! Layered run configuration.
//!
//! Values are resolved in order: built-in defaults, a TOML file (`--config`
//! or `RIDESIM_CONFIG`), environment variables, then command-line flags.
//! Every field remembers which layer set it so `ridesim cfg` can explain the
//! effective configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use ridesim_engine::config::{SessionConfig, TableConfig};
use ridesim_engine::seed::validate_seed;
use ridesim_sim::config::{DEFAULT_MIN_PARALLEL_SESSIONS, SimulationConfig, WorkerCount};
use ridesim_strategy::StrategyConfig;

pub const CONFIG_ENV: &str = "RIDESIM_CONFIG";
pub const SEED_ENV: &str = "RIDESIM_SEED";
pub const WORKERS_ENV: &str = "RIDESIM_WORKERS";
pub const SEATS_ENV: &str = "RIDESIM_SEATS";
pub const STRATEGY_ENV: &str = "RIDESIM_STRATEGY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    /// `None` lets the executor size the pool from the hardware.
    pub workers: Option<usize>,
    pub seats: u8,
    pub bankroll: i64,
    pub base_bet: i64,
    pub bonus_bet: i64,
    pub win_limit: Option<i64>,
    pub loss_limit: Option<i64>,
    pub max_hands: Option<u32>,
    pub stop_on_insufficient_funds: bool,
    pub table_rounds: Option<u64>,
    pub strategy: StrategyConfig,
    pub min_parallel_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            workers: None,
            seats: 1,
            bankroll: 500,
            base_bet: 5,
            bonus_bet: 0,
            win_limit: None,
            loss_limit: None,
            max_hands: Some(200),
            stop_on_insufficient_funds: true,
            table_rounds: None,
            strategy: StrategyConfig::Basic,
            min_parallel_sessions: DEFAULT_MIN_PARALLEL_SESSIONS,
        }
    }
}

impl Config {
    /// Build the validated simulation input. Nothing is clamped.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        let mut session = SessionConfig::builder(self.bankroll, self.base_bet)
            .bonus_bet(self.bonus_bet)
            .stop_on_insufficient_funds(self.stop_on_insufficient_funds);
        if let Some(limit) = self.win_limit {
            session = session.win_limit(limit);
        }
        if let Some(limit) = self.loss_limit {
            session = session.loss_limit(limit);
        }
        if let Some(hands) = self.max_hands {
            session = session.max_hands(hands);
        }
        let session = session.build().map_err(invalid)?;
        let table = TableConfig::new(self.seats, session, self.table_rounds).map_err(invalid)?;

        let workers = match self.workers {
            Some(n) => WorkerCount::Fixed(n),
            None => WorkerCount::Auto,
        };
        let mut sim = SimulationConfig::new(table)
            .with_strategy(self.strategy.clone())
            .with_workers(workers)
            .with_min_parallel_sessions(self.min_parallel_sessions);
        if let Some(seed) = self.seed {
            sim = sim.with_base_seed(validate_seed(seed).map_err(invalid)?);
        }
        sim.validate().map_err(invalid)?;
        Ok(sim)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub workers: ValueSource,
    pub seats: ValueSource,
    pub bankroll: ValueSource,
    pub base_bet: ValueSource,
    pub bonus_bet: ValueSource,
    pub win_limit: ValueSource,
    pub loss_limit: ValueSource,
    pub max_hands: ValueSource,
    pub stop_on_insufficient_funds: ValueSource,
    pub table_rounds: ValueSource,
    pub strategy: ValueSource,
    pub min_parallel_sessions: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            workers: ValueSource::Default,
            seats: ValueSource::Default,
            bankroll: ValueSource::Default,
            base_bet: ValueSource::Default,
            bonus_bet: ValueSource::Default,
            win_limit: ValueSource::Default,
            loss_limit: ValueSource::Default,
            max_hands: ValueSource::Default,
            stop_on_insufficient_funds: ValueSource::Default,
            table_rounds: ValueSource::Default,
            strategy: ValueSource::Default,
            min_parallel_sessions: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub seats: Option<u8>,
    pub bankroll: Option<i64>,
    pub base_bet: Option<i64>,
    pub bonus_bet: Option<i64>,
    pub win_limit: Option<i64>,
    pub loss_limit: Option<i64>,
    pub max_hands: Option<u32>,
    pub table_rounds: Option<u64>,
    pub strategy: Option<String>,
    pub min_parallel_sessions: Option<usize>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

fn invalid(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid(e.to_string())
}

pub fn load_with_sources(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    let path = overrides.config_path.clone().or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    });
    if let Some(path) = path {
        apply_file(&mut cfg, &mut sources, &read_file(&path)?);
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {SEED_ENV}: {seed}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(workers) = std::env::var(WORKERS_ENV)
        && !workers.is_empty()
    {
        cfg.workers = parse_workers(&workers)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid {WORKERS_ENV}: {workers}")))?;
        sources.workers = ValueSource::Env;
    }
    if let Ok(seats) = std::env::var(SEATS_ENV)
        && !seats.is_empty()
    {
        cfg.seats = seats
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {SEATS_ENV}: {seats}")))?;
        sources.seats = ValueSource::Env;
    }
    if let Ok(name) = std::env::var(STRATEGY_ENV)
        && !name.is_empty()
    {
        cfg.strategy = StrategyConfig::from_name(&name).map_err(invalid)?;
        sources.strategy = ValueSource::Env;
    }

    apply_overrides(&mut cfg, &mut sources, overrides)?;

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// `auto` (any case) selects hardware parallelism.
fn parse_workers(s: &str) -> Option<Option<usize>> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("auto") {
        Some(None)
    } else {
        s.parse().ok().map(Some)
    }
}

/// A strategy in the file is either a built-in name or a full table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StrategySetting {
    Name(String),
    Full(StrategyConfig),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    seats: Option<u8>,
    #[serde(default)]
    bankroll: Option<i64>,
    #[serde(default)]
    base_bet: Option<i64>,
    #[serde(default)]
    bonus_bet: Option<i64>,
    #[serde(default)]
    win_limit: Option<i64>,
    #[serde(default)]
    loss_limit: Option<i64>,
    #[serde(default)]
    max_hands: Option<u32>,
    #[serde(default)]
    stop_on_insufficient_funds: Option<bool>,
    #[serde(default)]
    table_rounds: Option<u64>,
    #[serde(default)]
    strategy: Option<StrategySetting>,
    #[serde(default)]
    min_parallel_sessions: Option<usize>,
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let mut file: FileConfig = toml::from_str(&s)?;
    if let Some(StrategySetting::Name(name)) = &file.strategy {
        file.strategy = Some(StrategySetting::Full(
            StrategyConfig::from_name(name).map_err(invalid)?,
        ));
    }
    Ok(file)
}

macro_rules! layer {
    ($cfg:ident, $sources:ident, $source:expr, $value:expr, $field:ident) => {
        if let Some(v) = $value {
            $cfg.$field = v;
            $sources.$field = $source;
        }
    };
    ($cfg:ident, $sources:ident, $source:expr, $value:expr, $field:ident, some) => {
        if let Some(v) = $value {
            $cfg.$field = Some(v);
            $sources.$field = $source;
        }
    };
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: &FileConfig) {
    let src = ValueSource::File;
    layer!(cfg, sources, src, f.seed, seed, some);
    layer!(cfg, sources, src, f.workers, workers, some);
    layer!(cfg, sources, src, f.seats, seats);
    layer!(cfg, sources, src, f.bankroll, bankroll);
    layer!(cfg, sources, src, f.base_bet, base_bet);
    layer!(cfg, sources, src, f.bonus_bet, bonus_bet);
    layer!(cfg, sources, src, f.win_limit, win_limit, some);
    layer!(cfg, sources, src, f.loss_limit, loss_limit, some);
    layer!(cfg, sources, src, f.max_hands, max_hands, some);
    layer!(
        cfg,
        sources,
        src,
        f.stop_on_insufficient_funds,
        stop_on_insufficient_funds
    );
    layer!(cfg, sources, src, f.table_rounds, table_rounds, some);
    layer!(cfg, sources, src, f.min_parallel_sessions, min_parallel_sessions);
    if let Some(StrategySetting::Full(strategy)) = &f.strategy {
        cfg.strategy = strategy.clone();
        sources.strategy = src;
    }
}

fn apply_overrides(
    cfg: &mut Config,
    sources: &mut ConfigSources,
    o: &Overrides,
) -> Result<(), ConfigError> {
    let src = ValueSource::Cli;
    layer!(cfg, sources, src, o.seed, seed, some);
    layer!(cfg, sources, src, o.workers, workers, some);
    layer!(cfg, sources, src, o.seats, seats);
    layer!(cfg, sources, src, o.bankroll, bankroll);
    layer!(cfg, sources, src, o.base_bet, base_bet);
    layer!(cfg, sources, src, o.bonus_bet, bonus_bet);
    layer!(cfg, sources, src, o.win_limit, win_limit, some);
    layer!(cfg, sources, src, o.loss_limit, loss_limit, some);
    layer!(cfg, sources, src, o.max_hands, max_hands, some);
    layer!(cfg, sources, src, o.table_rounds, table_rounds, some);
    layer!(cfg, sources, src, o.min_parallel_sessions, min_parallel_sessions);
    if let Some(name) = &o.strategy {
        cfg.strategy = StrategyConfig::from_name(name).map_err(invalid)?;
        sources.strategy = src;
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.simulation_config()
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
