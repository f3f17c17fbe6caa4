//! # ridesim-strategy: Ride Strategies
//!
//! Closed set of [`Strategy`] implementations for the table engine, selected
//! through a serializable [`StrategyConfig`] so every worker can build its own
//! instance from configuration.
//!
//! ## Core Components
//!
//! - [`StrategyConfig`] - Which strategy to play, as data
//! - [`create_strategy`] - Factory turning a config into a boxed strategy
//! - [`basic`] - Published optimal ride rules
//! - [`simple`] - Always-ride and always-pull bounds
//! - [`rules`] - Configurable rule lists
//!
//! ## Quick Start
//!
//! ```rust
//! use ridesim_strategy::{create_strategy, StrategyConfig};
//!
//! let strategy = create_strategy(&StrategyConfig::Basic);
//! assert_eq!(strategy.name(), "BasicStrategy");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};

pub mod basic;
pub mod draws;
pub mod rules;
pub mod simple;

use rules::{RideRule, RuleBased};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    #[default]
    Basic,
    AlwaysRide,
    AlwaysPull,
    RuleBased {
        #[serde(default)]
        bet_one: Vec<RideRule>,
        #[serde(default)]
        bet_two: Vec<RideRule>,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("unknown strategy '{0}' (expected one of: basic, always_ride, always_pull)")]
    UnknownStrategy(String),
}

impl StrategyConfig {
    /// Parse one of the built-in strategy names. Rule lists can only be given
    /// as structured config.
    pub fn from_name(name: &str) -> Result<Self, StrategyError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(StrategyConfig::Basic),
            "always_ride" => Ok(StrategyConfig::AlwaysRide),
            "always_pull" => Ok(StrategyConfig::AlwaysPull),
            other => Err(StrategyError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Basic => "basic",
            StrategyConfig::AlwaysRide => "always_ride",
            StrategyConfig::AlwaysPull => "always_pull",
            StrategyConfig::RuleBased { .. } => "rule_based",
        }
    }
}

/// Build a fresh strategy instance.
///
/// # Example
///
/// ```rust
/// use ridesim_strategy::{create_strategy, StrategyConfig};
///
/// let ai = create_strategy(&StrategyConfig::AlwaysPull);
/// assert_eq!(ai.name(), "AlwaysPull");
/// ```
pub fn create_strategy(config: &StrategyConfig) -> Box<dyn Strategy> {
    match config {
        StrategyConfig::Basic => Box::new(basic::BasicStrategy::new()),
        StrategyConfig::AlwaysRide => Box::new(simple::AlwaysRide),
        StrategyConfig::AlwaysPull => Box::new(simple::AlwaysPull),
        StrategyConfig::RuleBased { bet_one, bet_two } => {
            Box::new(RuleBased::new(bet_one.clone(), bet_two.clone()))
        }
    }
}
