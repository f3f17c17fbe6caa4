//! Session and table configuration.
//!
//! Both types are immutable once built and can only be obtained through a
//! validating constructor. Deserialization goes through the same validation
//! (`serde(try_from)`), so a config read from disk or shipped to a worker can
//! never bypass the checks.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Largest table geometry supported by the shared-deck deal.
pub const MAX_SEATS: u8 = 6;

/// Ceiling for every configured amount. Keeps a round's outlay and its
/// largest payout (a royal flush on three riding bets) well inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Per-seat session parameters. Money is in whole betting units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    starting_bankroll: i64,
    base_bet: i64,
    win_limit: Option<i64>,
    loss_limit: Option<i64>,
    max_hands: Option<u32>,
    bonus_bet: i64,
    stop_on_insufficient_funds: bool,
}

impl SessionConfig {
    /// Start a builder with the two mandatory amounts.
    ///
    /// ```
    /// use ridesim_engine::config::SessionConfig;
    ///
    /// let cfg = SessionConfig::builder(500, 5)
    ///     .win_limit(100)
    ///     .loss_limit(100)
    ///     .max_hands(200)
    ///     .build()
    ///     .expect("valid config");
    /// assert_eq!(cfg.round_outlay(), 15);
    /// ```
    pub fn builder(starting_bankroll: i64, base_bet: i64) -> SessionConfigBuilder {
        SessionConfigBuilder {
            raw: RawSessionConfig {
                starting_bankroll,
                base_bet,
                win_limit: None,
                loss_limit: None,
                max_hands: None,
                bonus_bet: 0,
                stop_on_insufficient_funds: true,
            },
        }
    }

    pub fn starting_bankroll(&self) -> i64 {
        self.starting_bankroll
    }
    pub fn base_bet(&self) -> i64 {
        self.base_bet
    }
    pub fn win_limit(&self) -> Option<i64> {
        self.win_limit
    }
    pub fn loss_limit(&self) -> Option<i64> {
        self.loss_limit
    }
    pub fn max_hands(&self) -> Option<u32> {
        self.max_hands
    }
    pub fn bonus_bet(&self) -> i64 {
        self.bonus_bet
    }
    pub fn stop_on_insufficient_funds(&self) -> bool {
        self.stop_on_insufficient_funds
    }

    /// Amount a seat must put up before any decision: three equal main bets
    /// plus the bonus.
    pub fn round_outlay(&self) -> i64 {
        3 * self.base_bet + self.bonus_bet
    }
}

pub struct SessionConfigBuilder {
    raw: RawSessionConfig,
}

impl SessionConfigBuilder {
    pub fn win_limit(mut self, limit: i64) -> Self {
        self.raw.win_limit = Some(limit);
        self
    }
    pub fn loss_limit(mut self, limit: i64) -> Self {
        self.raw.loss_limit = Some(limit);
        self
    }
    pub fn max_hands(mut self, hands: u32) -> Self {
        self.raw.max_hands = Some(hands);
        self
    }
    pub fn bonus_bet(mut self, amount: i64) -> Self {
        self.raw.bonus_bet = amount;
        self
    }
    pub fn stop_on_insufficient_funds(mut self, stop: bool) -> Self {
        self.raw.stop_on_insufficient_funds = stop;
        self
    }

    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::try_from(self.raw)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawSessionConfig {
    starting_bankroll: i64,
    base_bet: i64,
    #[serde(default)]
    win_limit: Option<i64>,
    #[serde(default)]
    loss_limit: Option<i64>,
    #[serde(default)]
    max_hands: Option<u32>,
    #[serde(default)]
    bonus_bet: i64,
    #[serde(default = "default_stop_on_insufficient_funds")]
    stop_on_insufficient_funds: bool,
}

fn default_stop_on_insufficient_funds() -> bool {
    true
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        positive("starting_bankroll", raw.starting_bankroll)?;
        positive("base_bet", raw.base_bet)?;
        if let Some(v) = raw.win_limit {
            positive("win_limit", v)?;
        }
        if let Some(v) = raw.loss_limit {
            positive("loss_limit", v)?;
        }
        if raw.max_hands == Some(0) {
            return Err(ConfigError::NotPositive {
                field: "max_hands",
                value: 0,
            });
        }
        if raw.bonus_bet < 0 {
            return Err(ConfigError::NegativeBonus(raw.bonus_bet));
        }
        within_cap("bonus_bet", raw.bonus_bet)?;
        if raw.win_limit.is_none() && raw.loss_limit.is_none() && raw.max_hands.is_none() {
            return Err(ConfigError::NoStopCondition);
        }
        if !raw.stop_on_insufficient_funds && raw.loss_limit.is_none() && raw.max_hands.is_none()
        {
            return Err(ConfigError::UnboundedCredit);
        }
        let required = 3 * raw.base_bet + raw.bonus_bet;
        if raw.starting_bankroll < required {
            return Err(ConfigError::BankrollTooSmall {
                bankroll: raw.starting_bankroll,
                required,
            });
        }
        Ok(Self {
            starting_bankroll: raw.starting_bankroll,
            base_bet: raw.base_bet,
            win_limit: raw.win_limit,
            loss_limit: raw.loss_limit,
            max_hands: raw.max_hands,
            bonus_bet: raw.bonus_bet,
            stop_on_insufficient_funds: raw.stop_on_insufficient_funds,
        })
    }
}

fn positive(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    within_cap(field, value)
}

fn within_cap(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value > MAX_AMOUNT {
        return Err(ConfigError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// How a table ends and what happens to a seat when its session stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableMode {
    /// Every seat plays until its own stop condition; stopped seats sit out.
    Classic,
    /// Stopped seats are refilled with a fresh bankroll until the table has
    /// played its round budget.
    SeatReplacement { table_rounds: u64 },
}

/// Table geometry plus the session parameters every seat plays with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableConfig")]
pub struct TableConfig {
    seats: u8,
    session: SessionConfig,
    table_rounds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTableConfig {
    #[serde(default = "default_seats")]
    seats: u8,
    session: SessionConfig,
    #[serde(default)]
    table_rounds: Option<u64>,
}

fn default_seats() -> u8 {
    1
}

impl TryFrom<RawTableConfig> for TableConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTableConfig) -> Result<Self, Self::Error> {
        TableConfig::new(raw.seats, raw.session, raw.table_rounds)
    }
}

impl TableConfig {
    /// A present `table_rounds` budget switches the table into seat
    /// replacement mode.
    pub fn new(
        seats: u8,
        session: SessionConfig,
        table_rounds: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if seats == 0 || seats > MAX_SEATS {
            return Err(ConfigError::InvalidSeatCount {
                requested: seats,
                max: MAX_SEATS,
            });
        }
        if table_rounds == Some(0) {
            return Err(ConfigError::ZeroTableRounds);
        }
        Ok(Self {
            seats,
            session,
            table_rounds,
        })
    }

    pub fn single_seat(session: SessionConfig) -> Self {
        Self {
            seats: 1,
            session,
            table_rounds: None,
        }
    }

    pub fn seats(&self) -> usize {
        usize::from(self.seats)
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn table_rounds(&self) -> Option<u64> {
        self.table_rounds
    }

    pub fn mode(&self) -> TableMode {
        match self.table_rounds {
            Some(table_rounds) => TableMode::SeatReplacement { table_rounds },
            None => TableMode::Classic,
        }
    }
}
