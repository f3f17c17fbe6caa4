use thiserror::Error;

/// Rejected session or table configuration. Raised at construction time,
/// before any round is played; values are never clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
    #[error("bonus_bet must not be negative, got {0}")]
    NegativeBonus(i64),
    #[error("no stop condition configured: set win_limit, loss_limit or max_hands")]
    NoStopCondition,
    #[error("playing on credit requires loss_limit or max_hands to bound the session")]
    UnboundedCredit,
    #[error("starting bankroll {bankroll} cannot cover one round ({required} required)")]
    BankrollTooSmall { bankroll: i64, required: i64 },
    #[error("seat count must be between 1 and {max}, got {requested}")]
    InvalidSeatCount { requested: u8, max: u8 },
    #[error("table_rounds must be positive when set")]
    ZeroTableRounds,
    #[error("{field} must be at most {max}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Seed derivation, quality check and checkpoint failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed {seed} is outside 0..={max}")]
    SeedOutOfRange { seed: u64, max: u32 },
    #[error("session count must be between 1 and {max}, got {requested}")]
    InvalidSessionCount { requested: usize, max: usize },
    #[error("worker id {requested} exceeds the maximum of {max}")]
    InvalidWorkerId { requested: usize, max: usize },
    #[error("sample size must be between {min} and {max}, got {requested}")]
    InvalidSampleSize {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("bucket count must be between {min} and {max} with at least 5 samples each, got {requested}")]
    InvalidBuckets {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
    #[error("seed state is missing field `{0}`")]
    MissingField(&'static str),
    #[error("seed state field `{field}` must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("seed state field `{field}` is out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },
    #[error("seed state field `{0}` does not match base_seed")]
    Inconsistent(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("deck exhausted: requested {requested} cards, {remaining} remaining")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("bankroll arithmetic overflowed")]
    AmountOverflow,
}
