use serde::{Deserialize, Serialize};

use crate::bankroll::BankrollTracker;
use crate::config::TableMode;
use crate::seed::Seed;

/// Win, loss or push for a round or for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    /// Exactly zero is a push.
    pub fn from_profit(profit: i64) -> Self {
        match profit {
            p if p > 0 => Outcome::Win,
            p if p < 0 => Outcome::Loss,
            _ => Outcome::Push,
        }
    }
}

/// Why a seat session ended.
///
/// `InProgress` marks a session that was still running when a
/// seat-replacement table used up its round budget. It is not a real stop,
/// see [`SessionResult::is_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    WinLimit,
    LossLimit,
    MaxHands,
    InsufficientFunds,
    InProgress,
}

/// Final figures for one seat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: Outcome,
    pub stop_reason: StopReason,
    pub hands_played: u32,
    pub starting_bankroll: i64,
    pub final_bankroll: i64,
    pub peak_bankroll: i64,
    pub max_drawdown: i64,
    pub max_drawdown_pct: f64,
    pub total_wagered_main: i64,
    pub total_wagered_bonus: i64,
    /// Table round index at which this session's first hand was dealt.
    pub start_round: u64,
}

impl SessionResult {
    pub(crate) fn from_tracker(
        tracker: &BankrollTracker,
        stop_reason: StopReason,
        hands_played: u32,
        start_round: u64,
    ) -> Self {
        Self {
            outcome: Outcome::from_profit(tracker.profit()),
            stop_reason,
            hands_played,
            starting_bankroll: tracker.starting(),
            final_bankroll: tracker.current(),
            peak_bankroll: tracker.peak(),
            max_drawdown: tracker.max_drawdown(),
            max_drawdown_pct: tracker.max_drawdown_pct(),
            total_wagered_main: tracker.wagered_main(),
            total_wagered_bonus: tracker.wagered_bonus(),
            start_round,
        }
    }

    pub fn profit(&self) -> i64 {
        self.final_bankroll - self.starting_bankroll
    }

    /// False only for sessions cut off by the end of the table.
    pub fn is_complete(&self) -> bool {
        self.stop_reason != StopReason::InProgress
    }

    pub fn total_wagered(&self) -> i64 {
        self.total_wagered_main + self.total_wagered_bonus
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableEndReason {
    /// Classic mode: every seat reached its own stop condition.
    AllSeatsStopped,
    /// Seat replacement mode: the round budget was played out.
    TableRoundsComplete,
}

/// Every session one seat position hosted, in play order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatHistory {
    pub seat: usize,
    pub rounds_participated: u64,
    pub sessions: Vec<SessionResult>,
}

impl SeatHistory {
    pub fn hands_played(&self) -> u64 {
        self.sessions.iter().map(|s| u64::from(s.hands_played)).sum()
    }

    /// Hands across the seat's sessions add up to the rounds it sat in.
    pub fn is_consistent(&self) -> bool {
        self.hands_played() == self.rounds_participated
    }
}

/// Outcome of running one table to completion from one seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSessionResult {
    pub seed: Seed,
    pub mode: TableMode,
    pub end_reason: TableEndReason,
    pub rounds_played: u64,
    pub seats: Vec<SeatHistory>,
}

impl TableSessionResult {
    /// All sessions, seat by seat.
    pub fn sessions(&self) -> impl Iterator<Item = &SessionResult> {
        self.seats.iter().flat_map(|s| s.sessions.iter())
    }
}
