//! Per-seat state at a table: the running bankroll, streak and the
//! finalized session history of everyone who has sat in the seat.

use crate::bankroll::BankrollTracker;
use crate::config::SessionConfig;
use crate::errors::EngineError;
use crate::result::{Outcome, SeatHistory, SessionResult, StopReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Active,
    /// Terminal in classic mode.
    Stopped(StopReason),
}

/// Mutable per-seat state owned by the table engine.
///
/// The history only grows: resets start a new session but keep every
/// finalized result.
#[derive(Debug, Clone)]
pub struct SeatState {
    index: usize,
    tracker: BankrollTracker,
    hands_played: u32,
    history: Vec<SessionResult>,
    session_start_round: u64,
    last_outcome: Option<Outcome>,
    streak: i32,
    rounds_participated: u64,
    status: SeatStatus,
}

impl SeatState {
    pub fn new(index: usize, config: &SessionConfig) -> Self {
        Self {
            index,
            tracker: BankrollTracker::new(config.starting_bankroll()),
            hands_played: 0,
            history: Vec::new(),
            session_start_round: 0,
            last_outcome: None,
            streak: 0,
            rounds_participated: 0,
            status: SeatStatus::Active,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn tracker(&self) -> &BankrollTracker {
        &self.tracker
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    pub fn history(&self) -> &[SessionResult] {
        &self.history
    }
    pub fn session_start_round(&self) -> u64 {
        self.session_start_round
    }
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }
    /// Positive for consecutive winning rounds, negative for losing ones.
    pub fn streak(&self) -> i32 {
        self.streak
    }
    pub fn rounds_participated(&self) -> u64 {
        self.rounds_participated
    }
    pub fn status(&self) -> SeatStatus {
        self.status
    }
    pub fn is_active(&self) -> bool {
        self.status == SeatStatus::Active
    }

    /// Fold one settled round into the seat.
    pub fn record_round(
        &mut self,
        net: i64,
        wagered_main: i64,
        wagered_bonus: i64,
    ) -> Result<(), EngineError> {
        self.tracker.record(net, wagered_main, wagered_bonus)?;
        self.hands_played += 1;
        self.rounds_participated += 1;
        let outcome = Outcome::from_profit(net);
        self.streak = match outcome {
            Outcome::Win if self.streak > 0 => self.streak + 1,
            Outcome::Win => 1,
            Outcome::Loss if self.streak < 0 => self.streak - 1,
            Outcome::Loss => -1,
            Outcome::Push => 0,
        };
        self.last_outcome = Some(outcome);
        Ok(())
    }

    /// The stop condition this seat has reached, if any. Limits trigger on
    /// reaching the boundary, not only on passing it.
    pub fn stop_reason(&self, config: &SessionConfig) -> Option<StopReason> {
        let profit = self.tracker.profit();
        if config.win_limit().is_some_and(|w| profit >= w) {
            return Some(StopReason::WinLimit);
        }
        if config.loss_limit().is_some_and(|l| profit <= -l) {
            return Some(StopReason::LossLimit);
        }
        if config.max_hands().is_some_and(|m| self.hands_played >= m) {
            return Some(StopReason::MaxHands);
        }
        if config.stop_on_insufficient_funds() && self.tracker.current() < config.round_outlay() {
            return Some(StopReason::InsufficientFunds);
        }
        None
    }

    /// Finalize the running session into the history.
    pub fn close_session(&mut self, reason: StopReason) -> &SessionResult {
        let result = SessionResult::from_tracker(
            &self.tracker,
            reason,
            self.hands_played,
            self.session_start_round,
        );
        self.history.push(result);
        &self.history[self.history.len() - 1]
    }

    pub fn mark_stopped(&mut self, reason: StopReason) {
        self.status = SeatStatus::Stopped(reason);
    }

    /// Seat a fresh player: new bankroll, cleared per-session counters,
    /// history kept.
    pub fn reset(&mut self, config: &SessionConfig, start_round: u64) {
        self.tracker = BankrollTracker::new(config.starting_bankroll());
        self.hands_played = 0;
        self.last_outcome = None;
        self.streak = 0;
        self.session_start_round = start_round;
        self.status = SeatStatus::Active;
    }

    pub fn into_history(self) -> SeatHistory {
        SeatHistory {
            seat: self.index,
            rounds_participated: self.rounds_participated,
            sessions: self.history,
        }
    }
}
