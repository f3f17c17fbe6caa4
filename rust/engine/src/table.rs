//! Table session state machine.
//!
//! One [`TableSession`] plays rounds for 1–6 seats that share a deck and two
//! community cards per round. Each seat carries its own bankroll and stop
//! conditions:
//!
//! - **Classic** tables stop a seat for good when its condition triggers and
//!   finish once every seat has stopped.
//! - **Seat replacement** tables refill a stopped seat with a fresh bankroll
//!   and keep dealing until the round budget is spent; sessions still running
//!   at that point are closed as [`StopReason::InProgress`].
//!
//! Stop conditions are evaluated once per seat per round, after the round
//! has been settled.

use tracing::{debug, trace};

use crate::cards::Card;
use crate::config::{SessionConfig, TableConfig, TableMode};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::hand::{evaluate_five, evaluate_three};
use crate::paytable::{bonus_multiplier, main_multiplier};
use crate::result::{StopReason, TableEndReason, TableSessionResult};
use crate::seat::SeatState;
use crate::seed::{create_generator, Seed, SessionRng};
use crate::strategy::{Decision, DecisionContext, Strategy};

/// Money movement for one seat in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandSettlement {
    /// Main bets still in action at showdown (1 to 3).
    pub riding_bets: u8,
    pub main_net: i64,
    pub bonus_net: i64,
    pub wagered_main: i64,
    pub wagered_bonus: i64,
}

impl HandSettlement {
    pub fn net(&self) -> i64 {
        self.main_net + self.bonus_net
    }
}

/// Play out one seat's hand against the shared community cards.
///
/// The third bet always rides; the first two follow the strategy.
pub fn settle_hand(
    strategy: &dyn Strategy,
    config: &SessionConfig,
    seat: &SeatState,
    hole: [Card; 3],
    community: [Card; 2],
) -> HandSettlement {
    let tracker = seat.tracker();
    let first = DecisionContext {
        cards: &hole,
        bankroll: tracker.current(),
        session_profit: tracker.profit(),
        hands_played: seat.hands_played(),
    };
    let bet_one = strategy.decide_bet_one(&first);

    let partial = [hole[0], hole[1], hole[2], community[0]];
    let second = DecisionContext {
        cards: &partial,
        ..first
    };
    let bet_two = strategy.decide_bet_two(&second);

    let riding_bets =
        1 + u8::from(bet_one == Decision::Ride) + u8::from(bet_two == Decision::Ride);
    let wagered_main = i64::from(riding_bets) * config.base_bet();

    let five = [hole[0], hole[1], hole[2], community[0], community[1]];
    let main_net = match main_multiplier(&evaluate_five(&five)) {
        Some(m) => wagered_main * m,
        None => -wagered_main,
    };

    let wagered_bonus = config.bonus_bet();
    let bonus_net = if wagered_bonus > 0 {
        match bonus_multiplier(evaluate_three(&hole)) {
            Some(m) => wagered_bonus * m,
            None => -wagered_bonus,
        }
    } else {
        0
    };

    HandSettlement {
        riding_bets,
        main_net,
        bonus_net,
        wagered_main,
        wagered_bonus,
    }
}

pub struct TableSession<'a> {
    config: &'a TableConfig,
    strategy: &'a dyn Strategy,
    seed: Seed,
    rng: SessionRng,
    deck: Deck,
    seats: Vec<SeatState>,
    rounds_played: u64,
}

impl<'a> TableSession<'a> {
    /// Build a table whose every shuffle derives from `seed`.
    pub fn new(config: &'a TableConfig, strategy: &'a dyn Strategy, seed: Seed) -> Self {
        let seats = (0..config.seats())
            .map(|i| SeatState::new(i, config.session()))
            .collect();
        Self {
            config,
            strategy,
            seed,
            rng: create_generator(seed),
            deck: Deck::new(),
            seats,
            rounds_played: 0,
        }
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn should_stop(&self) -> bool {
        match self.config.mode() {
            TableMode::Classic => self.seats.iter().all(|s| !s.is_active()),
            TableMode::SeatReplacement { table_rounds } => self.rounds_played >= table_rounds,
        }
    }

    /// Deal and settle one round for every active seat. A no-op once the
    /// table should stop.
    pub fn play_round(&mut self) -> Result<(), EngineError> {
        if self.should_stop() {
            return Ok(());
        }
        let round = self.rounds_played;
        self.deck.shuffle(&mut self.rng);
        let community: [Card; 2] = self.deck.deal()?;

        let session_cfg = self.config.session();
        let replacing = matches!(self.config.mode(), TableMode::SeatReplacement { .. });
        for seat in self.seats.iter_mut().filter(|s| s.is_active()) {
            let hole: [Card; 3] = self.deck.deal()?;
            let settlement = settle_hand(self.strategy, session_cfg, seat, hole, community);
            seat.record_round(
                settlement.net(),
                settlement.wagered_main,
                settlement.wagered_bonus,
            )?;
            trace!(
                seat = seat.index(),
                round,
                net = settlement.net(),
                riding = settlement.riding_bets,
                "hand settled"
            );

            let Some(reason) = seat.stop_reason(session_cfg) else {
                continue;
            };
            let index = seat.index();
            let closed = seat.close_session(reason);
            debug!(
                seat = index,
                round,
                reason = ?reason,
                hands = closed.hands_played,
                final_bankroll = closed.final_bankroll,
                "seat session closed"
            );
            if replacing {
                seat.reset(session_cfg, round + 1);
            } else {
                seat.mark_stopped(reason);
            }
        }

        self.rounds_played += 1;
        Ok(())
    }

    /// Play until [`TableSession::should_stop`] and collect every seat's
    /// sessions.
    pub fn run_to_completion(mut self) -> Result<TableSessionResult, EngineError> {
        while !self.should_stop() {
            self.play_round()?;
        }
        Ok(self.finish())
    }

    fn finish(self) -> TableSessionResult {
        let mode = self.config.mode();
        let end_reason = match mode {
            TableMode::Classic => TableEndReason::AllSeatsStopped,
            TableMode::SeatReplacement { .. } => TableEndReason::TableRoundsComplete,
        };
        let seats = self
            .seats
            .into_iter()
            .map(|mut seat| {
                if seat.is_active() && seat.hands_played() > 0 {
                    seat.close_session(StopReason::InProgress);
                }
                seat.into_history()
            })
            .collect();
        TableSessionResult {
            seed: self.seed,
            mode,
            end_reason,
            rounds_played: self.rounds_played,
            seats,
        }
    }
}
