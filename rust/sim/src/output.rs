use serde::Serialize;
use serde_json::Value;

use ridesim_engine::result::{Outcome, SessionResult, TableSessionResult};
use ridesim_engine::seed::Seed;

/// Merged result of a run, one table per session id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub base_seed: Seed,
    pub workers_used: usize,
    pub parallel: bool,
    pub tables: Vec<TableSessionResult>,
    /// Seed authority state after derivation, for checkpointing.
    #[serde(skip)]
    pub seed_state: Value,
}

impl SimulationOutput {
    /// Every seat session, in session-id order then seat order.
    pub fn session_results(&self) -> Vec<&SessionResult> {
        self.tables.iter().flat_map(|t| t.sessions()).collect()
    }

    /// Per seat position, the sessions that seat hosted across all tables.
    pub fn seat_histories(&self) -> Vec<Vec<&SessionResult>> {
        let seats = self.tables.iter().map(|t| t.seats.len()).max().unwrap_or(0);
        let mut histories: Vec<Vec<&SessionResult>> = vec![Vec::new(); seats];
        for table in &self.tables {
            for seat in &table.seats {
                histories[seat.seat].extend(seat.sessions.iter());
            }
        }
        histories
    }

    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for s in self.tables.iter().flat_map(|t| t.sessions()) {
            tally.add(s);
        }
        tally
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub sessions: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    /// Sessions cut off by the end of a seat-replacement table.
    pub in_progress: u64,
    pub hands_played: u64,
    pub net_profit: i64,
    pub total_wagered: i64,
}

impl OutcomeTally {
    fn add(&mut self, s: &SessionResult) {
        self.sessions += 1;
        match s.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
        if !s.is_complete() {
            self.in_progress += 1;
        }
        self.hands_played += u64::from(s.hands_played);
        self.net_profit += s.profit();
        self.total_wagered += s.total_wagered();
    }

    pub fn win_rate(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.wins as f64 / self.sessions as f64
        }
    }
}
