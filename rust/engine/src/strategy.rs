//! Decision interface between the table engine and ride strategies.
//!
//! The engine only knows this trait. Concrete strategies live in the
//! `ridesim-strategy` crate and are built per worker from configuration.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Leave a bet in action or take it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Ride,
    Pull,
}

/// What a seat can see when a decision is due.
///
/// `cards` holds the three seat cards for the first decision and the three
/// seat cards followed by the first community card for the second.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub cards: &'a [Card],
    pub bankroll: i64,
    pub session_profit: i64,
    pub hands_played: u32,
}

/// Player decision logic for the two pull-or-ride points of a round.
///
/// # Example Implementation
///
/// ```rust
/// use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};
///
/// struct RideOnPairs;
///
/// impl Strategy for RideOnPairs {
///     fn decide_bet_one(&self, ctx: &DecisionContext<'_>) -> Decision {
///         let paired = ctx.cards.iter().enumerate().any(|(i, a)| {
///             ctx.cards[i + 1..].iter().any(|b| a.rank == b.rank)
///         });
///         if paired { Decision::Ride } else { Decision::Pull }
///     }
///
///     fn decide_bet_two(&self, ctx: &DecisionContext<'_>) -> Decision {
///         self.decide_bet_one(ctx)
///     }
///
///     fn name(&self) -> &str {
///         "RideOnPairs"
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// First decision, after the three seat cards are seen.
    fn decide_bet_one(&self, ctx: &DecisionContext<'_>) -> Decision;

    /// Second decision, after the first community card is exposed.
    fn decide_bet_two(&self, ctx: &DecisionContext<'_>) -> Decision;

    fn name(&self) -> &str;
}
