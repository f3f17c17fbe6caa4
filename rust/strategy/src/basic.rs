//! Published optimal ride rules for the standard paytable.
//!
//! **First decision (three seat cards)**, ride with:
//! - a paying hand (tens or better, or trips)
//! - three to a royal flush
//! - three suited in a row, except 2-3-4 and A-2-3
//! - three to a straight flush with one gap and at least one high card
//! - three to a straight flush with two gaps and at least two high cards
//!
//! **Second decision (seat cards plus first community card)**, ride with:
//! - a paying hand (tens or better, two pair, trips)
//! - four to a flush
//! - four to an outside straight with at least one high card
//! - four to an inside straight with four high cards
//!
//! High cards are ten through ace.

use ridesim_engine::cards::Rank;
use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};

use crate::draws::{
    high_card_count, is_outside_straight_draw, is_paying, is_royal_draw, is_suited, straight_span,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl BasicStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn ride_if(condition: bool) -> Decision {
    if condition {
        Decision::Ride
    } else {
        Decision::Pull
    }
}

impl Strategy for BasicStrategy {
    fn decide_bet_one(&self, ctx: &DecisionContext<'_>) -> Decision {
        let cards = ctx.cards;
        if is_paying(cards) || is_royal_draw(cards) {
            return Decision::Ride;
        }
        if !is_suited(cards) {
            return Decision::Pull;
        }
        let high = high_card_count(cards);
        let ride = match straight_span(cards) {
            // A-2-3 and 2-3-4 are the only runs holding a deuce
            Some(3) => cards.iter().all(|c| c.rank != Rank::Two),
            Some(4) => high >= 1,
            Some(5) => high >= 2,
            _ => false,
        };
        ride_if(ride)
    }

    fn decide_bet_two(&self, ctx: &DecisionContext<'_>) -> Decision {
        let cards = ctx.cards;
        if is_paying(cards) || is_suited(cards) {
            return Decision::Ride;
        }
        let high = high_card_count(cards);
        if is_outside_straight_draw(cards) && high >= 1 {
            return Decision::Ride;
        }
        ride_if(straight_span(cards).is_some_and(|s| s <= 5) && high == 4)
    }

    fn name(&self) -> &str {
        "BasicStrategy"
    }
}
