//! Fixed-decision strategies used as bounds when comparing real strategies.

use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};

/// Lets every bet ride: the most volatile way to play.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRide;

impl Strategy for AlwaysRide {
    fn decide_bet_one(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Ride
    }

    fn decide_bet_two(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Ride
    }

    fn name(&self) -> &str {
        "AlwaysRide"
    }
}

/// Takes back both optional bets, leaving one unit in action per hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPull;

impl Strategy for AlwaysPull {
    fn decide_bet_one(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Pull
    }

    fn decide_bet_two(&self, _ctx: &DecisionContext<'_>) -> Decision {
        Decision::Pull
    }

    fn name(&self) -> &str {
        "AlwaysPull"
    }
}
