//! Configurable ride rules.
//!
//! A [`RuleBased`] strategy rides a bet when any rule in that decision's list
//! matches the visible cards; an empty list always pulls.

use serde::{Deserialize, Serialize};

use ridesim_engine::strategy::{Decision, DecisionContext, Strategy};

use crate::draws::{
    has_pair, high_card_count, is_outside_straight_draw, is_paying, is_royal_draw,
    is_straight_flush_draw, is_suited, straight_span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RideRule {
    /// Already holding a hand the main paytable pays.
    PayingHand,
    AnyPair,
    /// Every visible card shares a suit.
    Suited,
    RoyalDraw,
    StraightDraw {
        max_span: u8,
        #[serde(default)]
        min_high_cards: usize,
    },
    OutsideStraightDraw {
        #[serde(default)]
        min_high_cards: usize,
    },
    StraightFlushDraw {
        max_span: u8,
        #[serde(default)]
        min_high_cards: usize,
    },
    MinHighCards {
        count: usize,
    },
}

impl RideRule {
    pub fn matches(&self, ctx: &DecisionContext<'_>) -> bool {
        let cards = ctx.cards;
        match *self {
            RideRule::PayingHand => is_paying(cards),
            RideRule::AnyPair => has_pair(cards),
            RideRule::Suited => is_suited(cards),
            RideRule::RoyalDraw => is_royal_draw(cards),
            RideRule::StraightDraw {
                max_span,
                min_high_cards,
            } => {
                straight_span(cards).is_some_and(|s| s <= max_span.min(5))
                    && high_card_count(cards) >= min_high_cards
            }
            RideRule::OutsideStraightDraw { min_high_cards } => {
                is_outside_straight_draw(cards) && high_card_count(cards) >= min_high_cards
            }
            RideRule::StraightFlushDraw {
                max_span,
                min_high_cards,
            } => {
                is_straight_flush_draw(cards, max_span)
                    && high_card_count(cards) >= min_high_cards
            }
            RideRule::MinHighCards { count } => high_card_count(cards) >= count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleBased {
    bet_one: Vec<RideRule>,
    bet_two: Vec<RideRule>,
}

impl RuleBased {
    pub fn new(bet_one: Vec<RideRule>, bet_two: Vec<RideRule>) -> Self {
        Self { bet_one, bet_two }
    }

    fn decide(rules: &[RideRule], ctx: &DecisionContext<'_>) -> Decision {
        if rules.iter().any(|r| r.matches(ctx)) {
            Decision::Ride
        } else {
            Decision::Pull
        }
    }
}

impl Strategy for RuleBased {
    fn decide_bet_one(&self, ctx: &DecisionContext<'_>) -> Decision {
        Self::decide(&self.bet_one, ctx)
    }

    fn decide_bet_two(&self, ctx: &DecisionContext<'_>) -> Decision {
        Self::decide(&self.bet_two, ctx)
    }

    fn name(&self) -> &str {
        "RuleBased"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridesim_engine::cards::{Card, Rank, Suit};

    fn c(r: Rank, s: Suit) -> Card {
        Card::new(r, s)
    }

    fn ctx(cards: &[Card]) -> DecisionContext<'_> {
        DecisionContext {
            cards,
            bankroll: 100,
            session_profit: 0,
            hands_played: 3,
        }
    }

    #[test]
    fn empty_rule_list_always_pulls() {
        let s = RuleBased::default();
        let cards = [
            c(Rank::Ace, Suit::Hearts),
            c(Rank::Ace, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
        ];
        assert_eq!(s.decide_bet_one(&ctx(&cards)), Decision::Pull);
    }

    #[test]
    fn any_matching_rule_rides() {
        let s = RuleBased::new(
            vec![RideRule::AnyPair, RideRule::MinHighCards { count: 3 }],
            vec![RideRule::Suited],
        );
        let low_pair = [
            c(Rank::Three, Suit::Hearts),
            c(Rank::Three, Suit::Clubs),
            c(Rank::Eight, Suit::Spades),
        ];
        assert_eq!(s.decide_bet_one(&ctx(&low_pair)), Decision::Ride);
        let faces = [
            c(Rank::Jack, Suit::Hearts),
            c(Rank::Queen, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
        ];
        assert_eq!(s.decide_bet_one(&ctx(&faces)), Decision::Ride);
        let rags = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Seven, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
        ];
        assert_eq!(s.decide_bet_one(&ctx(&rags)), Decision::Pull);
    }

    #[test]
    fn straight_flush_draw_respects_span_and_high_cards() {
        let rule = RideRule::StraightFlushDraw {
            max_span: 4,
            min_high_cards: 1,
        };
        let gapped = [
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Jack, Suit::Hearts),
            c(Rank::King, Suit::Hearts),
        ];
        assert!(!rule.matches(&ctx(&gapped)));
        let connected = [
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Jack, Suit::Hearts),
        ];
        assert!(rule.matches(&ctx(&connected)));
    }
}
