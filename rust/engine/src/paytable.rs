//! Payout multipliers (to-one) for the main game and the three-card bonus.

use crate::hand::{Category, FiveCardHand, ThreeCardCategory};

/// Multiplier paid on each riding bet, or `None` when the hand loses.
pub fn main_multiplier(hand: &FiveCardHand) -> Option<i64> {
    if !hand.is_tens_or_better() {
        return None;
    }
    Some(match hand.category {
        Category::RoyalFlush => 1000,
        Category::StraightFlush => 200,
        Category::FourOfAKind => 50,
        Category::FullHouse => 11,
        Category::Flush => 8,
        Category::Straight => 5,
        Category::ThreeOfAKind => 3,
        Category::TwoPair => 2,
        Category::OnePair | Category::HighCard => 1,
    })
}

/// Multiplier paid on the bonus bet, or `None` when the bonus loses.
pub fn bonus_multiplier(category: ThreeCardCategory) -> Option<i64> {
    match category {
        ThreeCardCategory::MiniRoyal => Some(50),
        ThreeCardCategory::StraightFlush => Some(40),
        ThreeCardCategory::ThreeOfAKind => Some(30),
        ThreeCardCategory::Straight => Some(6),
        ThreeCardCategory::Flush => Some(3),
        ThreeCardCategory::Pair => Some(1),
        ThreeCardCategory::HighCard => None,
    }
}
