//! Shape tests over the cards visible at a decision point.
//!
//! All helpers take a slice so they work on the three seat cards (first
//! decision) and on the four cards seen at the second decision alike.

use ridesim_engine::cards::{Card, Rank};

const ACE: u8 = 14;

fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[usize::from(c.rank.value())] += 1;
    }
    counts
}

pub fn is_suited(cards: &[Card]) -> bool {
    match cards.first() {
        Some(first) => cards.iter().all(|c| c.suit == first.suit),
        None => false,
    }
}

pub fn high_card_count(cards: &[Card]) -> usize {
    cards.iter().filter(|c| c.rank.is_high()).count()
}

pub fn has_pair(cards: &[Card]) -> bool {
    rank_counts(cards).iter().any(|&n| n >= 2)
}

/// Already holding a hand the main paytable pays: a pair of tens or better,
/// two pair, or trips.
pub fn is_paying(cards: &[Card]) -> bool {
    let counts = rank_counts(cards);
    let pairs = counts.iter().filter(|&&n| n == 2).count();
    let trips = counts.iter().any(|&n| n >= 3);
    let high_pair = (usize::from(Rank::Ten.value())..=usize::from(ACE)).any(|r| counts[r] >= 2);
    trips || pairs >= 2 || high_pair
}

/// Smallest window of consecutive ranks holding every card, counting an ace
/// as high or low. `None` when ranks repeat.
pub fn straight_span(cards: &[Card]) -> Option<u8> {
    if cards.is_empty() || has_pair(cards) {
        return None;
    }
    let high: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    let span_high = span(&high);
    if !high.contains(&ACE) {
        return Some(span_high);
    }
    let low: Vec<u8> = high.iter().map(|&v| if v == ACE { 1 } else { v }).collect();
    Some(span_high.min(span(&low)))
}

fn span(values: &[u8]) -> u8 {
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);
    max - min + 1
}

/// Suited cards that fit inside one five-rank straight window.
pub fn is_straight_flush_draw(cards: &[Card], max_span: u8) -> bool {
    is_suited(cards) && straight_span(cards).is_some_and(|s| s <= max_span.min(5))
}

/// Three or four suited cards that all belong to the same royal flush.
pub fn is_royal_draw(cards: &[Card]) -> bool {
    is_suited(cards) && !has_pair(cards) && cards.iter().all(|c| c.rank.is_high())
}

/// Four consecutive ranks that a card on either end would complete.
pub fn is_outside_straight_draw(cards: &[Card]) -> bool {
    if cards.len() != 4 || straight_span(cards) != Some(4) {
        return false;
    }
    // A-2-3-4 and J-Q-K-A can only be filled from one side
    !cards.iter().any(|c| c.rank == Rank::Ace)
}
