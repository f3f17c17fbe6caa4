use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Five-card poker categories, low to high.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Evaluated five-card hand. `pair_rank` is set only for [`Category::OnePair`]
/// since the main paytable cares whether the pair is tens or better.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FiveCardHand {
    pub category: Category,
    pub pair_rank: Option<Rank>,
}

impl FiveCardHand {
    pub fn is_tens_or_better(&self) -> bool {
        match self.category {
            Category::HighCard => false,
            Category::OnePair => self.pair_rank.is_some_and(Rank::is_high),
            _ => true,
        }
    }
}

/// Three-card categories in three-card poker order, where a straight beats a
/// flush and trips beat both.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ThreeCardCategory {
    HighCard = 0,
    Pair = 1,
    Flush = 2,
    Straight = 3,
    ThreeOfAKind = 4,
    StraightFlush = 5,
    MiniRoyal = 6,
}

pub fn evaluate_five(cards: &[Card; 5]) -> FiveCardHand {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for &c in cards.iter() {
        let r = rank_val(c.rank);
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }
    let flush = same_suit(cards);
    let straight_high = straight_high_from_mask(rank_mask);

    if flush {
        if let Some(high) = straight_high {
            let category = if high == 14 {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return FiveCardHand {
                category,
                pair_rank: None,
            };
        }
    }

    let (quads, trips, pairs) = classify_multiples(&rank_counts);
    let category = if quads > 0 {
        Category::FourOfAKind
    } else if trips > 0 && !pairs.is_empty() {
        Category::FullHouse
    } else if flush {
        Category::Flush
    } else if straight_high.is_some() {
        Category::Straight
    } else if trips > 0 {
        Category::ThreeOfAKind
    } else if pairs.len() >= 2 {
        Category::TwoPair
    } else if let Some(&p) = pairs.first() {
        return FiveCardHand {
            category: Category::OnePair,
            pair_rank: Some(Rank::from_value(p)),
        };
    } else {
        Category::HighCard
    };
    FiveCardHand {
        category,
        pair_rank: None,
    }
}

pub fn evaluate_three(cards: &[Card; 3]) -> ThreeCardCategory {
    let mut ranks = [
        rank_val(cards[0].rank),
        rank_val(cards[1].rank),
        rank_val(cards[2].rank),
    ];
    ranks.sort_unstable();
    let suited = same_suit(cards);
    let straight = (ranks[1] == ranks[0] + 1 && ranks[2] == ranks[1] + 1) || ranks == [2, 3, 14];

    if suited && ranks == [12, 13, 14] {
        ThreeCardCategory::MiniRoyal
    } else if suited && straight {
        ThreeCardCategory::StraightFlush
    } else if ranks[0] == ranks[2] {
        ThreeCardCategory::ThreeOfAKind
    } else if straight {
        ThreeCardCategory::Straight
    } else if suited {
        ThreeCardCategory::Flush
    } else if ranks[0] == ranks[1] || ranks[1] == ranks[2] {
        ThreeCardCategory::Pair
    } else {
        ThreeCardCategory::HighCard
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn same_suit(cards: &[Card]) -> bool {
    let first: Option<Suit> = cards.first().map(|c| c.suit);
    cards.iter().all(|c| Some(c.suit) == first)
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14).rev() {
        let window = (1u16 << (high - 4))
            | (1 << (high - 3))
            | (1 << (high - 2))
            | (1 << (high - 1))
            | (1 << high);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

/// Returns (quad rank, trip rank, pair ranks high to low); zero when absent.
fn classify_multiples(rank_counts: &[u8; 15]) -> (u8, u8, Vec<u8>) {
    let mut quads = 0;
    let mut trips = 0;
    let mut pairs = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            4 => quads = r,
            3 => trips = r,
            2 => pairs.push(r),
            _ => {}
        }
    }
    (quads, trips, pairs)
}
