use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// A 52-card shoe dealt from the top.
///
/// The deck does not own a generator: the table session that shuffles it
/// passes its own seeded generator in, so every card order is a function of
/// the session seed alone.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Restore all 52 cards and shuffle them with `rng`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset();
        self.cards.shuffle(rng);
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Deal exactly `N` cards or fail without a partial hand.
    pub fn deal<const N: usize>(&mut self) -> Result<[Card; N], EngineError> {
        if self.remaining() < N {
            return Err(EngineError::DeckExhausted {
                requested: N,
                remaining: self.remaining(),
            });
        }
        let start = self.position;
        self.position += N;
        Ok(std::array::from_fn(|i| self.cards[start + i]))
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
