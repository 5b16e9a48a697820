//! The 52-card draw pile used for a single round.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::DeckError;

/// An ordered draw pile. Cards are drawn from the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards; the top of the deck is the end of the vector.
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an unshuffled deck holding every (suit, rank) pair once.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }

        Self { cards }
    }

    /// Creates a standard deck and shuffles it with the given RNG.
    ///
    /// Every ordering is equally likely for a uniform RNG.
    ///
    /// ```
    /// use bjsolo::Deck;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let deck = Deck::shuffled(&mut rng);
    /// assert_eq!(deck.len(), 52);
    /// ```
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// Creates a stacked deck that yields `draws` in order.
    ///
    /// The first element is the first card drawn. No uniqueness check is
    /// made, which lets replays and tests deal any sequence they need.
    #[must_use]
    pub fn from_draws(draws: &[Card]) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self { cards }
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] once every card has been drawn.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Returns the remaining cards, top card last.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether every card has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let a = Deck::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let b = Deck::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let c = Deck::shuffled(&mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shuffle_changes_standard_order() {
        let shuffled = Deck::shuffled(&mut ChaCha8Rng::seed_from_u64(1));
        assert_ne!(shuffled, Deck::standard());
    }

    #[test]
    fn stacked_deck_draws_in_given_order() {
        let first = Card::new(Suit::Spades, Rank::Ace);
        let second = Card::new(Suit::Hearts, Rank::Two);
        let mut deck = Deck::from_draws(&[first, second]);

        assert_eq!(deck.draw(), Ok(first));
        assert_eq!(deck.draw(), Ok(second));
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }
}
