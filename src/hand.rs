//! Player and dealer hands and the hand evaluator.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// The best possible hand total.
pub const BLACKJACK: u8 = 21;

/// Points removed when an ace is counted as 1 instead of 11.
const ACE_DOWNGRADE: u32 = 10;

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.rank.is_ace() {
            aces += 1;
        }
        total += u32::from(card.value());
    }

    while total > u32::from(BLACKJACK) && aces > 0 {
        total -= ACE_DOWNGRADE;
        aces -= 1;
    }

    let is_soft = aces > 0;
    (u8::try_from(total).unwrap_or(u8::MAX), is_soft)
}

/// Scores a collection of cards.
///
/// Every card counts its high value, then aces are downgraded from 11 to 1
/// one at a time while the total is over 21. The result may still exceed
/// 21, which is a bust. Card order does not matter.
///
/// ```
/// use bjsolo::{Card, Rank, Suit, hand::score};
///
/// let aces = [
///     Card::new(Suit::Hearts, Rank::Ace),
///     Card::new(Suit::Spades, Rank::Ace),
/// ];
/// assert_eq!(score(&aces), 12);
/// assert_eq!(score(&[]), 0);
/// ```
#[must_use]
pub fn score(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether an ace in the cards is still counted as 11.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// Returns whether the cards are a two-card 21.
#[must_use]
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

/// Which side of the table a hand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// A dealer card as the player may see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardView {
    /// Face-down hole card.
    Hidden,
    /// Face-up card.
    Shown(Card),
}

/// The player's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        score(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns whether the hand is a natural (two-card 21).
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// The dealer's hand.
///
/// The first card dealt to the dealer is the hole card and stays face down
/// until [`DealerHand::reveal_hole`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerHand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand, including a face-down hole card.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the hand as the player sees it.
    #[must_use]
    pub fn view(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, &card)| {
                if index == 0 && !self.hole_revealed {
                    CardView::Hidden
                } else {
                    CardView::Shown(card)
                }
            })
            .collect()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Scores only the face-up cards.
    #[must_use]
    pub fn visible_score(&self) -> u8 {
        if self.hole_revealed {
            self.score()
        } else {
            score(self.cards.get(1..).unwrap_or_default())
        }
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        score(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}
