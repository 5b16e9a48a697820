//! Notifications sent from the game to presentation adapters.
//!
//! The game never renders anything itself. Each state change is described by
//! an [`Event`] and handed to every [`Observer`] registered with
//! [`Game::subscribe`](crate::Game::subscribe), in registration order.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::{CardView, Seat};
use crate::result::RoundResult;
use crate::sync::Shared;

/// A state change worth showing to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A bet was placed and the initial cards dealt.
    RoundStarted {
        /// The player's two cards.
        player: Vec<Card>,
        /// The dealer's cards with the hole card hidden.
        dealer: Vec<CardView>,
        /// The player's score.
        player_score: u8,
        /// Whether the player was dealt a natural.
        is_natural: bool,
        /// The bet placed.
        bet: usize,
        /// The balance after the bet was debited.
        balance: usize,
    },
    /// A card was added to a hand after the initial deal.
    HandUpdated {
        /// Whose hand changed.
        seat: Seat,
        /// The full hand.
        cards: Vec<Card>,
        /// The new score.
        score: u8,
        /// Whether the hand is a two-card 21.
        is_natural: bool,
    },
    /// The round was settled and chips paid out.
    RoundSettled {
        /// Outcome, payout, and scores.
        result: RoundResult,
        /// The dealer's full hand.
        dealer: Vec<Card>,
    },
    /// The round was abandoned and the bet forfeited.
    RoundAbandoned {
        /// The forfeited bet.
        bet: usize,
    },
    /// The balance reached zero; only a reset is accepted.
    Bankrupt {
        /// Human-readable notice.
        message: String,
    },
    /// The wallet was restored to its starting balance.
    WalletReset {
        /// The restored balance.
        balance: usize,
    },
}

/// Receives game events.
///
/// Any `FnMut(&Event)` closure is an observer.
pub trait Observer {
    /// Handles one event.
    fn on_event(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Observer for F {
    fn on_event(&mut self, event: &Event) {
        self(event);
    }
}

/// An observer that records every event.
///
/// Clones share the same log, so one handle can be subscribed while another
/// is kept to read what was recorded.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Shared<Vec<Event>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.with(|events| events.clone())
    }

    /// Removes and returns every recorded event.
    pub fn take(&self) -> Vec<Event> {
        self.events.with(core::mem::take)
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.with(|events| events.len())
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Observer for EventLog {
    fn on_event(&mut self, event: &Event) {
        let event = event.clone();
        self.events.with(|events| events.push(event));
    }
}
