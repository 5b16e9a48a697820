//! Round state machine.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::deck::Deck;
use crate::error::{ActionError, StoreError};
use crate::event::{Event, Observer};
use crate::hand::{DealerHand, Hand};
use crate::options::GameOptions;
use crate::result::RoundResult;
use crate::wallet::{Wallet, WalletStore};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::GameState;

const BANKRUPT_MESSAGE: &str = "You are out of chips! Reset to play again.";

/// A single-player blackjack table.
///
/// The game owns the wallet, the deck, both hands, and the current bet.
/// Every operation runs to completion and reports what changed to the
/// subscribed [`Observer`]s. A fresh deck is shuffled for every round.
pub struct Game<S> {
    /// Game options.
    options: GameOptions,
    /// Current game state.
    state: GameState,
    /// Chip balance and its store.
    wallet: Wallet<S>,
    /// Bet for the round in progress, zero otherwise.
    bet: usize,
    /// Draw pile for the current round.
    deck: Deck,
    /// Deck to use instead of a shuffled one for the next round.
    next_deck: Option<Deck>,
    /// Player's hand.
    player_hand: Hand,
    /// Dealer's hand.
    dealer_hand: DealerHand,
    /// Result of the most recently settled round.
    last_result: Option<RoundResult>,
    /// Event subscribers.
    observers: Vec<Box<dyn Observer>>,
    /// Random number generator for shuffling.
    rng: Box<dyn RngCore>,
}

impl<S: WalletStore> Game<S> {
    /// Opens a table with the given shuffle seed, shuffling with
    /// [`ChaCha8Rng`].
    ///
    /// The balance is loaded from `store`, falling back to the starting
    /// balance. A persisted balance of zero opens the table bankrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::{Game, GameOptions, GameState, MemoryStore};
    ///
    /// let game = Game::new(GameOptions::default(), MemoryStore::new(), 42).unwrap();
    /// assert_eq!(game.balance(), 100);
    /// assert_eq!(game.state(), GameState::Idle);
    /// ```
    pub fn new(options: GameOptions, store: S, seed: u64) -> Result<Self, StoreError> {
        Self::with_rng(options, store, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Opens a table that shuffles with the given RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::{Game, GameOptions, MemoryStore};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha20Rng;
    ///
    /// let rng = ChaCha20Rng::seed_from_u64(3);
    /// let mut game = Game::with_rng(GameOptions::default(), MemoryStore::new(), rng).unwrap();
    /// game.place_bet_and_deal(5).unwrap();
    /// assert_eq!(game.cards_remaining(), 48);
    /// ```
    pub fn with_rng(
        options: GameOptions,
        store: S,
        rng: impl RngCore + 'static,
    ) -> Result<Self, StoreError> {
        let wallet = Wallet::open(store, options.starting_balance)?;
        let state = if wallet.balance() == 0 {
            log::info!("wallet is empty, waiting for a reset");
            GameState::Bankrupt
        } else {
            GameState::Idle
        };

        Ok(Self {
            options,
            state,
            wallet,
            bet: 0,
            deck: Deck::from_draws(&[]),
            next_deck: None,
            player_hand: Hand::new(),
            dealer_hand: DealerHand::new(),
            last_result: None,
            observers: Vec::new(),
            rng: Box::new(rng),
        })
    }

    /// Registers an observer for every subsequent event.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Makes the next round deal from `deck` instead of a freshly shuffled
    /// one. Used to replay a known round.
    pub fn set_next_deck(&mut self, deck: Deck) {
        self.next_deck = Some(deck);
    }

    /// Writes the current balance to the store again.
    ///
    /// Use this to retry after a settlement reported a store failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        self.wallet.persist()
    }

    /// Returns the game options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current game state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the chip balance.
    pub const fn balance(&self) -> usize {
        self.wallet.balance()
    }

    /// Returns the wallet.
    pub const fn wallet(&self) -> &Wallet<S> {
        &self.wallet
    }

    /// Returns the bet of the round in progress.
    pub const fn bet(&self) -> Option<usize> {
        if self.state.is_round_in_progress() {
            Some(self.bet)
        } else {
            None
        }
    }

    /// Returns the player's hand.
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Returns the dealer's hand.
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer_hand
    }

    /// Returns the result of the most recently settled round.
    ///
    /// Cleared when a new round starts.
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Returns the number of cards left in this round's deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    fn emit(&mut self, event: Event) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn ensure_player_turn(&self, action: &str) -> Result<(), ActionError> {
        if self.state != GameState::PlayerTurn {
            log::warn!("rejected {action} while {}", self.state);
            return Err(ActionError::InvalidTransition(self.state));
        }
        Ok(())
    }

    /// Moves to `next`, or to `Bankrupt` when no chips are left.
    fn close_round(&mut self, next: GameState) {
        self.bet = 0;

        if self.wallet.balance() == 0 {
            log::info!("wallet is empty, waiting for a reset");
            self.state = GameState::Bankrupt;
            self.emit(Event::Bankrupt {
                message: String::from(BANKRUPT_MESSAGE),
            });
        } else {
            self.state = next;
        }
    }
}
