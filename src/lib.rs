//! A single-player blackjack round engine with a persistent chip wallet and
//! optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one round at a time against
//! an automated dealer: betting, the opening deal, hit/stand, dealer play,
//! and settlement. The chip balance lives in a [`Wallet`] and is written
//! through a [`WalletStore`] after every change. Rendering is left to the
//! caller, which subscribes to [`Event`]s.
//!
//! # Example
//!
//! ```no_run
//! use bjsolo::{EventLog, Game, GameOptions, MemoryStore};
//!
//! let mut game = Game::new(GameOptions::default(), MemoryStore::new(), 42).unwrap();
//! let log = EventLog::new();
//! game.subscribe(log.clone());
//!
//! game.place_bet_and_deal(10).unwrap();
//! let result = game.stand().unwrap();
//! println!("{}", result.message);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
mod sync;
pub mod wallet;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{ActionError, BetError, DeckError, ResetError, StoreError};
pub use event::{Event, EventLog, Observer};
pub use game::{Game, GameState};
pub use hand::{BLACKJACK, CardView, DealerHand, Hand, Seat};
pub use options::{DEALER_STANDS_ON, DEFAULT_BALANCE, GameOptions};
pub use result::{Outcome, RoundResult};
#[cfg(feature = "std")]
pub use wallet::FileStore;
pub use wallet::{DEFAULT_WALLET_KEY, MemoryStore, Wallet, WalletStore};
