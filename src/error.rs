//! Error types for game operations.

use thiserror::Error;

use crate::game::GameState;

/// Errors raised by the draw pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Every card has already been drawn.
    #[error("the deck is empty")]
    Empty,
}

/// Errors raised by a wallet store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[error("wallet i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing storage cannot be reached.
    #[error("wallet storage is unavailable")]
    Unavailable,
}

/// Errors that can occur when placing a bet and dealing.
#[derive(Debug, Error)]
pub enum BetError {
    /// The bet is zero, negative, or not a number.
    #[error("bet must be a positive whole number of chips")]
    InvalidBet,
    /// The bet exceeds the chip balance.
    #[error("insufficient chips: bet of {bet} exceeds balance of {balance}")]
    InsufficientChips {
        /// The requested bet.
        bet: usize,
        /// The balance at the time of the request.
        balance: usize,
    },
    /// A round cannot start in the current state.
    #[error("cannot place a bet while {0}")]
    InvalidTransition(GameState),
    /// The deck ran out while dealing.
    #[error(transparent)]
    EmptyDeck(#[from] DeckError),
    /// The debit could not be persisted; nothing was changed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur during player actions (hit, stand, abandon).
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action is not valid in the current state.
    #[error("action not allowed while {0}")]
    InvalidTransition(GameState),
    /// The deck ran out mid-round.
    #[error(transparent)]
    EmptyDeck(#[from] DeckError),
    /// The round settled but the new balance could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur when resetting the wallet.
#[derive(Debug, Error)]
pub enum ResetError {
    /// A round is in progress.
    #[error("cannot reset while {0}")]
    InvalidTransition(GameState),
    /// The starting balance could not be persisted; nothing was changed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
