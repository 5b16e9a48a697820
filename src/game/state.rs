//! Game state types.

use core::fmt;

/// Phase of the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// No round is active; a bet may be placed.
    Idle,
    /// Cards are dealt and the player may hit or stand.
    PlayerTurn,
    /// The dealer is drawing.
    DealerTurn,
    /// The last round was paid out; a new bet may be placed.
    Settled,
    /// The balance is zero; only a reset is accepted.
    Bankrupt,
}

impl GameState {
    /// Returns whether a new round can be started.
    #[must_use]
    pub const fn accepts_bets(self) -> bool {
        matches!(self, Self::Idle | Self::Settled)
    }

    /// Returns whether a bet is on the table and not yet settled.
    #[must_use]
    pub const fn is_round_in_progress(self) -> bool {
        matches!(self, Self::PlayerTurn | Self::DealerTurn)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::PlayerTurn => "waiting for the player",
            Self::DealerTurn => "the dealer is playing",
            Self::Settled => "the round is settled",
            Self::Bankrupt => "bankrupt",
        })
    }
}
