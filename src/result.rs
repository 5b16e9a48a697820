//! Round outcomes and settlement.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::hand::BLACKJACK;

/// Result of a settled round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Dealer busts or the player has the higher score.
    Win,
    /// Player busts or the dealer has the higher score.
    Lose,
    /// Equal scores; the bet is returned.
    Push,
}

impl Outcome {
    /// Compares final scores.
    ///
    /// A player bust loses regardless of the dealer's score, so it is
    /// checked before the dealer bust.
    ///
    /// ```
    /// use bjsolo::Outcome;
    ///
    /// assert_eq!(Outcome::decide(20, 19), Outcome::Win);
    /// assert_eq!(Outcome::decide(18, 18), Outcome::Push);
    /// assert_eq!(Outcome::decide(22, 23), Outcome::Lose);
    /// assert_eq!(Outcome::decide(12, 22), Outcome::Win);
    /// ```
    #[must_use]
    pub const fn decide(player_score: u8, dealer_score: u8) -> Self {
        if player_score > BLACKJACK {
            Self::Lose
        } else if dealer_score > BLACKJACK || player_score > dealer_score {
            Self::Win
        } else if player_score < dealer_score {
            Self::Lose
        } else {
            Self::Push
        }
    }

    /// Returns the chips credited back for a bet that was debited up front.
    #[must_use]
    pub const fn payout(self, bet: usize) -> usize {
        match self {
            Self::Win => bet.saturating_mul(2),
            Self::Push => bet,
            Self::Lose => 0,
        }
    }
}

/// Summary of a settled round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// Win, lose, or push.
    pub outcome: Outcome,
    /// The bet placed for the round.
    pub bet: usize,
    /// Chips credited at settlement (bet already debited).
    pub payout: usize,
    /// Net change over the round (positive = profit, negative = loss).
    pub net: isize,
    /// The player's final score.
    pub player_score: u8,
    /// The dealer's final score.
    pub dealer_score: u8,
    /// Whether the player busted.
    pub player_bust: bool,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the player was dealt a natural.
    pub player_natural: bool,
    /// The balance after settlement.
    pub balance: usize,
    /// Human-readable summary.
    pub message: String,
}

pub(crate) fn settle_message(outcome: Outcome, bet: usize, player_bust: bool) -> String {
    match outcome {
        Outcome::Win => format!("You win {bet} chips!"),
        Outcome::Lose if player_bust => format!("You busted! Dealer wins {bet} chips."),
        Outcome::Lose => format!("Dealer wins. You lost {bet} chips."),
        Outcome::Push => String::from("Push. Your bet is returned."),
    }
}
