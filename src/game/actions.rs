use crate::card::Card;
use crate::error::{ActionError, DeckError, ResetError};
use crate::event::Event;
use crate::hand::{BLACKJACK, Seat};
use crate::result::RoundResult;
use crate::wallet::WalletStore;

use super::{Game, GameState};

impl<S: WalletStore> Game<S> {
    /// Player action: Hit (draw a card).
    ///
    /// A bust settles the round at once as a loss, without the dealer
    /// drawing. Reaching 21 stands automatically when
    /// [`auto_stand_on_21`](crate::GameOptions::auto_stand_on_21) is set.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or the deck is empty.
    /// If the round settles but the new balance cannot be persisted, the
    /// round stays settled and [`ActionError::Store`] is returned.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn("hit")?;

        let card = self.deck.draw()?;
        self.player_hand.add_card(card);

        let score = self.player_hand.score();
        log::debug!("player draws {card}, score {score}");

        let event = Event::HandUpdated {
            seat: Seat::Player,
            cards: self.player_hand.cards().to_vec(),
            score,
            is_natural: self.player_hand.is_natural(),
        };
        self.emit(event);

        if score > BLACKJACK {
            self.state = GameState::DealerTurn;
            self.settle()?;
        } else if score == BLACKJACK && self.options.auto_stand_on_21 {
            log::debug!("player reached {BLACKJACK}, standing");
            self.stand()?;
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// The dealer then plays out its hand and the round is settled.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, or
    /// [`ActionError::EmptyDeck`] if the deck cannot finish the dealer's
    /// hand. The table then stays in [`GameState::PlayerTurn`] with the hole
    /// card hidden. If the new balance cannot be persisted, the round stays
    /// settled and [`ActionError::Store`] is returned.
    pub fn stand(&mut self) -> Result<RoundResult, ActionError> {
        self.ensure_player_turn("stand")?;
        if !self.dealer_can_finish() {
            log::warn!("deck cannot finish the dealer's hand");
            return Err(DeckError::Empty.into());
        }

        self.state = GameState::DealerTurn;
        self.dealer_play()?;
        self.settle()
    }

    /// Walks away from the round in progress.
    ///
    /// The bet stays lost and nothing is credited. Returns the forfeited bet.
    ///
    /// # Errors
    ///
    /// Returns an error if no round is in progress.
    pub fn abandon(&mut self) -> Result<usize, ActionError> {
        if !self.state.is_round_in_progress() {
            log::warn!("rejected abandon while {}", self.state);
            return Err(ActionError::InvalidTransition(self.state));
        }

        let bet = self.bet;
        log::info!("round abandoned, {bet} chips forfeited");
        self.emit(Event::RoundAbandoned { bet });
        self.close_round(GameState::Idle);

        Ok(bet)
    }

    /// Restores the starting balance and clears the table.
    ///
    /// Required to leave [`GameState::Bankrupt`], and also allowed between
    /// rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the balance cannot be
    /// persisted. Nothing changes on error.
    pub fn reset(&mut self) -> Result<(), ResetError> {
        if self.state.is_round_in_progress() {
            log::warn!("rejected reset while {}", self.state);
            return Err(ResetError::InvalidTransition(self.state));
        }

        let balance = self.options.starting_balance;
        self.wallet.replace(balance)?;

        self.bet = 0;
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.last_result = None;
        self.state = if balance == 0 {
            GameState::Bankrupt
        } else {
            GameState::Idle
        };

        log::info!("wallet reset to {balance}");
        self.emit(Event::WalletReset { balance });

        Ok(())
    }
}
