use crate::card::DECK_SIZE;
use crate::deck::Deck;
use crate::error::{BetError, DeckError};
use crate::event::Event;
use crate::wallet::WalletStore;

use super::{Game, GameState};

/// Two cards each for the player and the dealer.
const INITIAL_DEAL: usize = 4;

impl<S: WalletStore> Game<S> {
    /// Parses a bet typed by the player and starts a round with it.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InvalidTransition`] if the game is not accepting
    /// bets, [`BetError::InvalidBet`] if `input` is not a whole number,
    /// otherwise the same errors as [`Game::place_bet_and_deal`].
    pub fn place_bet_str(&mut self, input: &str) -> Result<(), BetError> {
        self.ensure_accepts_bets()?;

        let amount = input
            .trim()
            .parse::<i64>()
            .map_err(|_| BetError::InvalidBet)?;
        self.place_bet_and_deal(amount)
    }

    /// Places a bet, shuffles a fresh deck, and deals the opening hands.
    ///
    /// Cards go to the player, the dealer, the player, then the dealer. The
    /// dealer's first card is the face-down hole card. On success the game
    /// is in [`GameState::PlayerTurn`] and the bet has been debited.
    ///
    /// # Errors
    ///
    /// Returns an error without changing anything if the game is not
    /// accepting bets, the amount is not positive, the amount exceeds the
    /// balance, or the debit cannot be persisted.
    pub fn place_bet_and_deal(&mut self, amount: i64) -> Result<(), BetError> {
        self.ensure_accepts_bets()?;

        let bet = usize::try_from(amount)
            .ok()
            .filter(|&bet| bet > 0)
            .ok_or(BetError::InvalidBet)?;

        let balance = self.wallet.balance();
        if bet > balance {
            return Err(BetError::InsufficientChips { bet, balance });
        }

        let available = self.next_deck.as_ref().map_or(DECK_SIZE, Deck::len);
        if available < INITIAL_DEAL {
            return Err(DeckError::Empty.into());
        }

        self.wallet.debit(bet)?;

        self.deck = match self.next_deck.take() {
            Some(deck) => deck,
            None => Deck::shuffled(&mut *self.rng),
        };
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.last_result = None;
        self.bet = bet;

        for _ in 0..2 {
            self.player_hand.add_card(self.deck.draw()?);
            self.dealer_hand.add_card(self.deck.draw()?);
        }

        self.state = GameState::PlayerTurn;

        let player_score = self.player_hand.score();
        log::debug!(
            "dealt {bet}-chip round: player {:?} ({player_score}), dealer shows {:?}",
            self.player_hand.cards(),
            self.dealer_hand.cards().get(1),
        );

        let event = Event::RoundStarted {
            player: self.player_hand.cards().to_vec(),
            dealer: self.dealer_hand.view(),
            player_score,
            is_natural: self.player_hand.is_natural(),
            bet,
            balance: self.wallet.balance(),
        };
        self.emit(event);

        Ok(())
    }

    fn ensure_accepts_bets(&self) -> Result<(), BetError> {
        if self.state.accepts_bets() {
            Ok(())
        } else {
            log::warn!("rejected bet while {}", self.state);
            Err(BetError::InvalidTransition(self.state))
        }
    }
}
