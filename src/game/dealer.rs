extern crate alloc;


use crate::error::ActionError;
use crate::event::Event;
use crate::hand::{Seat, score};
use crate::options::DEALER_STANDS_ON;
use crate::result::{Outcome, RoundResult, settle_message};
use crate::wallet::WalletStore;

use super::{Game, GameState};

impl<S: WalletStore> Game<S> {
    /// Dealer plays their hand according to the rules.
    ///
    /// The dealer reveals the hole card and draws while below 17, standing
    /// on any 17 including a soft one.
    pub(super) fn dealer_play(&mut self) -> Result<(), ActionError> {
        self.dealer_hand.reveal_hole();

        while self.dealer_hand.score() < DEALER_STANDS_ON {
            let card = self.deck.draw()?;
            self.dealer_hand.add_card(card);

            let score = self.dealer_hand.score();
            log::debug!("dealer draws {card}, score {score}");

            let event = Event::HandUpdated {
                seat: Seat::Dealer,
                cards: self.dealer_hand.cards().to_vec(),
                score,
                is_natural: false,
            };
            self.emit(event);
        }

        Ok(())
    }

    /// Returns whether the remaining deck holds enough cards for the dealer
    /// to reach 17.
    pub(super) fn dealer_can_finish(&self) -> bool {
        let mut cards = self.dealer_hand.cards().to_vec();
        let mut pile = self.deck.cards().iter().rev();

        while score(&cards) < DEALER_STANDS_ON {
            match pile.next() {
                Some(&card) => cards.push(card),
                None => return false,
            }
        }

        true
    }

    /// Compares the final hands and pays out.
    ///
    /// The bet was debited when placed, so a win credits twice the bet, a
    /// push credits the bet back and a loss credits nothing. The round is
    /// settled even when the store write fails; that error is returned
    /// after the state change.
    pub(super) fn settle(&mut self) -> Result<RoundResult, ActionError> {
        self.dealer_hand.reveal_hole();

        let bet = self.bet;
        let player_score = self.player_hand.score();
        let dealer_score = self.dealer_hand.score();
        let player_bust = self.player_hand.is_bust();

        let outcome = Outcome::decide(player_score, dealer_score);
        let payout = outcome.payout(bet);
        let stored = if payout > 0 {
            self.wallet.credit(payout)
        } else {
            Ok(())
        };

        let net = net_change(payout, bet);

        let result = RoundResult {
            outcome,
            bet,
            payout,
            net,
            player_score,
            dealer_score,
            player_bust,
            dealer_bust: self.dealer_hand.is_bust(),
            player_natural: self.player_hand.is_natural(),
            balance: self.wallet.balance(),
            message: settle_message(outcome, bet, player_bust),
        };

        log::info!(
            "round settled: {outcome:?}, player {player_score} vs dealer {dealer_score}, net {net}"
        );

        self.last_result = Some(result.clone());
        let event = Event::RoundSettled {
            result: result.clone(),
            dealer: self.dealer_hand.cards().to_vec(),
        };
        self.emit(event);
        self.close_round(GameState::Settled);

        if let Err(err) = stored {
            log::error!("failed to persist balance after settlement: {err}");
            return Err(err.into());
        }

        Ok(result)
    }
}

/// Chips won or lost over the round, clamped to the range of `isize`.
fn net_change(payout: usize, bet: usize) -> isize {
    if payout >= bet {
        isize::try_from(payout - bet).unwrap_or(isize::MAX)
    } else {
        isize::try_from(bet - payout).map_or(isize::MIN, |lost| -lost)
    }
}
