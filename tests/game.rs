//! Game integration tests.

use std::cell::Cell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use bjsolo::{
    ActionError, BetError, Card, CardView, Deck, DeckError, Event, EventLog, Game, GameOptions,
    GameState, MemoryStore, Outcome, Rank, ResetError, Seat, StoreError, Suit, WalletStore,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Opens a default table whose first round deals `draws` in order.
fn table(draws: &[Card]) -> (Game<MemoryStore>, MemoryStore, EventLog) {
    table_with(GameOptions::default(), MemoryStore::new(), draws)
}

fn table_with(
    options: GameOptions,
    store: MemoryStore,
    draws: &[Card],
) -> (Game<MemoryStore>, MemoryStore, EventLog) {
    let mut game = Game::new(options, store.clone(), 1).unwrap();
    let log = EventLog::new();
    game.subscribe(log.clone());
    game.set_next_deck(Deck::from_draws(draws));
    (game, store, log)
}

#[test]
fn basic_round_flow() {
    let (mut game, store, _) = table(&[
        card(Suit::Hearts, Rank::Eight),   // player
        card(Suit::Clubs, Rank::Six),      // dealer hole
        card(Suit::Diamonds, Rank::Seven), // player
        card(Suit::Spades, Rank::Ten),     // dealer up
        card(Suit::Hearts, Rank::Four),    // player hit
        card(Suit::Clubs, Rank::Five),     // dealer draw
    ]);

    game.place_bet_and_deal(10).unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.bet(), Some(10));
    assert_eq!(game.balance(), 90);
    assert_eq!(game.player_hand().score(), 15);

    let hit_card = game.hit().unwrap();
    assert_eq!(hit_card.rank, Rank::Four);
    assert_eq!(game.state(), GameState::PlayerTurn);

    let result = game.stand().unwrap();
    assert_eq!(result.outcome, Outcome::Lose);
    assert_eq!(result.player_score, 19);
    assert_eq!(result.dealer_score, 21);
    assert_eq!(result.net, -10);
    assert_eq!(game.dealer_hand().len(), 3);
    assert_eq!(game.state(), GameState::Settled);
    assert_eq!(game.bet(), None);
    assert_eq!(game.balance(), 90);
    assert_eq!(store.raw().as_deref(), Some("90"));
}

#[test]
fn player_twenty_beats_dealer_nineteen() {
    let (mut game, store, _) = table(&[
        card(Suit::Hearts, Rank::King),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Queen),
        card(Suit::Clubs, Rank::Nine),
    ]);

    game.place_bet_and_deal(10).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.outcome, Outcome::Win);
    assert_eq!(result.payout, 20);
    assert_eq!(result.net, 10);
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.balance(), 110);
    assert_eq!(store.raw().as_deref(), Some("110"));
}

#[test]
fn equal_scores_push_and_return_the_bet() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Clubs, Rank::Nine),
    ]);

    game.place_bet_and_deal(25).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.outcome, Outcome::Push);
    assert_eq!(result.payout, 25);
    assert_eq!(result.net, 0);
    assert_eq!(game.balance(), 100);
}

#[test]
fn bust_on_hit_settles_without_dealer_drawing() {
    let (mut game, _, log) = table(&[
        card(Suit::Hearts, Rank::Ten),   // player
        card(Suit::Spades, Rank::Ten),   // dealer hole
        card(Suit::Clubs, Rank::Two),    // player
        card(Suit::Diamonds, Rank::Five), // dealer up, dealer on 15
        card(Suit::Clubs, Rank::King),   // player hit, 22
        card(Suit::Hearts, Rank::Nine),  // never drawn
    ]);

    game.place_bet_and_deal(10).unwrap();
    game.hit().unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.outcome, Outcome::Lose);
    assert!(result.player_bust);
    assert_eq!(result.player_score, 22);
    assert_eq!(result.dealer_score, 15);
    assert_eq!(result.net, -10);
    assert_eq!(game.dealer_hand().len(), 2);
    assert!(game.dealer_hand().is_hole_revealed());
    assert_eq!(game.cards_remaining(), 1);
    assert_eq!(game.balance(), 90);
    assert_eq!(game.state(), GameState::Settled);

    let dealer_draws = log
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::HandUpdated {
                    seat: Seat::Dealer,
                    ..
                }
            )
        })
        .count();
    assert_eq!(dealer_draws, 0);
}

#[test]
fn dealer_draws_until_seventeen() {
    let (mut game, _, log) = table(&[
        card(Suit::Hearts, Rank::Ten),    // player
        card(Suit::Clubs, Rank::Two),     // dealer hole
        card(Suit::Diamonds, Rank::Eight), // player
        card(Suit::Spades, Rank::Three),  // dealer up
        card(Suit::Hearts, Rank::Four),   // dealer 9
        card(Suit::Diamonds, Rank::Five), // dealer 14
        card(Suit::Clubs, Rank::Three),   // dealer 17
        card(Suit::Spades, Rank::Nine),   // never drawn
    ]);

    game.place_bet_and_deal(10).unwrap();
    let result = game.stand().unwrap();

    assert_eq!(result.dealer_score, 17);
    assert_eq!(result.outcome, Outcome::Win);
    assert_eq!(game.dealer_hand().len(), 5);
    assert_eq!(game.cards_remaining(), 1);

    let dealer_scores: Vec<u8> = log
        .events()
        .iter()
        .filter_map(|event| match event {
            Event::HandUpdated {
                seat: Seat::Dealer,
                score,
                ..
            } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(dealer_scores, vec![9, 14, 17]);
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ace),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Clubs, Rank::Six),
    ]);

    game.place_bet_and_deal(10).unwrap();
    let result = game.stand().unwrap();

    assert!(game.dealer_hand().is_soft());
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(result.dealer_score, 17);
    assert_eq!(result.outcome, Outcome::Win);
}

#[test]
fn dealer_bust_pays_the_player() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Two),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Hearts, Rank::King),
    ]);

    game.place_bet_and_deal(40).unwrap();
    let result = game.stand().unwrap();

    assert!(result.dealer_bust);
    assert_eq!(result.dealer_score, 26);
    assert_eq!(result.outcome, Outcome::Win);
    assert_eq!(game.balance(), 140);
}

#[test]
fn hitting_twenty_one_stands_automatically() {
    let draws = [
        card(Suit::Hearts, Rank::Five),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Six),
        card(Suit::Clubs, Rank::Seven),
        card(Suit::Hearts, Rank::King),
    ];

    let (mut game, _, _) = table(&draws);
    game.place_bet_and_deal(10).unwrap();
    let drawn = game.hit().unwrap();
    assert_eq!(drawn.rank, Rank::King);
    assert_eq!(game.state(), GameState::Settled);
    assert_eq!(game.last_result().unwrap().outcome, Outcome::Win);
    assert_eq!(game.balance(), 110);

    let options = GameOptions::default().with_auto_stand_on_21(false);
    let (mut game, _, _) = table_with(options, MemoryStore::new(), &draws);
    game.place_bet_and_deal(10).unwrap();
    game.hit().unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.player_hand().score(), 21);
}

#[test]
fn round_start_hides_the_hole_card_and_flags_a_natural() {
    let hole = card(Suit::Spades, Rank::Ten);
    let up = card(Suit::Clubs, Rank::Seven);
    let (mut game, _, log) = table(&[
        card(Suit::Hearts, Rank::Ace),
        hole,
        card(Suit::Diamonds, Rank::King),
        up,
    ]);

    game.place_bet_and_deal(10).unwrap();
    assert!(!game.dealer_hand().is_hole_revealed());
    assert_eq!(game.dealer_hand().visible_score(), 7);

    let events = log.take();
    let Event::RoundStarted {
        player,
        dealer,
        player_score,
        is_natural,
        bet,
        balance,
    } = &events[0]
    else {
        panic!("expected a round start, got {:?}", events[0]);
    };
    assert_eq!(player.len(), 2);
    assert_eq!(dealer, &vec![CardView::Hidden, CardView::Shown(up)]);
    assert_eq!(*player_score, 21);
    assert!(*is_natural);
    assert_eq!(*bet, 10);
    assert_eq!(*balance, 90);

    let result = game.stand().unwrap();
    assert!(result.player_natural);
    assert_eq!(result.payout, 20);

    let Event::RoundSettled { dealer, .. } = &log.events()[0] else {
        panic!("expected settlement");
    };
    assert_eq!(dealer[0], hole);
}

#[test]
fn invalid_bets_are_rejected_without_changes() {
    let (mut game, store, log) = table(&[]);

    for amount in [0, -5] {
        assert!(matches!(
            game.place_bet_and_deal(amount),
            Err(BetError::InvalidBet)
        ));
    }
    for input in ["", "abc", "1.5", "-3"] {
        assert!(matches!(
            game.place_bet_str(input),
            Err(BetError::InvalidBet)
        ));
    }

    assert_eq!(game.balance(), 100);
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(store.raw(), None);
    assert!(log.is_empty());
}

#[test]
fn bet_over_balance_is_rejected() {
    let (mut game, _, _) = table(&[]);

    let err = game.place_bet_and_deal(101).unwrap_err();
    assert!(matches!(
        err,
        BetError::InsufficientChips {
            bet: 101,
            balance: 100
        }
    ));
    assert_eq!(game.balance(), 100);
    assert_eq!(game.state(), GameState::Idle);
}

#[test]
fn typed_bet_is_parsed() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Seven),
        card(Suit::Clubs, Rank::Seven),
    ]);

    game.place_bet_str(" 15 ").unwrap();
    assert_eq!(game.bet(), Some(15));
    assert_eq!(game.balance(), 85);
}

#[test]
fn actions_outside_their_phase_are_rejected() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Seven),
        card(Suit::Clubs, Rank::Seven),
    ]);

    assert!(matches!(
        game.hit(),
        Err(ActionError::InvalidTransition(GameState::Idle))
    ));
    assert!(matches!(
        game.stand(),
        Err(ActionError::InvalidTransition(GameState::Idle))
    ));
    assert!(matches!(
        game.abandon(),
        Err(ActionError::InvalidTransition(GameState::Idle))
    ));

    game.place_bet_and_deal(10).unwrap();
    assert!(matches!(
        game.place_bet_and_deal(10),
        Err(BetError::InvalidTransition(GameState::PlayerTurn))
    ));
    assert!(matches!(
        game.reset(),
        Err(ResetError::InvalidTransition(GameState::PlayerTurn))
    ));
    assert_eq!(game.balance(), 90);

    game.stand().unwrap();
    assert!(matches!(
        game.hit(),
        Err(ActionError::InvalidTransition(GameState::Settled))
    ));
}

#[test]
fn settled_table_accepts_the_next_bet() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::King),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Queen),
        card(Suit::Clubs, Rank::Nine),
    ]);

    game.place_bet_and_deal(10).unwrap();
    game.stand().unwrap();
    assert_eq!(game.state(), GameState::Settled);

    game.place_bet_and_deal(50).unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.balance(), 60);
    assert!(game.last_result().is_none());
    assert_eq!(game.player_hand().len(), 2);
    assert_eq!(game.cards_remaining(), 48);
}

#[test]
fn losing_the_last_chip_goes_bankrupt_until_reset() {
    let store = MemoryStore::new();
    store.set_raw("10");
    let (mut game, store, log) = table_with(
        GameOptions::default(),
        store,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Clubs, Rank::Nine),
        ],
    );
    assert_eq!(game.balance(), 10);

    game.place_bet_and_deal(10).unwrap();
    let result = game.stand().unwrap();
    assert_eq!(result.outcome, Outcome::Lose);
    assert_eq!(result.balance, 0);
    assert_eq!(game.state(), GameState::Bankrupt);
    assert!(matches!(log.events().last(), Some(Event::Bankrupt { .. })));

    assert!(matches!(
        game.place_bet_and_deal(5),
        Err(BetError::InvalidTransition(GameState::Bankrupt))
    ));
    assert!(matches!(
        game.place_bet_str("abc"),
        Err(BetError::InvalidTransition(GameState::Bankrupt))
    ));

    game.reset().unwrap();
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.balance(), 100);
    assert_eq!(store.raw().as_deref(), Some("100"));
    assert_eq!(
        log.events().last(),
        Some(&Event::WalletReset { balance: 100 })
    );
    assert!(game.dealer_hand().is_empty());
}

#[test]
fn persisted_zero_opens_bankrupt_and_garbage_falls_back() {
    let store = MemoryStore::new();
    store.set_raw("0");
    let game = Game::new(GameOptions::default(), store, 3).unwrap();
    assert_eq!(game.state(), GameState::Bankrupt);
    assert_eq!(game.balance(), 0);

    let store = MemoryStore::new();
    store.set_raw("lots");
    let game = Game::new(GameOptions::default(), store, 3).unwrap();
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.balance(), 100);
}

#[test]
fn abandoning_forfeits_the_bet() {
    let draws = [
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Seven),
        card(Suit::Clubs, Rank::Nine),
    ];

    let (mut game, store, log) = table(&draws);
    game.place_bet_and_deal(30).unwrap();
    assert_eq!(game.abandon().unwrap(), 30);
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.balance(), 70);
    assert_eq!(store.raw().as_deref(), Some("70"));
    assert!(game.last_result().is_none());
    assert_eq!(
        log.events().last(),
        Some(&Event::RoundAbandoned { bet: 30 })
    );

    let (mut game, _, _) = table(&draws);
    game.place_bet_and_deal(100).unwrap();
    game.abandon().unwrap();
    assert_eq!(game.state(), GameState::Bankrupt);
}

#[test]
fn short_deck_reports_empty_deck() {
    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Two),
        card(Suit::Spades, Rank::Three),
        card(Suit::Diamonds, Rank::Four),
    ]);
    assert!(matches!(
        game.place_bet_and_deal(10),
        Err(BetError::EmptyDeck(DeckError::Empty))
    ));
    assert_eq!(game.balance(), 100);
    assert_eq!(game.state(), GameState::Idle);

    let (mut game, _, _) = table(&[
        card(Suit::Hearts, Rank::Two),
        card(Suit::Spades, Rank::Three),
        card(Suit::Diamonds, Rank::Four),
        card(Suit::Clubs, Rank::Five),
    ]);
    game.place_bet_and_deal(10).unwrap();
    assert!(matches!(
        game.hit(),
        Err(ActionError::EmptyDeck(DeckError::Empty))
    ));
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn stand_keeps_the_turn_when_the_dealer_cannot_finish() {
    let (mut game, _, log) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Two),
        card(Suit::Diamonds, Rank::Nine),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Hearts, Rank::Four),
    ]);
    game.place_bet_and_deal(10).unwrap();
    let events = log.len();

    assert!(matches!(
        game.stand(),
        Err(ActionError::EmptyDeck(DeckError::Empty))
    ));
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert!(!game.dealer_hand().is_hole_revealed());
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.cards_remaining(), 1);
    assert_eq!(log.len(), events);

    assert_eq!(game.abandon().unwrap(), 10);
    assert_eq!(game.state(), GameState::Idle);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn huge_balances_settle_without_overflow() {
    let stake: usize = 1 << 62;
    let store = MemoryStore::new();
    store.set_raw(stake.to_string());
    let (mut game, store, _) = table_with(
        GameOptions::default(),
        store,
        &[
            card(Suit::Hearts, Rank::King),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Diamonds, Rank::Queen),
            card(Suit::Clubs, Rank::Nine),
        ],
    );

    game.place_bet_and_deal(i64::try_from(stake).unwrap()).unwrap();
    assert_eq!(game.balance(), 0);

    let result = game.stand().unwrap();
    assert_eq!(result.outcome, Outcome::Win);
    assert_eq!(result.payout, stake * 2);
    assert_eq!(result.net, isize::try_from(stake).unwrap());
    assert_eq!(game.balance(), stake * 2);
    assert_eq!(store.raw(), Some((stake * 2).to_string()));
}

#[test]
fn any_rng_can_drive_the_shuffle() {
    let open = || {
        let rng = ChaCha20Rng::seed_from_u64(21);
        Game::with_rng(GameOptions::default(), MemoryStore::new(), rng).unwrap()
    };
    let mut a = open();
    let mut b = open();

    a.place_bet_and_deal(10).unwrap();
    b.place_bet_and_deal(10).unwrap();

    assert_eq!(a.player_hand(), b.player_hand());
    assert_eq!(a.dealer_hand().cards(), b.dealer_hand().cards());
    assert_eq!(a.cards_remaining(), 48);
}

#[test]
fn same_seed_deals_the_same_round() {
    let mut a = Game::new(GameOptions::default(), MemoryStore::new(), 7).unwrap();
    let mut b = Game::new(GameOptions::default(), MemoryStore::new(), 7).unwrap();

    a.place_bet_and_deal(10).unwrap();
    b.place_bet_and_deal(10).unwrap();

    assert_eq!(a.player_hand(), b.player_hand());
    assert_eq!(a.dealer_hand().cards(), b.dealer_hand().cards());
    assert_eq!(a.cards_remaining(), 48);
}

/// A store whose writes can be switched off.
struct FlakyStore {
    inner: MemoryStore,
    failing: Rc<Cell<bool>>,
}

impl WalletStore for FlakyStore {
    fn load(&self) -> Result<Option<usize>, StoreError> {
        self.inner.load()
    }

    fn save(&mut self, balance: usize) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        self.inner.save(balance)
    }
}

#[test]
fn failed_debit_leaves_the_table_idle() {
    let failing = Rc::new(Cell::new(true));
    let store = FlakyStore {
        inner: MemoryStore::new(),
        failing: Rc::clone(&failing),
    };
    let mut game = Game::new(GameOptions::default(), store, 1).unwrap();

    assert!(matches!(
        game.place_bet_and_deal(10),
        Err(BetError::Store(StoreError::Unavailable))
    ));
    assert_eq!(game.balance(), 100);
    assert_eq!(game.state(), GameState::Idle);
}

#[test]
fn failed_settlement_write_keeps_the_result_and_can_be_retried() {
    let failing = Rc::new(Cell::new(false));
    let memory = MemoryStore::new();
    let store = FlakyStore {
        inner: memory.clone(),
        failing: Rc::clone(&failing),
    };
    let mut game = Game::new(GameOptions::default(), store, 1).unwrap();
    game.set_next_deck(Deck::from_draws(&[
        card(Suit::Hearts, Rank::King),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Queen),
        card(Suit::Clubs, Rank::Nine),
    ]));

    game.place_bet_and_deal(10).unwrap();
    assert_eq!(memory.raw().as_deref(), Some("90"));

    failing.set(true);
    assert!(matches!(
        game.stand(),
        Err(ActionError::Store(StoreError::Unavailable))
    ));
    assert_eq!(game.state(), GameState::Settled);
    assert_eq!(game.balance(), 110);
    assert_eq!(memory.raw().as_deref(), Some("90"));

    failing.set(false);
    game.persist().unwrap();
    assert_eq!(memory.raw().as_deref(), Some("110"));
}

#[test]
fn closure_observers_see_events_in_order() {
    let seen = Rc::new(Cell::new(0_usize));
    let counter = Rc::clone(&seen);

    let (mut game, _, log) = table(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Diamonds, Rank::Two),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Hearts, Rank::King),
    ]);
    game.subscribe(move |_: &Event| counter.set(counter.get() + 1));

    game.place_bet_and_deal(10).unwrap();
    game.stand().unwrap();

    let events = log.events();
    assert_eq!(seen.get(), events.len());
    assert!(matches!(events[0], Event::RoundStarted { .. }));
    assert!(matches!(
        events[1],
        Event::HandUpdated {
            seat: Seat::Dealer,
            score: 26,
            ..
        }
    ));
    assert!(matches!(events[2], Event::RoundSettled { .. }));
    assert_eq!(events.len(), 3);
}
