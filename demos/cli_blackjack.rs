//! CLI blackjack demo: a terminal presentation adapter.
//!
//! Chips are kept in `blackjack_chips.txt` in the working directory, or in
//! the file named by the first argument. Set `RUST_LOG=debug` to see the
//! engine's log.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjsolo::{
    BetError, Card, CardView, Event, FileStore, Game, GameOptions, GameState, Outcome, Seat,
};

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "blackjack_chips.txt".to_string());
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let mut game = match Game::new(GameOptions::default(), FileStore::new(&path), seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Could not open wallet at {path}: {err}");
            return;
        }
    };
    game.subscribe(render);

    println!("Blackjack CLI demo (type 'q' to quit)");

    loop {
        match game.state() {
            GameState::Bankrupt => {
                match prompt_line("Reset your chips to play again? (y/n): ").as_str() {
                    "y" | "yes" => {
                        if let Err(err) = game.reset() {
                            println!("Reset error: {err}");
                        }
                    }
                    _ => break,
                }
            }
            GameState::Idle | GameState::Settled => {
                let balance = game.balance();
                let input = prompt_line(&format!("\nChips: {balance}. Bet (q to quit): "));
                if input == "q" || input == "quit" {
                    println!("Goodbye.");
                    break;
                }

                match game.place_bet_str(&input) {
                    Ok(()) => {}
                    Err(BetError::InvalidBet) => println!("Please enter a valid bet."),
                    Err(BetError::InsufficientChips { .. }) => println!("Not enough chips!"),
                    Err(err) => println!("Bet error: {err}"),
                }
            }
            GameState::PlayerTurn => {
                let result = match prompt_line(&format!("{} ", colorize("[h]it [s]tand", "32")))
                    .as_str()
                {
                    "h" | "hit" => game.hit().map(|_| ()),
                    "s" | "stand" => game.stand().map(|_| ()),
                    "q" | "quit" => {
                        if let Ok(bet) = game.abandon() {
                            println!("You walk away and forfeit {bet} chips.");
                        }
                        break;
                    }
                    _ => {
                        println!("Unknown action.");
                        continue;
                    }
                };

                if let Err(err) = result {
                    println!("Action error: {err}");
                }
            }
            GameState::DealerTurn => {
                // Only reachable after an error mid-draw.
                let _ = game.abandon();
            }
        }
    }
}

fn render(event: &Event) {
    match event {
        Event::RoundStarted {
            player,
            dealer,
            player_score,
            is_natural,
            bet,
            ..
        } => {
            println!("\nBet placed: {bet}");
            println!("Dealer: {}", format_view(dealer));
            println!("You:    {} (value {player_score})", format_hand(player));
            if *is_natural {
                println!("{}", colorize("BLACKJACK!", "33"));
            }
        }
        Event::HandUpdated {
            seat: Seat::Player,
            cards,
            score,
            ..
        } => println!("You:    {} (value {score})", format_hand(cards)),
        Event::HandUpdated {
            seat: Seat::Dealer,
            cards,
            score,
            ..
        } => println!("Dealer draws: {} (value {score})", format_hand(cards)),
        Event::RoundSettled { result, dealer } => {
            println!(
                "Dealer: {} (value {})",
                format_hand(dealer),
                result.dealer_score
            );
            let code = match result.outcome {
                Outcome::Win => "32",
                Outcome::Lose => "31",
                Outcome::Push => "33",
            };
            println!("{}", colorize(&result.message, code));
        }
        Event::RoundAbandoned { .. } => {}
        Event::Bankrupt { message } => println!("{}", colorize(message, "31")),
        Event::WalletReset { balance } => println!("Chips restored to {balance}."),
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return "q".to_string(),
        Ok(_) => {}
    }
    input.trim().to_lowercase()
}

fn format_view(cards: &[CardView]) -> String {
    cards
        .iter()
        .map(|view| match view {
            CardView::Hidden => "??".to_string(),
            CardView::Shown(card) => format_card(card),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let code = if card.suit.is_red() { "31" } else { "34" };
    colorize(&card.to_string(), code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
