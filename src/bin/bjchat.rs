//! Terminal front end: one blackjack table per session, with the chat
//! sidechannel polled alongside.
//!
//! `bjchat` plays; `bjchat relay` runs the forwarder that makes chat
//! messages visible to every session.

use core::error::Error;
use core::time::Duration;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use bjchat::{
    Action, ActionError, Card, ChatError, ChatIdentity, ChatMessage, ChatOptions, ChatSession,
    DealerPacer, FileRelay, Forwarder, Suit, Table, TableOptions, TableView,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bjchat", version, about = "Blackjack in the terminal, with chat")]
struct Cli {
    /// Directory holding the chat relay files.
    #[arg(long, global = true, default_value = "/tmp")]
    chat_dir: PathBuf,
    /// Milliseconds between chat polls.
    #[arg(long, global = true, default_value_t = 1000)]
    poll_ms: u64,
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forward chat messages from the outbox to the shared feed.
    Relay {
        /// Keep the existing chat files instead of clearing them on start.
        #[arg(long)]
        keep_history: bool,
    },
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// Name shown next to your chat messages.
    #[arg(long, env = "SSH_USERNAME", default_value = "player")]
    username: String,
    /// Identifier for this session; generated when absent.
    #[arg(long, env = "SSH_SESSION_ID")]
    session_id: Option<String>,
    /// Decks in the shoe.
    #[arg(long, default_value_t = 6)]
    decks: u8,
    /// Shuffle seed; taken from the clock when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between dealer draws.
    #[arg(long, default_value_t = 1000)]
    pace_ms: u64,
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let chat_options =
        ChatOptions::in_dir(&cli.chat_dir).with_poll_interval(Duration::from_millis(cli.poll_ms));

    match cli.command {
        Some(Command::Relay { keep_history }) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
            relay(&chat_options, keep_history)?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
            play(&chat_options, cli.play);
        }
    }
    Ok(())
}

fn clock_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

fn relay(options: &ChatOptions, keep_history: bool) -> Result<(), ChatError> {
    let mut forwarder = Forwarder::new(options);
    if keep_history {
        let skipped = forwarder.skip_backlog()?;
        log::info!("skipping {skipped} lines already in the outbox");
    } else {
        forwarder.clear_files()?;
    }

    log::info!(
        "relaying {} -> {}",
        options.outbox_path.display(),
        options.feed_path.display()
    );

    loop {
        if let Err(err) = forwarder.pump() {
            log::warn!("relay pass failed: {err}");
        }
        thread::sleep(options.poll_interval);
    }
}

fn play(chat_options: &ChatOptions, args: PlayArgs) {
    let seed = args.seed.unwrap_or_else(|| clock_nanos() as u64);
    let table_options = TableOptions::default()
        .with_decks(args.decks)
        .with_dealer_pace(Duration::from_millis(args.pace_ms));
    let mut table = Table::new(table_options, seed);
    let mut pacer = DealerPacer::new(table.options.dealer_pace);

    let session_id = args
        .session_id
        .unwrap_or_else(|| format!("session-{}", clock_nanos()));
    log::info!("session {session_id} as {}", args.username);
    let identity = ChatIdentity::new(args.username, session_id);
    let mut chat = ChatSession::new(FileRelay::new(chat_options), identity);

    let input = spawn_input_reader();

    println!("Blackjack. Commands: [d]eal [h]it [s]tand, say <message>, [q]uit");
    render(&table.view());

    let mut next_poll = Instant::now();
    loop {
        let now = Instant::now();
        if now >= next_poll {
            match chat.poll() {
                Ok(messages) => messages.iter().for_each(print_chat),
                Err(err) => log::warn!("chat poll failed: {err}"),
            }
            next_poll = now + chat_options.poll_interval;
        }

        match pacer.poll(&mut table, now) {
            Ok(Some(_)) => render(&table.view()),
            Ok(None) => {}
            Err(err) => {
                println!("Dealer error: {err}");
                render(&table.view());
            }
        }

        let deadline = pacer
            .next_deadline()
            .map_or(next_poll, |due| due.min(next_poll));
        match input.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(line) => {
                if let Flow::Quit = handle_line(&line, &mut table, &mut pacer, &mut chat) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    pacer.cancel();
    table.abandon_round();
    println!("Goodbye.");
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn handle_line(
    line: &str,
    table: &mut Table,
    pacer: &mut DealerPacer,
    chat: &mut ChatSession<FileRelay>,
) -> Flow {
    let line = line.trim();
    if let Some(text) = line.strip_prefix("say ") {
        match chat.send(text) {
            Ok(Some(message)) => print_chat(&message),
            Ok(None) => {}
            Err(err) => println!("Chat error: {err}"),
        }
        return Flow::Continue;
    }

    let action = match line.to_lowercase().as_str() {
        "d" | "deal" => Action::Deal,
        "h" | "hit" => Action::Hit,
        "s" | "stand" => Action::Stand,
        "q" | "quit" => return Flow::Quit,
        "" => return Flow::Continue,
        _ => {
            println!("Unknown command.");
            return Flow::Continue;
        }
    };

    match table.apply(action) {
        Ok(()) => {
            if action == Action::Stand {
                pacer.arm(Instant::now());
            }
            render(&table.view());
        }
        Err(err @ ActionError::InvalidAction { .. }) => println!("{err}"),
        Err(err) => {
            println!("Error: {err}");
            render(&table.view());
        }
    }
    Flow::Continue
}

fn render(view: &TableView) {
    let dealer_cards = if view.dealer_cards.is_empty() {
        "(no cards)".to_string()
    } else {
        view.dealer_cards
            .iter()
            .map(|slot| {
                if slot.visible {
                    format_card(&slot.card)
                } else {
                    "??".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    let dealer_total = view.dealer_totals.map_or_else(
        || "???".to_string(),
        |(low, high)| format!("{low} (Best: {high})"),
    );

    let player_cards = if view.player_cards.is_empty() {
        "(no cards)".to_string()
    } else {
        view.player_cards
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let (low, high) = view.player_totals;

    println!("\nShoe: {} cards remaining", view.cards_remaining);
    println!("Dealer: {dealer_cards}");
    println!("Dealer Total: {dealer_total}");
    println!("Player: {player_cards}");
    println!("Player Total: {low} (Best: {high})");
    println!("{}", view.status);
    println!(
        "Actions: {} {} {}",
        format_action("deal", "d", view.actions.deal),
        format_action("hit", "h", view.actions.hit),
        format_action("stand", "s", view.actions.stand)
    );
    prompt();
}

fn print_chat(message: &ChatMessage) {
    println!("{}", colorize(&format!("<{}> {}", message.username, message.message), "36"));
}

fn prompt() {
    print!("> ");
    if let Err(err) = io::stdout().flush() {
        log::debug!("stdout flush failed: {err}");
    }
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs | Suit::Spades => "34",
    };
    colorize(&card.to_string(), code)
}
