//! Translation of table state into what a front end draws.
//!
//! Nothing here mutates the table, so a view can be rebuilt as often as the
//! front end likes.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::card::Card;
use crate::game::{RoundState, Table, TableEvent};

/// Shown before the first deal.
pub const WELCOME: &str = "Welcome to Blackjack! Press Deal to start.";

/// A dealer card as it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    /// The card itself.
    pub card: Card,
    /// Whether it is face up.
    pub visible: bool,
}

/// Which actions are currently legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionAvailability {
    /// A new round may be dealt.
    pub deal: bool,
    /// The player may draw.
    pub hit: bool,
    /// The player may stand.
    pub stand: bool,
}

/// Everything a front end needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Current round state.
    pub state: RoundState,
    /// Player cards in draw order.
    pub player_cards: Vec<Card>,
    /// Player `(low, high)` totals.
    pub player_totals: (u8, u8),
    /// Dealer cards, the hole card hidden until revealed.
    pub dealer_cards: Vec<CardView>,
    /// Dealer `(low, high)` totals once the hole card is up.
    pub dealer_totals: Option<(u8, u8)>,
    /// One-line description of the latest event.
    pub status: String,
    /// Final message once the round is settled.
    pub outcome: Option<&'static str>,
    /// Legal actions.
    pub actions: ActionAvailability,
    /// Cards left in the shoe.
    pub cards_remaining: usize,
}

impl Table {
    /// Returns which actions are currently legal.
    #[must_use]
    pub const fn available_actions(&self) -> ActionAvailability {
        match self.state() {
            RoundState::AwaitingDeal | RoundState::RoundOver => ActionAvailability {
                deal: true,
                hit: false,
                stand: false,
            },
            RoundState::PlayerTurn => ActionAvailability {
                deal: false,
                hit: true,
                stand: true,
            },
            RoundState::DealerTurn => ActionAvailability {
                deal: false,
                hit: false,
                stand: false,
            },
        }
    }

    /// Builds the render view for the current state.
    #[must_use]
    pub fn view(&self) -> TableView {
        let revealed = self.is_hole_revealed();
        let dealer_cards = self
            .dealer_hand()
            .cards()
            .iter()
            .enumerate()
            .map(|(index, &card)| CardView {
                card,
                visible: revealed || index != 1,
            })
            .collect();

        TableView {
            state: self.state(),
            player_cards: self.player_hand().cards().to_vec(),
            player_totals: self.player_hand().values(),
            dealer_cards,
            dealer_totals: revealed.then(|| self.dealer_hand().values()),
            status: status_line(self.last_event()),
            outcome: self.outcome().map(|outcome| outcome.message()),
            actions: self.available_actions(),
            cards_remaining: self.cards_remaining(),
        }
    }
}

fn status_line(event: Option<TableEvent>) -> String {
    match event {
        None => WELCOME.to_string(),
        Some(TableEvent::Dealt { reshuffled: false }) => "Dealing new hand...".to_string(),
        Some(TableEvent::Dealt { reshuffled: true }) => {
            "Shoe reshuffled. Dealing new hand...".to_string()
        }
        Some(TableEvent::PlayerDrew(card)) => format!("Player drew: {card}"),
        Some(TableEvent::PlayerStood) => "Player stands".to_string(),
        Some(TableEvent::DealerDrew(card)) => format!("Dealer drew: {card}"),
        Some(TableEvent::Settled(outcome)) => outcome.message().to_string(),
        Some(TableEvent::ShoeExhausted) => "The shoe is empty. Round void.".to_string(),
    }
}
