//! The round state machine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, Owner};
use crate::options::TableOptions;
use crate::result::Outcome;
use crate::shoe::Shoe;

mod actions;
mod dealer;
pub mod state;

pub use state::{Action, DealerStep, RoundState, TableEvent};

/// A single-seat blackjack table: one player against the dealer.
///
/// The table owns its shoe and both hands. All mutation goes through
/// `&mut self`, so actions are processed one at a time; each session owns its
/// own table and nothing here is shared between sessions.
#[derive(Debug, Clone)]
pub struct Table {
    /// Cards in the shoe.
    pub shoe: Shoe,
    /// Table options.
    pub options: TableOptions,
    state: RoundState,
    player: Hand,
    dealer: Hand,
    /// Whether the dealer's second card is face up.
    hole_revealed: bool,
    outcome: Option<Outcome>,
    last_event: Option<TableEvent>,
    /// Used for every shoe built after the first.
    rng: ChaCha8Rng,
}

impl Table {
    /// Creates a new table with a freshly shuffled shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use bjchat::{RoundState, Table, TableOptions};
    ///
    /// let table = Table::new(TableOptions::default(), 42);
    /// assert_eq!(table.state(), RoundState::AwaitingDeal);
    /// assert_eq!(table.shoe.len(), 6 * 52 + 1);
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Self::build_shoe(&options, &mut rng);
        Self::assemble(options, shoe, rng)
    }

    /// Creates a table that deals from `shoe` as given.
    #[must_use]
    pub fn with_shoe(options: TableOptions, shoe: Shoe) -> Self {
        Self::assemble(options, shoe, ChaCha8Rng::seed_from_u64(0))
    }

    fn assemble(options: TableOptions, shoe: Shoe, rng: ChaCha8Rng) -> Self {
        Self {
            shoe,
            options,
            state: RoundState::AwaitingDeal,
            player: Hand::new(Owner::Player),
            dealer: Hand::new(Owner::Dealer),
            hole_revealed: false,
            outcome: None,
            last_event: None,
            rng,
        }
    }

    fn build_shoe(options: &TableOptions, rng: &mut ChaCha8Rng) -> Shoe {
        Shoe::generate(
            options.decks,
            options.cut_depth_min,
            options.cut_depth_max,
            rng,
        )
    }

    /// Replaces the shoe with a freshly shuffled one.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn reshuffle(&mut self) -> Result<(), ActionError> {
        if matches!(self.state, RoundState::PlayerTurn | RoundState::DealerTurn) {
            return Err(ActionError::InvalidAction {
                action: Action::Deal,
                state: self.state,
            });
        }
        self.shoe = Self::build_shoe(&self.options, &mut self.rng);
        log::info!("shoe reshuffled, {} cards", self.shoe.cards_remaining());
        Ok(())
    }

    /// Draws the next card, voiding the round if the shoe is exhausted.
    fn draw(&mut self) -> Result<Card, ActionError> {
        match self.shoe.draw() {
            Ok(card) => Ok(card),
            Err(err) => {
                log::warn!("shoe exhausted while {}; round void", self.state);
                self.state = RoundState::RoundOver;
                self.hole_revealed = true;
                self.outcome = None;
                self.last_event = Some(TableEvent::ShoeExhausted);
                Err(err.into())
            }
        }
    }

    /// Ends the round with `outcome`, revealing the hole card.
    fn settle(&mut self, outcome: Outcome) {
        log::debug!(
            "round settled: {:?} (player {}, dealer {})",
            outcome,
            self.player.best_value(),
            self.dealer.best_value()
        );
        self.hole_revealed = true;
        self.outcome = Some(outcome);
        self.state = RoundState::RoundOver;
        self.last_event = Some(TableEvent::Settled(outcome));
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// Returns the dealer's hand, hole card included.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Returns whether the dealer's hole card is face up.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Returns how the last round ended, if it was settled.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the most recent table event.
    #[must_use]
    pub const fn last_event(&self) -> Option<TableEvent> {
        self.last_event
    }

    /// Returns the number of cards remaining in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.cards_remaining()
    }
}
