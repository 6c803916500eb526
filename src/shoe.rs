//! The multi-deck shoe and its break marker.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::ShoeError;

/// One slot in the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoeEntry {
    /// A dealable card.
    Card(Card),
    /// The cut card. Never dealt; passing it means a reshuffle is due.
    Break,
}

/// An ordered, consumable pool of cards. Cards are drawn from the front.
#[derive(Debug, Clone, Default)]
pub struct Shoe {
    entries: VecDeque<ShoeEntry>,
    break_reached: bool,
}

impl Shoe {
    /// Builds `num_decks` full decks, shuffles them, and inserts the break
    /// marker so that `cut_depth` entries follow it, with `cut_depth` drawn
    /// uniformly from `cut_min..=cut_max`.
    ///
    /// The cut depth is clamped to the number of cards, so a tiny shoe puts
    /// the marker at the front rather than failing.
    #[must_use]
    pub fn generate<R: Rng>(
        num_decks: u8,
        cut_min: usize,
        cut_max: usize,
        rng: &mut R,
    ) -> Self {
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE + 1);

        for _ in 0..num_decks {
            for rank in 1..=13 {
                for suit in Suit::ALL {
                    cards.push(ShoeEntry::Card(Card::new(suit, rank)));
                }
            }
        }

        cards.shuffle(rng);

        let cut_depth = if cut_min >= cut_max {
            cut_min
        } else {
            rng.random_range(cut_min..=cut_max)
        };
        let index = cards.len().saturating_sub(cut_depth);
        cards.insert(index, ShoeEntry::Break);

        log::debug!(
            "generated shoe: {} decks, break marker {} from the end",
            num_decks,
            cards.len() - 1 - index
        );

        Self {
            entries: cards.into(),
            break_reached: false,
        }
    }

    /// Builds a shoe that deals `cards` in order, without a break marker.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            entries: cards.iter().copied().map(ShoeEntry::Card).collect(),
            break_reached: false,
        }
    }

    /// Removes and returns the front card, stepping over the break marker.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] when no cards are left.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        loop {
            match self.entries.pop_front() {
                Some(ShoeEntry::Card(card)) => return Ok(card),
                Some(ShoeEntry::Break) => {
                    log::info!("break marker reached, reshuffle due");
                    self.break_reached = true;
                }
                None => return Err(ShoeError::Empty),
            }
        }
    }

    /// Number of entries, counting the break marker if it is still in the shoe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the shoe has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dealable cards left.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ShoeEntry::Card(_)))
            .count()
    }

    /// How many entries sit behind the break marker, if it is still in the shoe.
    #[must_use]
    pub fn break_depth(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| *entry == ShoeEntry::Break)
            .map(|index| self.entries.len() - 1 - index)
    }

    /// Returns whether the break marker has been drawn past.
    #[must_use]
    pub const fn needs_reshuffle(&self) -> bool {
        self.break_reached
    }

    /// Returns the entries in dealing order.
    pub fn entries(&self) -> impl Iterator<Item = &ShoeEntry> {
        self.entries.iter()
    }
}
