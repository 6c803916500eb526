//! Player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Highest total that is not a bust.
pub const BLACKJACK: u8 = 21;

/// Computes `(low, high)` totals for a run of cards.
///
/// `low` counts every ace as 1. `high` promotes a single ace to 11 when that
/// does not take the total past 21; a second promoted ace would always bust.
#[must_use]
pub fn values(cards: &[Card]) -> (u8, u8) {
    let mut low: u8 = 0;
    let mut has_ace = false;

    for card in cards {
        has_ace |= card.is_ace();
        low = low.saturating_add(card.hard_value());
    }

    let high = if has_ace && low <= BLACKJACK - 10 {
        low + 10
    } else {
        low
    };
    (low, high)
}

/// Who a hand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The seated player.
    Player,
    /// The house.
    Dealer,
}

/// A participant's hand of cards, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    owner: Owner,
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new(owner: Owner) -> Self {
        Self {
            owner,
            cards: Vec::new(),
        }
    }

    /// Creates a hand already holding `cards`.
    #[must_use]
    pub fn with_cards(owner: Owner, cards: &[Card]) -> Self {
        Self {
            owner,
            cards: cards.to_vec(),
        }
    }

    /// Returns who holds this hand.
    #[must_use]
    pub const fn owner(&self) -> Owner {
        self.owner
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the `(low, high)` totals. See [`values`].
    #[must_use]
    pub fn values(&self) -> (u8, u8) {
        values(&self.cards)
    }

    /// The soft total if it does not bust, otherwise the hard total.
    #[must_use]
    pub fn best_value(&self) -> u8 {
        let (low, high) = self.values();
        if high <= BLACKJACK { high } else { low }
    }

    /// Returns whether the hand is a natural: two cards totalling 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        let (low, high) = self.values();
        self.cards.len() == 2 && low.max(high) == BLACKJACK
    }

    /// Returns whether the hand is over 21 even with every ace counted as 1.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        let (low, high) = self.values();
        low.min(high) > BLACKJACK
    }

    /// Returns whether an ace is currently counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        let (low, high) = self.values();
        high != low
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
