//! Round state and action types.

use core::fmt;

use crate::card::Card;
use crate::result::Outcome;

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    /// No round has been dealt yet.
    AwaitingDeal,
    /// Waiting for the player to hit or stand.
    PlayerTurn,
    /// Dealer plays out their hand, one paced step at a time.
    DealerTurn,
    /// Round has ended; only a new deal is accepted.
    RoundOver,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingDeal => "awaiting the deal",
            Self::PlayerTurn => "on the player's turn",
            Self::DealerTurn => "on the dealer's turn",
            Self::RoundOver => "the round is over",
        })
    }
}

/// A discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Start a new round.
    Deal,
    /// Draw a card.
    Hit,
    /// Keep the current hand and hand over to the dealer.
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deal => "deal",
            Self::Hit => "hit",
            Self::Stand => "stand",
        })
    }
}

/// Result of one dealer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The dealer drew this card and may draw again.
    Drew(Card),
    /// The dealer stands (or has bust) and the round is settled.
    Finished(Outcome),
}

/// The last thing that happened at the table, for status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// A new round was dealt.
    Dealt {
        /// Whether a fresh shoe was built first.
        reshuffled: bool,
    },
    /// The player drew a card.
    PlayerDrew(Card),
    /// The player stood.
    PlayerStood,
    /// The dealer drew a card.
    DealerDrew(Card),
    /// The round was settled.
    Settled(Outcome),
    /// The shoe ran out and the round was voided.
    ShoeExhausted,
}
