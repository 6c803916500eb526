//! Round outcomes.

use crate::hand::Hand;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player was dealt a natural and wins immediately.
    PlayerBlackjack,
    /// Player went over 21.
    PlayerBust,
    /// Dealer went over 21.
    DealerBust,
    /// Player has the higher total.
    PlayerWins,
    /// Dealer has the higher total.
    DealerWins,
    /// Push (tie).
    Push,
}

impl Outcome {
    /// Compares two finished hands.
    ///
    /// Player bust loses first, then dealer bust, then best totals.
    #[must_use]
    pub fn compare(player: &Hand, dealer: &Hand) -> Self {
        if player.is_bust() {
            return Self::PlayerBust;
        }
        if dealer.is_bust() {
            return Self::DealerBust;
        }

        let player_value = player.best_value();
        let dealer_value = dealer.best_value();
        match player_value.cmp(&dealer_value) {
            core::cmp::Ordering::Greater => Self::PlayerWins,
            core::cmp::Ordering::Less => Self::DealerWins,
            core::cmp::Ordering::Equal => Self::Push,
        }
    }

    /// The message shown when the round ends.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::PlayerBlackjack => "Blackjack! Player wins immediately.",
            Self::PlayerBust => "Player busts! Dealer wins.",
            Self::DealerBust => "Dealer busts! Player wins!",
            Self::PlayerWins => "Player wins!",
            Self::DealerWins => "Dealer wins!",
            Self::Push => "It's a tie!",
        }
    }

    /// Returns whether the player came out ahead.
    #[must_use]
    pub const fn player_won(&self) -> bool {
        matches!(
            self,
            Self::PlayerBlackjack | Self::DealerBust | Self::PlayerWins
        )
    }
}
