use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ActionError;
use crate::result::Outcome;

use super::{DealerStep, RoundState, Table, TableEvent};

impl Table {
    /// Returns whether the dealer must draw another card.
    ///
    /// The dealer draws while their high total is below
    /// [`dealer_stands_at`](crate::TableOptions::dealer_stands_at), so a soft
    /// 17 stands.
    #[must_use]
    pub fn dealer_must_draw(&self) -> bool {
        let (_, high) = self.dealer.values();
        high < self.options.dealer_stands_at
    }

    /// Plays one dealer step.
    ///
    /// Either draws a single card, leaving the table in
    /// [`RoundState::DealerTurn`] so the caller can render it and wait before
    /// the next step, or settles the round once the dealer stands.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn, or if the shoe is
    /// empty while the dealer must draw (which voids the round).
    pub fn advance_dealer_turn(&mut self) -> Result<DealerStep, ActionError> {
        if self.state != RoundState::DealerTurn {
            return Err(ActionError::NotDealerTurn { state: self.state });
        }

        if self.dealer_must_draw() {
            let card = self.draw()?;
            self.dealer.add_card(card);
            self.last_event = Some(TableEvent::DealerDrew(card));
            log::debug!("dealer drew {card}, totals {:?}", self.dealer.values());
            return Ok(DealerStep::Drew(card));
        }

        let outcome = Outcome::compare(&self.player, &self.dealer);
        self.settle(outcome);
        Ok(DealerStep::Finished(outcome))
    }

    /// Runs the dealer turn to the end without pausing.
    ///
    /// Returns the cards drawn and the outcome.
    ///
    /// # Errors
    ///
    /// See [`Table::advance_dealer_turn`].
    pub fn finish_dealer_turn(&mut self) -> Result<(Vec<Card>, Outcome), ActionError> {
        let mut drawn = Vec::new();
        loop {
            match self.advance_dealer_turn()? {
                DealerStep::Drew(card) => drawn.push(card),
                DealerStep::Finished(outcome) => return Ok((drawn, outcome)),
            }
        }
    }
}
