use crate::card::Card;
use crate::error::ActionError;
use crate::result::Outcome;

use super::{Action, RoundState, Table, TableEvent};

/// Cards needed for the opening deal.
const OPENING_CARDS: usize = 4;

impl Table {
    fn ensure_state(&self, action: Action, allowed: &[RoundState]) -> Result<(), ActionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            log::debug!("rejected {action} while {}", self.state);
            Err(ActionError::InvalidAction {
                action,
                state: self.state,
            })
        }
    }

    /// Applies a discrete player action.
    ///
    /// # Errors
    ///
    /// See [`Table::deal`], [`Table::hit`], and [`Table::stand`].
    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Deal => self.deal(),
            Action::Hit => self.hit().map(|_| ()),
            Action::Stand => self.stand(),
        }
    }

    /// Starts a new round: clears both hands and deals player, dealer,
    /// player, dealer. The dealer's second card stays face down.
    ///
    /// A player natural ends the round on the spot.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, or if fewer than four
    /// cards remain. In both cases the previous hands are left untouched.
    pub fn deal(&mut self) -> Result<(), ActionError> {
        self.ensure_state(Action::Deal, &[RoundState::AwaitingDeal, RoundState::RoundOver])?;

        let reshuffled = self.options.reshuffle_at_break && self.shoe.needs_reshuffle();
        if reshuffled {
            self.reshuffle()?;
        }

        if self.shoe.cards_remaining() < OPENING_CARDS {
            log::warn!(
                "cannot deal: {} cards left in the shoe",
                self.shoe.cards_remaining()
            );
            return Err(ActionError::EmptyShoe);
        }

        self.player.clear();
        self.dealer.clear();
        self.hole_revealed = false;
        self.outcome = None;
        self.state = RoundState::PlayerTurn;

        for _ in 0..2 {
            let card = self.draw()?;
            self.player.add_card(card);
            let card = self.draw()?;
            self.dealer.add_card(card);
        }

        self.last_event = Some(TableEvent::Dealt { reshuffled });
        log::debug!(
            "dealt: player {:?}, dealer up card {:?}",
            self.player.values(),
            self.dealer.cards().first()
        );

        if self.player.is_blackjack() {
            let outcome = if self.options.push_on_double_blackjack && self.dealer.is_blackjack() {
                Outcome::Push
            } else {
                Outcome::PlayerBlackjack
            };
            self.settle(outcome);
        }

        Ok(())
    }

    /// Player action: Hit (draw a card).
    ///
    /// Going over 21 ends the round as a player bust.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, or if the shoe is
    /// empty (which voids the round).
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_state(Action::Hit, &[RoundState::PlayerTurn])?;

        let card = self.draw()?;
        self.player.add_card(card);
        self.last_event = Some(TableEvent::PlayerDrew(card));
        log::debug!("player drew {card}, totals {:?}", self.player.values());

        if self.player.is_bust() {
            self.settle(Outcome::PlayerBust);
        }

        Ok(card)
    }

    /// Player action: Stand. Reveals the hole card and hands play to the
    /// dealer, who is then driven by [`Table::advance_dealer_turn`].
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_state(Action::Stand, &[RoundState::PlayerTurn])?;

        self.hole_revealed = true;
        self.state = RoundState::DealerTurn;
        self.last_event = Some(TableEvent::PlayerStood);
        log::debug!("player stands on {}", self.player.best_value());

        Ok(())
    }

    /// Discards a round in progress, e.g. when the session goes away.
    ///
    /// Partial hands are dropped and the table waits for a new deal.
    pub fn abandon_round(&mut self) {
        if self.state != RoundState::AwaitingDeal {
            log::debug!("abandoning round while {}", self.state);
        }
        self.player.clear();
        self.dealer.clear();
        self.hole_revealed = false;
        self.outcome = None;
        self.last_event = None;
        self.state = RoundState::AwaitingDeal;
    }
}
