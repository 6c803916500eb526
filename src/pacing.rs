//! Paced dealer play.
//!
//! [`DealerPacer`] is the scheduler side of [`Table::advance_dealer_turn`]:
//! it decides when the next dealer step is due so a front end can render each
//! draw before the next one. It never sleeps; the caller passes the current
//! time and uses [`DealerPacer::next_deadline`] to bound how long its event
//! loop blocks.

use core::time::Duration;
use std::time::Instant;

use crate::error::ActionError;
use crate::game::{DealerStep, RoundState, Table};

/// Schedules dealer steps at a fixed interval.
#[derive(Debug, Clone)]
pub struct DealerPacer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl DealerPacer {
    /// Creates an idle pacer.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Returns the pause between steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the first step one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Drops any pending step.
    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            log::debug!("dealer pacing cancelled");
        }
    }

    /// Returns whether a step is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next step is due, if any.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Runs one dealer step if it is due.
    ///
    /// Returns `Ok(None)` when nothing was due. After a draw the next step is
    /// scheduled one interval later; once the round settles, or if the table
    /// has left the dealer's turn, the pacer goes idle.
    ///
    /// # Errors
    ///
    /// Propagates the table's error. The pacer goes idle.
    pub fn poll(
        &mut self,
        table: &mut Table,
        now: Instant,
    ) -> Result<Option<DealerStep>, ActionError> {
        let Some(due) = self.next_due else {
            return Ok(None);
        };
        if now < due {
            return Ok(None);
        }
        if table.state() != RoundState::DealerTurn {
            self.next_due = None;
            return Ok(None);
        }

        match table.advance_dealer_turn() {
            Ok(step @ DealerStep::Drew(_)) => {
                self.next_due = Some(now + self.interval);
                Ok(Some(step))
            }
            Ok(step @ DealerStep::Finished(_)) => {
                self.next_due = None;
                Ok(Some(step))
            }
            Err(err) => {
                self.next_due = None;
                Err(err)
            }
        }
    }
}
