//! Error types for table and chat operations.

use thiserror::Error;

use crate::game::{Action, RoundState};

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    Empty,
}

/// Errors that can occur when applying an action to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not legal in the current state. Nothing was changed.
    #[error("cannot {action} while {state}")]
    InvalidAction {
        /// The rejected action.
        action: Action,
        /// The state the table was in.
        state: RoundState,
    },
    /// A dealer step was requested outside the dealer's turn.
    #[error("the dealer cannot play while {state}")]
    NotDealerTurn {
        /// The state the table was in.
        state: RoundState,
    },
    /// The shoe ran out mid-round. The round is void.
    #[error("no cards left in the shoe")]
    EmptyShoe,
}

impl From<ShoeError> for ActionError {
    fn from(err: ShoeError) -> Self {
        match err {
            ShoeError::Empty => Self::EmptyShoe,
        }
    }
}

/// Errors on the chat boundary.
///
/// Malformed inbound lines are not errors; relays skip them.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum ChatError {
    /// Reading or writing a relay file failed.
    #[error("chat relay i/o: {0}")]
    Io(#[from] std::io::Error),
    /// A message could not be serialized.
    #[error("could not encode chat message: {0}")]
    Encode(#[from] serde_json::Error),
    /// The current time could not be formatted.
    #[error("could not format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}
