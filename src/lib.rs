//! A terminal blackjack table with a file-polled chat sidechannel.
//!
//! The crate provides a [`Table`] type that runs one player against the
//! dealer: dealing, hit/stand, paced dealer play, and settlement. Front ends
//! send [`Action`]s and draw the [`TableView`]. With the `std` feature the
//! crate also carries the chat relay used to let sessions talk to each other.
//!
//! # Example
//!
//! ```
//! use bjchat::{Action, RoundState, Table, TableOptions};
//!
//! let mut table = Table::new(TableOptions::default(), 42);
//! table.apply(Action::Deal).unwrap();
//! if table.state() == RoundState::PlayerTurn {
//!     table.apply(Action::Stand).unwrap();
//!     table.finish_dealer_turn().unwrap();
//! }
//! assert_eq!(table.state(), RoundState::RoundOver);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
#[cfg(feature = "std")]
pub mod chat;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
#[cfg(feature = "std")]
pub mod pacing;
pub mod result;
pub mod shoe;
#[cfg(feature = "std")]
mod sync;
pub mod view;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
#[cfg(feature = "std")]
pub use chat::{ChatIdentity, ChatMessage, ChatRelay, ChatSession, FileRelay, Forwarder, MemoryRelay};
#[cfg(feature = "std")]
pub use error::ChatError;
pub use error::{ActionError, ShoeError};
pub use game::{Action, DealerStep, RoundState, Table, TableEvent};
pub use hand::{Hand, Owner, values};
#[cfg(feature = "std")]
pub use options::ChatOptions;
pub use options::TableOptions;
#[cfg(feature = "std")]
pub use pacing::DealerPacer;
pub use result::Outcome;
pub use shoe::{Shoe, ShoeEntry};
pub use view::{ActionAvailability, CardView, TableView};
