//! The chat sidechannel.
//!
//! Sessions talk through a relay: [`ChatRelay::send`] posts to an outbox and
//! [`ChatRelay::poll`] returns whatever has appeared on the broadcast feed
//! since the last poll. The game never touches the relay; the front end owns
//! both side by side.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ChatError;

mod file;
mod memory;

pub use file::{FileRelay, Forwarder};
pub use memory::MemoryRelay;

/// How many messages a session keeps for display.
pub const TRANSCRIPT_LIMIT: usize = 100;

/// One chat line as it travels through the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message body.
    pub message: String,
    /// Display name of the author.
    pub username: String,
    /// Session the message was sent from.
    #[serde(default)]
    pub session_id: String,
    /// RFC 3339 UTC send time.
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn now(identity: &ChatIdentity, message: &str) -> Result<Self, ChatError> {
        Ok(Self {
            message: message.to_string(),
            username: identity.username.clone(),
            session_id: identity.session_id.clone(),
            timestamp: OffsetDateTime::now_utc().format(&Rfc3339)?,
        })
    }
}

/// Who is talking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    /// Display name; also used to recognise our own messages on replay.
    pub username: String,
    /// Unique per connection.
    pub session_id: String,
}

impl ChatIdentity {
    /// Creates an identity.
    pub fn new(username: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_id: session_id.into(),
        }
    }
}

/// An inbox/outbox pair shared by every session.
pub trait ChatRelay {
    /// Posts a message for broadcast.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be written.
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError>;

    /// Returns broadcast messages not seen by this handle before, oldest
    /// first. Lines that do not parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read.
    fn poll(&mut self) -> Result<Vec<ChatMessage>, ChatError>;
}

/// One session's view of the chat: its identity, its relay handle, and the
/// transcript it displays.
///
/// Sent messages go into the transcript straight away. When the broadcast
/// feed replays them, anything carrying our username is dropped so it is not
/// shown twice. Two sessions sharing a username will therefore not see each
/// other's messages.
#[derive(Debug)]
pub struct ChatSession<R> {
    relay: R,
    identity: ChatIdentity,
    transcript: VecDeque<ChatMessage>,
}

impl<R: ChatRelay> ChatSession<R> {
    /// Creates a session on `relay`.
    pub const fn new(relay: R, identity: ChatIdentity) -> Self {
        Self {
            relay,
            identity,
            transcript: VecDeque::new(),
        }
    }

    /// Returns who this session speaks as.
    pub const fn identity(&self) -> &ChatIdentity {
        &self.identity
    }

    /// Sends `text`, echoing it into the transcript.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay rejects the message. Nothing is echoed
    /// in that case.
    pub fn send(&mut self, text: &str) -> Result<Option<ChatMessage>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let message = ChatMessage::now(&self.identity, text)?;
        self.relay.send(&message)?;
        self.record(message.clone());
        Ok(Some(message))
    }

    /// Fetches new messages from other users and appends them to the
    /// transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay cannot be read.
    pub fn poll(&mut self) -> Result<Vec<ChatMessage>, ChatError> {
        let incoming: Vec<ChatMessage> = self
            .relay
            .poll()?
            .into_iter()
            .filter(|message| message.username != self.identity.username)
            .collect();

        for message in &incoming {
            self.record(message.clone());
        }
        Ok(incoming)
    }

    /// Messages to display, oldest first.
    pub fn transcript(&self) -> impl Iterator<Item = &ChatMessage> {
        self.transcript.iter()
    }

    fn record(&mut self, message: ChatMessage) {
        if self.transcript.len() == TRANSCRIPT_LIMIT {
            self.transcript.pop_front();
        }
        self.transcript.push_back(message);
    }
}
