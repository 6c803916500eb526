use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::ChatError;
use crate::sync::Mutex;

use super::{ChatMessage, ChatRelay};

/// A relay held entirely in memory.
///
/// Every handle shares one log and keeps its own read position, so sending
/// broadcasts immediately. Use [`MemoryRelay::subscribe`] to hand a new
/// session a handle.
#[derive(Debug, Default)]
pub struct MemoryRelay {
    log: Arc<Mutex<Vec<ChatMessage>>>,
    read: usize,
}

impl MemoryRelay {
    /// Creates an empty relay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle on the same log that will see every message from
    /// the start.
    #[must_use]
    pub fn subscribe(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            read: 0,
        }
    }

    /// Number of messages in the shared log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    /// Returns whether nothing has been sent yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChatRelay for MemoryRelay {
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
        self.log.lock().push(message.clone());
        Ok(())
    }

    fn poll(&mut self) -> Result<Vec<ChatMessage>, ChatError> {
        let log = self.log.lock();
        let fresh = log.get(self.read..).map(<[ChatMessage]>::to_vec).unwrap_or_default();
        self.read = log.len();
        drop(log);
        Ok(fresh)
    }
}
