//! Thread-safe FIFO between the inbound listeners and the game loop.
//!
//! Listeners may post from any thread (HTTP handlers, the stdin reader).
//! Only the game loop takes and flushes.

use crate::types::ContactId;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub sender: ContactId,
}

/// Shared handle to the pending message queue
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    pending: Arc<Mutex<VecDeque<InboundMessage>>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<InboundMessage>> {
        // a panicking producer must not wedge the game loop
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a message to the tail. Empty messages carry nothing and are skipped.
    pub fn post(&self, text: impl Into<String>, sender: impl Into<ContactId>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let sender = sender.into();
        tracing::trace!(%sender, %text, "Message queued");
        self.lock().push_back(InboundMessage { text, sender });
    }

    /// Pop the oldest pending message
    pub fn take(&self) -> Option<InboundMessage> {
        self.lock().pop_front()
    }

    /// Drop everything pending. Returns how many messages were discarded.
    pub fn flush(&self) -> usize {
        let mut pending = self.lock();
        let dropped = pending.len();
        pending.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
