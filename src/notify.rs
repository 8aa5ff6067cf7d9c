//! Outbound user notifications.
//!
//! The engine decides what to say; a [`NotificationSink`] decides how it is
//! delivered. How a reply is delivered depends on what kind of update started
//! the unit of work: a plain message gets a new message back, a callback
//! button edits the message the button belongs to. That choice is made once
//! per inbound event by building a [`Notifier`].

use crate::errors::AppResult;
use std::sync::Mutex;
use tracing::warn;

/// Kind of update that started the current unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundKind {
    Message,
    CallbackQuery,
}

/// Reply capability selected for one inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Edit the message that carried the button
    RepliesInline,
    /// Send a fresh message to the chat
    RepliesViaNewMessage,
}

impl From<InboundKind> for ReplyMode {
    fn from(kind: InboundKind) -> Self {
        match kind {
            InboundKind::CallbackQuery => ReplyMode::RepliesInline,
            InboundKind::Message => ReplyMode::RepliesViaNewMessage,
        }
    }
}

/// Delivery side of notifications (chat transport, console, test buffer)
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, mode: ReplyMode, message: &str) -> AppResult<()>;
}

/// A sink bound to the reply mode of one inbound event
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    sink: &'a dyn NotificationSink,
    mode: ReplyMode,
}

impl<'a> Notifier<'a> {
    pub fn for_event(kind: InboundKind, sink: &'a dyn NotificationSink) -> Self {
        Self {
            sink,
            mode: kind.into(),
        }
    }

    pub fn send(&self, message: &str) -> AppResult<()> {
        self.sink.deliver(self.mode, message)
    }

    /// Send a progress message whose loss must not undo committed work
    pub fn send_or_warn(&self, message: &str) {
        if let Err(e) = self.send(message) {
            warn!("Notification '{}' not delivered: {}", message, e);
        }
    }
}

/// Prints notifications to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn deliver(&self, _mode: ReplyMode, message: &str) -> AppResult<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Keeps the visible conversation in memory.
///
/// Inline replies overwrite the last message, new-message replies append.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, mode: ReplyMode, message: &str) -> AppResult<()> {
        let mut messages = self.lock();
        match (mode, messages.last_mut()) {
            (ReplyMode::RepliesInline, Some(last)) => *last = message.to_string(),
            _ => messages.push(message.to_string()),
        }
        Ok(())
    }
}
