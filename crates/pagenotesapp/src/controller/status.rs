//! Transient feedback shown at the top of the popup.
//!
//! Messages are never removed by a timer. Instead each one records when it
//! was shown and for how long, and readers ask [`StatusMessage::is_visible`].

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub content: String,
    /// Epoch millis when the message appeared.
    pub shown_at: i64,
    #[serde(skip)]
    pub ttl: Duration,
}

impl StatusMessage {
    pub fn new(level: MessageLevel, content: impl Into<String>, shown_at: i64, ttl: Duration) -> Self {
        Self {
            level,
            content: content.into(),
            shown_at,
            ttl,
        }
    }

    pub fn is_visible(&self, now: i64) -> bool {
        let ttl = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.shown_at) < ttl
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

/// How long each kind of message stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTimings {
    pub success: Duration,
    pub error: Duration,
}

impl Default for MessageTimings {
    fn default() -> Self {
        Self {
            success: Duration::from_secs(3),
            error: Duration::from_secs(5),
        }
    }
}

impl MessageTimings {
    pub fn ttl(&self, level: MessageLevel) -> Duration {
        match level {
            MessageLevel::Success => self.success,
            MessageLevel::Error => self.error,
        }
    }
}
