//! Transient user-facing messages.

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A message shown briefly after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Local::now(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    /// How long the notice stays visible. Errors linger longer.
    pub fn ttl(&self) -> Duration {
        match self.kind {
            NoticeKind::Error => Duration::seconds(8),
            NoticeKind::Success | NoticeKind::Info => Duration::seconds(4),
        }
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.at >= self.ttl()
    }
}
