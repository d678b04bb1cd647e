//! User-facing notification contract.
//!
//! The core never renders toasts itself; it hands [`Notice`]s to an
//! injected [`NoticeSink`] and the UI-binding layer decides how to show
//! them.

use std::sync::{Arc, Mutex};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices.
pub trait NoticeSink {
    fn notify(&self, notice: Notice);
}

/// Sink that routes notices to the log stream.
///
/// Useful as a default when no UI layer is attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeKind::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeKind::Error => tracing::error!(message = %notice.message, "notice"),
        }
    }
}

/// Sink that collects notices in memory.
///
/// Clones share the same buffer, so a handle kept by the caller observes
/// notices emitted through the sink given to the core.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotices {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all collected notices.
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(_) => Vec::new(),
        }
    }
}

impl NoticeSink for MemoryNotices {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
