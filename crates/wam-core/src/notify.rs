//! Notification capability behind which the console raises toasts.
//!
//! Domain services never talk to the webview directly; they push
//! `Notice`s through an injected `Notifier`. The app shell forwards
//! notices as Tauri events, tests capture them in memory.

use crate::error::WamError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Visual severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A single user-facing notice (rendered as a toast).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, title: &str, message: &str) {
        self.notify(Notice::new(NoticeKind::Success, title, message));
    }

    fn info(&self, title: &str, message: &str) {
        self.notify(Notice::new(NoticeKind::Info, title, message));
    }

    fn warning(&self, title: &str, message: &str) {
        self.notify(Notice::new(NoticeKind::Warning, title, message));
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(Notice::new(NoticeKind::Error, title, message));
    }

    /// Surface a `WamError` with its extracted message.
    fn notify_error(&self, title: &str, err: &WamError) {
        self.notify(Notice::new(NoticeKind::Error, title, err.message.clone()));
    }
}

/// In-memory notifier for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notice raised so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Most recent notice, if any.
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .ok()
            .and_then(|n| n.last().cloned())
    }

    /// Drain and return all recorded notices.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    /// Count notices of a given kind.
    pub fn count_of(&self, kind: NoticeKind) -> usize {
        self.notices
            .lock()
            .map(|n| n.iter().filter(|x| x.kind == kind).count())
            .unwrap_or(0)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
