//! Transient, auto-dismissing notices.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Notice severity; decides icon and color when drawn. The view only ever
/// raises errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Error => "✗",
        }
    }
}

/// A message shown to the user until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of live notices, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(
            severity = ?notice.severity,
            description = %notice.description,
            "Notice raised"
        );
        self.notices.push(notice);
    }

    /// Drop every notice whose delay has elapsed.
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    /// Notices still visible at `now`.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| !n.is_expired(now))
    }

    /// Dismiss the newest notice early.
    pub fn dismiss_latest(&mut self) {
        self.notices.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
