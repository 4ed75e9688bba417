//! User-facing notifications.
//!
//! Every committing operation and every user-facing failure emits exactly
//! one short message. The editor only ever appends to its outbox; the host
//! drains it and shows the messages however it likes.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Fire-and-forget queue of notifications.
#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<Notification>,
}

impl Outbox {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!(%message, "notify"),
            _ => tracing::debug!(%severity, %message, "notify"),
        }
        self.pending.push(Notification { severity, message });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// Remove and return everything queued so far.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let mut outbox = Outbox::default();
        outbox.success("Add seat");
        outbox.error("Import failed");
        let taken = outbox.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].severity, Severity::Error);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_display() {
        let n = Notification {
            severity: Severity::Info,
            message: "Copied seat".into(),
        };
        assert_eq!(n.to_string(), "[info] Copied seat");
    }
}
