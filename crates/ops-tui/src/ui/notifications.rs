// Status bar notifications: a small priority queue with auto-dismiss.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notification priority levels (higher = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
    pub shown_at: Option<Instant>,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration: Duration::from_secs(secs),
            shown_at: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 4)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Error, 5)
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at
            .map(|shown| shown.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    fn mark_shown(&mut self) {
        if self.shown_at.is_none() {
            self.shown_at = Some(Instant::now());
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationQueue {
    /// Pending notifications, highest priority at the front
    queue: VecDeque<Notification>,
    current: Option<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A higher priority notification replaces the current one outright;
    /// otherwise it waits its turn. The same message twice in a row is dropped.
    pub fn push(&mut self, notification: Notification) {
        let duplicate = self
            .current
            .iter()
            .chain(self.queue.back())
            .any(|n| n.message == notification.message);
        if duplicate {
            return;
        }

        match self.current {
            Some(ref current) if notification.level > current.level => {
                let mut n = notification;
                n.mark_shown();
                self.current = Some(n);
            }
            Some(_) => {
                let pos = self
                    .queue
                    .iter()
                    .position(|n| n.level < notification.level)
                    .unwrap_or(self.queue.len());
                self.queue.insert(pos, notification);
            }
            None => {
                let mut n = notification;
                n.mark_shown();
                self.current = Some(n);
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.advance();
    }

    /// Advance to the next notification once the current one expires
    pub fn tick(&mut self) {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.current.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.mark_shown();
                self.current = Some(next);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_basic() {
        let mut q = NotificationQueue::new();
        assert!(q.is_empty());

        q.push(Notification::info("first"));
        assert_eq!(q.current().unwrap().message, "first");

        q.dismiss();
        assert!(q.is_empty());
    }

    #[test]
    fn test_priority_replaces_current() {
        let mut q = NotificationQueue::new();
        q.push(Notification::info("saved"));
        q.push(Notification::error("Request failed (500)"));
        assert_eq!(q.current().unwrap().level, NotificationLevel::Error);
        q.dismiss();
        assert!(q.is_empty());
    }

    #[test]
    fn test_lower_priority_waits() {
        let mut q = NotificationQueue::new();
        q.push(Notification::warning("one"));
        q.push(Notification::info("two"));
        q.push(Notification::success("three"));
        assert_eq!(q.current().unwrap().message, "one");
        q.dismiss();
        assert_eq!(q.current().unwrap().message, "three");
        q.dismiss();
        assert_eq!(q.current().unwrap().message, "two");
    }

    #[test]
    fn test_duplicate_dropped() {
        let mut q = NotificationQueue::new();
        q.push(Notification::error("boom"));
        q.push(Notification::error("boom"));
        q.dismiss();
        assert!(q.is_empty());
    }

    #[test]
    fn test_expiry_advances() {
        let mut q = NotificationQueue::new();
        let mut short = Notification::info("short");
        short.duration = Duration::ZERO;
        q.push(short);
        q.push(Notification::info("next"));
        q.tick();
        assert_eq!(q.current().unwrap().message, "next");
    }
}
