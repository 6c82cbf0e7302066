use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: Vec<Notification>,
    default_duration: Duration,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::with_default_duration(Duration::from_secs(5))
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        Self {
            notifications: Vec::new(),
            default_duration,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Info);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Error);
    }

    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.notifications
            .push(Notification::new(message, level, self.default_duration));
    }

    /// Newest notification that has not expired
    pub fn current(&self) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| !n.is_expired())
    }

    /// Drop expired notifications. Returns true if any were removed.
    pub fn prune_expired(&mut self) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired());
        self.notifications.len() != before
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_notification_wins() {
        let mut manager = NotificationManager::new();
        manager.info("first");
        manager.error("second");

        let current = manager.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.level, NotificationLevel::Error);
    }

    #[test]
    fn expired_notifications_are_pruned() {
        let mut manager = NotificationManager::with_default_duration(Duration::ZERO);
        manager.info("gone");

        assert!(manager.current().is_none());
        assert!(manager.prune_expired());
        assert!(!manager.prune_expired());
    }
}
