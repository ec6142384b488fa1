use std::time::Duration;

#[derive(Clone)]
pub struct NotificationsSyncServiceConfig {
    /// How often to probe the server for the unread count
    pub poll_interval: Duration,
}

impl Default for NotificationsSyncServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
        }
    }
}
