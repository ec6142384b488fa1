use super::Error;
use crate::dto::{input, output};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Fetch all notifications of the current user,
    /// in the order the server keeps them
    ///
    async fn find_all(&self) -> Result<Vec<input::Notification>, Error>;

    ///
    /// Fetch only the number of unread notifications.
    /// Cheaper than [Self::find_all], used by the poll probe
    ///
    async fn unread_count(&self) -> Result<usize, Error>;

    ///
    /// Create a notification addressed to the current user
    ///
    /// ### Returns
    /// the created notification as stored by the server
    ///
    async fn create_self(
        &self,
        notification: output::CreateSelfNotification,
    ) -> Result<input::Notification, Error>;

    ///
    /// Mark one notification as read
    ///
    async fn mark_read(&self, id: &str) -> Result<(), Error>;

    ///
    /// Mark every notification of the current user as read
    ///
    async fn mark_all_read(&self) -> Result<(), Error>;

    ///
    /// Delete one notification
    ///
    async fn delete(&self, id: &str) -> Result<(), Error>;

    ///
    /// Delete every notification of the current user
    ///
    async fn delete_all(&self) -> Result<(), Error>;
}
