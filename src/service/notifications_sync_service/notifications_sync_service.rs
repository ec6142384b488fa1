use super::{
    dto::{NotificationsSyncServiceConfig, SyncState},
    notifications_sync_engine::NotificationsSyncEngine,
    notifications_sync_poller::NotificationsSyncPoller,
};
use crate::{
    auth::AuthProbe,
    dto::{input, output},
    error::Error,
    repository::NotificationsRepository,
};
use std::sync::Arc;
use tokio::{
    sync::{watch, Notify},
    task::JoinHandle,
};

///
/// Session-scoped notification state, synchronized with the remote
/// notification store.
///
/// The host application constructs it once at startup, forwards
/// foreground/background transitions through [Self::set_app_active],
/// and tears it down with [Self::close]. Consumers observe state through
/// [Self::subscribe] and mutate it only through the operations below.
///
/// While a user is logged in and the app is foregrounded, a background
/// task probes the server's unread count periodically and refreshes the
/// list when it diverges from the local one.
///
pub struct NotificationsSyncService {
    engine: Arc<NotificationsSyncEngine>,
    app_active_tx: watch::Sender<bool>,
    poller_handle: JoinHandle<()>,
    close_notify: Arc<Notify>,
}

impl NotificationsSyncService {
    ///
    /// Create the service and run the initialization protocol: anonymous
    /// sessions get the promotional set, authenticated sessions fetch
    /// from the server (falling back to the promotional set on failure).
    /// Initialization never fails; remote errors degrade to fallback data.
    ///
    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    pub async fn new(
        config: NotificationsSyncServiceConfig,
        auth_probe: Arc<dyn AuthProbe>,
        repository: Arc<dyn NotificationsRepository>,
    ) -> Self {
        let engine = Arc::new(NotificationsSyncEngine::new(auth_probe, repository));
        engine.init().await;

        tracing::info!("starting poller task");
        let (app_active_tx, app_active_rx) = watch::channel(true);
        let close_notify = Arc::new(Notify::new());
        let poller =
            NotificationsSyncPoller::new(Arc::clone(&engine), app_active_rx, config.poll_interval);

        let close_notify_clone = Arc::clone(&close_notify);
        let poller_handle = tokio::spawn(async move {
            poller.run(close_notify_clone).await;
        });

        Self {
            engine,
            app_active_tx,
            poller_handle,
            close_notify,
        }
    }

    ///
    /// Subscribe to state snapshots. The receiver is read-only;
    /// mutations go through the operations on this service.
    ///
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.engine.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> SyncState {
        self.engine.state()
    }

    ///
    /// Refresh the notification list. Never fails from the caller's
    /// perspective: anonymous sessions get the promotional set, remote
    /// failures keep the current list.
    ///
    pub async fn fetch_notifications(&self) {
        self.engine.fetch_notifications().await;
    }

    ///
    /// Switch to the authenticated state and fetch the user's
    /// notifications. Call after the auth flow has persisted the
    /// credential. Polling becomes eligible afterwards.
    ///
    pub async fn login(&self) {
        self.engine.login().await;
    }

    ///
    /// Reset to the anonymous state and the promotional set.
    /// Synchronous, no network call, idempotent.
    ///
    pub fn logout(&self) {
        self.engine.logout();
    }

    ///
    /// Mark one notification as read. The local flag flips immediately;
    /// the server call is fire-and-forget and never rolled back.
    /// No-op when `id` is not in the list.
    ///
    pub fn mark_as_read(&self, id: &str) {
        self.engine.mark_as_read(id);
    }

    /// Mark every notification as read. Same semantics as [Self::mark_as_read].
    pub fn mark_all_as_read(&self) {
        self.engine.mark_all_as_read();
    }

    /// Remove every notification. Same semantics as [Self::mark_as_read].
    pub fn clear_all(&self) {
        self.engine.clear_all();
    }

    /// Remove one notification. Same semantics as [Self::mark_as_read].
    pub fn delete_notification(&self, id: &str) {
        self.engine.delete_notification(id);
    }

    ///
    /// Create a notification addressed to the current user and append it
    /// to the local list.
    ///
    /// ### Errors
    /// - [Error::NotAuthenticated] when no user is logged in
    /// - [Error::Store] when the server call fails
    ///
    pub async fn create_self_notification(
        &self,
        notification: output::CreateSelfNotification,
    ) -> Result<input::Notification, Error> {
        self.engine.create_self_notification(notification).await
    }

    ///
    /// Forward the host's foreground/background transitions.
    /// Backgrounding suspends polling; foregrounding refreshes the list
    /// and resumes it.
    ///
    pub fn set_app_active(&self, active: bool) {
        self.app_active_tx.send_replace(active);
    }

    ///
    /// Stop the poller task and drop the service.
    ///
    #[tracing::instrument(name = "Notifications Sync", skip_all)]
    pub async fn close(self) {
        tracing::info!("stopping poller task");
        self.close_notify.notify_one();
        self.poller_handle.await.unwrap(); // task is never aborted and will never panic
        tracing::info!("poller task stopped");
    }
}
