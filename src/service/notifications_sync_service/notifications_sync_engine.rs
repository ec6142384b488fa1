use super::{dto::SyncState, promotional_notifications::promotional_notifications};
use crate::{
    auth::AuthProbe,
    dto::{input, output},
    error::Error,
    repository::NotificationsRepository,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::watch;

///
/// Owns the session's notification state and applies every state
/// transition. Remote failures never propagate out of the transition
/// operations; they degrade to "keep prior state" or "promotional
/// fallback" and are logged.
///
/// Every fetch takes a sequence token. Optimistic mutations, logout and
/// newer fetches invalidate older tokens, so a slow fetch resolving late
/// cannot resurrect state the user has already changed.
///
pub(crate) struct NotificationsSyncEngine {
    auth_probe: Arc<dyn AuthProbe>,
    repository: Arc<dyn NotificationsRepository>,
    state_tx: watch::Sender<SyncState>,
    fetch_seq: AtomicU64,
}

impl NotificationsSyncEngine {
    pub(crate) fn new(
        auth_probe: Arc<dyn AuthProbe>,
        repository: Arc<dyn NotificationsRepository>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SyncState {
            is_loading: true,
            ..SyncState::default()
        });

        Self {
            auth_probe,
            repository,
            state_tx,
            fetch_seq: AtomicU64::new(0),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state_tx.subscribe()
    }

    pub(crate) fn state(&self) -> SyncState {
        self.state_tx.borrow().clone()
    }

    ///
    /// Runs once, before the poller starts.
    ///
    pub(crate) async fn init(&self) {
        tracing::info!("initializing notification state");

        if !self.auth_probe.is_authenticated().await {
            tracing::info!("no credential stored, using promotional notifications");
            self.reset_to_promotional(false);
            return;
        }

        self.state_tx.send_modify(|state| {
            state.is_logged_in = true;
            state.is_loading = true;
        });
        self.fetch_or_fallback().await;
    }

    ///
    /// Refresh the list from the server. Anonymous sessions get the
    /// promotional set without any network call. A failed fetch keeps
    /// whatever is already shown.
    ///
    pub(crate) async fn fetch_notifications(&self) {
        if !self.state_tx.borrow().is_logged_in {
            self.reset_to_promotional(false);
            return;
        }

        self.state_tx.send_modify(|state| state.is_loading = true);

        let seq = self.begin_fetch();
        tracing::info!("fetching notifications");
        match self.repository.find_all().await {
            Ok(notifications) => self.apply_fetched(seq, notifications),
            Err(err) => {
                tracing::warn!(%err, "fetching notifications failed, keeping current list");
                self.clear_loading();
            }
        }
    }

    ///
    /// The external auth flow has already persisted the credential
    /// when this is called.
    ///
    pub(crate) async fn login(&self) {
        tracing::info!("logged in");

        self.state_tx.send_modify(|state| {
            state.is_logged_in = true;
            state.is_loading = true;
        });
        self.fetch_or_fallback().await;
    }

    /// Synchronous, no network call. Idempotent.
    pub(crate) fn logout(&self) {
        tracing::info!("logged out, resetting to promotional notifications");
        self.reset_to_promotional(false);
    }

    ///
    /// Optimistic: the local flag flips immediately, the server call is
    /// fire-and-forget and never rolled back.
    ///
    pub(crate) fn mark_as_read(&self, id: &str) {
        self.invalidate_inflight_fetches();
        self.state_tx.send_modify(|state| {
            if let Some(notification) = state
                .notifications
                .iter_mut()
                .find(|notification| notification.id == id)
            {
                notification.is_read = true;
            }
            state.recompute_unread_count();
        });

        if self.state_tx.borrow().is_logged_in {
            let repository = Arc::clone(&self.repository);
            let id = id.to_string();
            tokio::spawn(async move {
                if let Err(err) = repository.mark_read(&id).await {
                    tracing::warn!(%err, id, "failed to mark notification read on the server");
                }
            });
        }
    }

    pub(crate) fn mark_all_as_read(&self) {
        self.invalidate_inflight_fetches();
        self.state_tx.send_modify(|state| {
            for notification in &mut state.notifications {
                notification.is_read = true;
            }
            state.recompute_unread_count();
        });

        if self.state_tx.borrow().is_logged_in {
            let repository = Arc::clone(&self.repository);
            tokio::spawn(async move {
                if let Err(err) = repository.mark_all_read().await {
                    tracing::warn!(%err, "failed to mark all notifications read on the server");
                }
            });
        }
    }

    pub(crate) fn clear_all(&self) {
        self.invalidate_inflight_fetches();
        self.state_tx.send_modify(|state| {
            state.notifications.clear();
            state.recompute_unread_count();
        });

        if self.state_tx.borrow().is_logged_in {
            let repository = Arc::clone(&self.repository);
            tokio::spawn(async move {
                if let Err(err) = repository.delete_all().await {
                    tracing::warn!(%err, "failed to delete all notifications on the server");
                }
            });
        }
    }

    pub(crate) fn delete_notification(&self, id: &str) {
        self.invalidate_inflight_fetches();
        self.state_tx.send_modify(|state| {
            state
                .notifications
                .retain(|notification| notification.id != id);
            state.recompute_unread_count();
        });

        if self.state_tx.borrow().is_logged_in {
            let repository = Arc::clone(&self.repository);
            let id = id.to_string();
            tokio::spawn(async move {
                if let Err(err) = repository.delete(&id).await {
                    tracing::warn!(%err, id, "failed to delete notification on the server");
                }
            });
        }
    }

    ///
    /// Unlike the operations above, remote failure here propagates to
    /// the caller.
    ///
    /// ### Errors
    /// - [Error::NotAuthenticated] when no user is logged in
    /// - [Error::Store] when the server call fails
    ///
    pub(crate) async fn create_self_notification(
        &self,
        notification: output::CreateSelfNotification,
    ) -> Result<input::Notification, Error> {
        if !self.state_tx.borrow().is_logged_in {
            return Err(Error::NotAuthenticated);
        }

        tracing::info!("creating self notification");
        let created = self.repository.create_self(notification).await?;
        tracing::info!(id = %created.id, "created self notification");

        self.state_tx.send_modify(|state| {
            if !state.is_logged_in {
                return;
            }
            state.notifications.push(created.clone());
            state.recompute_unread_count();
        });

        Ok(created)
    }

    ///
    /// One poll probe: compare the server's unread count with the local
    /// one and refresh the full list when they diverge. Probe failures
    /// are logged and ignored, the next period retries.
    ///
    pub(crate) async fn poll_unread_count(&self) {
        if !self.state_tx.borrow().is_logged_in {
            return;
        }

        match self.repository.unread_count().await {
            Ok(count) => {
                // The session may have ended while the probe was in flight
                let state = self.state_tx.borrow().clone();
                if !state.is_logged_in {
                    return;
                }
                if count != state.unread_count {
                    tracing::debug!(
                        local = state.unread_count,
                        remote = count,
                        "unread count diverged, refreshing notifications"
                    );
                    self.fetch_notifications().await;
                }
            }
            Err(err) => tracing::warn!(%err, "unread count probe failed"),
        }
    }

    /// Fetch used by init and login: failure falls back to the
    /// promotional set so the UI is never left empty.
    async fn fetch_or_fallback(&self) {
        let seq = self.begin_fetch();
        tracing::info!("fetching notifications");
        match self.repository.find_all().await {
            Ok(notifications) => self.apply_fetched(seq, notifications),
            Err(err) => {
                tracing::warn!(%err, "fetch failed, falling back to promotional notifications");
                if self.fetch_seq.load(Ordering::SeqCst) != seq {
                    self.clear_loading();
                    return;
                }
                self.state_tx.send_modify(|state| {
                    state.notifications = promotional_notifications();
                    state.recompute_unread_count();
                    state.is_loading = false;
                });
            }
        }
    }

    fn reset_to_promotional(&self, is_logged_in: bool) {
        self.invalidate_inflight_fetches();
        self.state_tx.send_modify(|state| {
            state.is_logged_in = is_logged_in;
            state.notifications = promotional_notifications();
            state.recompute_unread_count();
            state.is_loading = false;
        });
    }

    fn begin_fetch(&self) -> u64 {
        self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn invalidate_inflight_fetches(&self) {
        self.fetch_seq.fetch_add(1, Ordering::SeqCst);
    }

    fn apply_fetched(&self, seq: u64, notifications: Vec<input::Notification>) {
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!("discarding stale fetch result");
            self.clear_loading();
            return;
        }

        let count = notifications.len();
        let mut applied = false;
        self.state_tx.send_modify(|state| {
            state.is_loading = false;
            // Results arriving after logout must not resurrect data
            if !state.is_logged_in {
                return;
            }
            state.notifications = notifications;
            state.recompute_unread_count();
            applied = true;
        });

        if applied {
            tracing::info!(count, "fetched notifications");
        }
    }

    fn clear_loading(&self) {
        self.state_tx.send_modify(|state| state.is_loading = false);
    }
}
