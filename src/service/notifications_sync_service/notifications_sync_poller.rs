use super::{dto::SyncState, notifications_sync_engine::NotificationsSyncEngine};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{watch, Notify},
    time::{interval, MissedTickBehavior},
};

///
/// Repeating unread-count probe. Runs only while a user is logged in and
/// the app is foregrounded; suspended otherwise. Returning to the
/// foreground triggers a full refresh before probing resumes.
///
pub(crate) struct NotificationsSyncPoller {
    engine: Arc<NotificationsSyncEngine>,
    state_rx: watch::Receiver<SyncState>,
    app_active_rx: watch::Receiver<bool>,
    poll_interval: Duration,
    app_was_active: bool,
}

impl NotificationsSyncPoller {
    pub(crate) fn new(
        engine: Arc<NotificationsSyncEngine>,
        app_active_rx: watch::Receiver<bool>,
        poll_interval: Duration,
    ) -> Self {
        let state_rx = engine.subscribe();

        Self {
            engine,
            state_rx,
            app_active_rx,
            poll_interval,
            // The app is foregrounded when the service starts
            app_was_active: true,
        }
    }

    ///
    /// Infinite loop that probes the server periodically.
    /// Loop can be stopped by using notify.
    ///
    #[tracing::instrument(name = "Notifications Poller", skip_all)]
    pub(crate) async fn run(mut self, close_notify: Arc<Notify>) {
        tracing::info!("poller started");

        tokio::select! {
            biased;

            _ = close_notify.notified() => {}

            _ = self.poll_loop() => {}
        }

        tracing::info!("poller finished");
    }

    async fn poll_loop(&mut self) {
        loop {
            let Some(resumed) = self.wait_until_pollable().await else {
                tracing::debug!("activation channel closed");
                return;
            };

            if resumed {
                tracing::debug!("app foregrounded, refreshing notifications");
                self.engine.fetch_notifications().await;
            }

            // First tick fires immediately: one probe on every activation
            let mut interval = interval(self.poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    changed = self.app_active_rx.changed() => {
                        if changed.is_err() {
                            tracing::debug!("activation channel closed");
                            return;
                        }
                        if !self.pollable() {
                            break;
                        }
                    }

                    changed = self.state_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !self.pollable() {
                            break;
                        }
                    }

                    _ = interval.tick() => {
                        self.engine.poll_unread_count().await;
                    }
                }
            }

            self.app_was_active = *self.app_active_rx.borrow();
            tracing::debug!("polling suspended");
        }
    }

    ///
    /// Wait until the app is foregrounded and a user is logged in.
    ///
    /// ### Returns
    /// - `Some(resumed)` where `resumed` means the app came back from
    ///   the background since polling was last active
    /// - `None` when the watch channels closed
    ///
    async fn wait_until_pollable(&mut self) -> Option<bool> {
        loop {
            if self.pollable() {
                let resumed = !self.app_was_active;
                self.app_was_active = true;
                return Some(resumed);
            }
            self.app_was_active = *self.app_active_rx.borrow();

            tokio::select! {
                changed = self.app_active_rx.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
                changed = self.state_rx.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
            }
        }
    }

    fn pollable(&self) -> bool {
        *self.app_active_rx.borrow() && self.state_rx.borrow().is_logged_in
    }
}
