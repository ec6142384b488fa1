//!
//! Module that keeps the session's notification list in sync
//! with the remote notification store.
//!

mod dto;
mod notifications_sync_engine;
mod notifications_sync_poller;
mod notifications_sync_service;
mod promotional_notifications;

pub use dto::{NotificationsSyncServiceConfig, SyncState};
pub use notifications_sync_service::*;
