mod auth;
pub mod dto;
mod error;
pub mod repository;
mod service;

pub use auth::{AuthProbe, CredentialStore};
pub use error::Error;
pub use service::notifications_sync_service::{
    NotificationsSyncService, NotificationsSyncServiceConfig, SyncState,
};
