pub mod notifications_sync_service;
