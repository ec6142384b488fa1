mod notifications_sync_service_config;
mod sync_state;

pub use notifications_sync_service_config::*;
pub use sync_state::*;
