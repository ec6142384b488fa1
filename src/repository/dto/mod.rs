mod notifications_repository_config;

pub use notifications_repository_config::*;
