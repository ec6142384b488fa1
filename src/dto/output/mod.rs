mod create_self_notification;

pub use create_self_notification::*;
