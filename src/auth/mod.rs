//!
//! Module with the credential collaborators the host application provides.
//!

mod auth_probe;
mod credential_store;

pub use auth_probe::*;
pub use credential_store::*;
