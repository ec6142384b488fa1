//!
//! Module with all dtos that are passed between this client and the server
//!

pub mod input;
pub mod output;
