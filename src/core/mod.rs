//! Transport, configuration and error handling

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
