//! Lingo24 Business Documents client
//!
//! This library wraps the Business Documents REST API: jobs with lazily
//! resolved relations, their prices and metrics, and paginated file listings.

#![forbid(unsafe_code)]

pub mod business;
pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::Client,
    config::ClientConfig,
    errors::{Lingo24Error, Result, TransportError},
    models::{File, FileType, Locale, Page, Service},
};

pub use business::{
    collections::PaginatedCollection,
    files::{BaseFileCollection, FileCollection, JobFileCollection},
    jobs::{Job, JobCollection, JobRecord},
    metrics::Metric,
    prices::{JobPrice, Price},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
