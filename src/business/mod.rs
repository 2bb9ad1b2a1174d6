//! Business Documents resources: jobs, prices, metrics and files

pub mod collections;
pub mod files;
pub mod jobs;
pub mod metrics;
pub mod prices;
