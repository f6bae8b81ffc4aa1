//! Telegraf config generator for KNX installations
//!
//! Reads the group-address catalog extracted from a KNX project, filters and
//! canonicalizes the addresses and renders a telegraf knx_listener input
//! configuration from them.

use std::io;
use std::path::Path;
use thiserror::Error;

pub mod aggregate;
pub mod config;
pub mod dpt;
pub mod driver_check;
pub mod emit;
pub mod filter;
pub mod models;

// Re-export common types for easier access
pub use aggregate::MeasurementAggregator;
pub use config::Settings;
pub use emit::{repair_telegraf_config, ConfigEmitter};
pub use filter::AddressFilter;
pub use models::{GroupAddress, GroupBy, Measurement, RunStats};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unable to read the group-address catalog: {0}")]
    Io(#[from] io::Error),
    #[error("Unable to parse the group-address catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read the whole group-address catalog into memory. The catalog is small,
/// a few thousand records at most, so no streaming is needed.
pub fn read_group_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<GroupAddress>, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    let group_addresses: Vec<GroupAddress> = serde_json::from_str(&contents)?;
    Ok(group_addresses)
}
