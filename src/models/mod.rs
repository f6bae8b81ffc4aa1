use log::info;
use serde::{Deserialize, Serialize};

/// Datapoint type of a group address as found in the group-address catalog.
///
/// `sub` is absent when the project only records the main type, e.g. a plain
/// "switch" without a more specific subtype.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DptType {
    pub main: u16,
    pub sub: Option<u16>,
}

/// One group address from the catalog written by the project extractor.
///
/// `dpt_type` is `None` when the project assigns no datapoint type at all,
/// meaning the address cannot be decoded by the listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAddress {
    pub name: String,
    pub address: String,
    pub dpt_type: Option<DptType>,
}

/// One measurement entry of the generated knx_listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Measurement {
    pub name: String,
    pub addresses: Vec<String>,
    pub dpt: String,
}

/// How retained group addresses are grouped into measurements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One measurement per address. Addresses are unique in the catalog, so
    /// every measurement holds exactly one address.
    Address,
    /// Merge addresses that share a name (and dpt) into one measurement.
    Name,
}

/// Counters accumulated over one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub no_dpt_addresses_count: u32,
    pub no_dpt_subtype_addresses_count: u32,
    pub ignored_addresses_count: u32,
}

impl RunStats {
    /// Log the end-of-run summary.
    pub fn log_summary(&self, measurement_count: usize) {
        info!("{} group addresses were parsed", measurement_count);
        info!(
            "{} addresses without datapoint type",
            self.no_dpt_addresses_count
        );
        info!(
            "{} addresses without datapoint subtype",
            self.no_dpt_subtype_addresses_count
        );

        if self.ignored_addresses_count > 0 {
            info!("{} ignored addresses", self.ignored_addresses_count);
        }

        info!(
            "{} addresses in total",
            measurement_count as u32
                + self.no_dpt_addresses_count
                + self.no_dpt_subtype_addresses_count
                + self.ignored_addresses_count
        );
    }
}
