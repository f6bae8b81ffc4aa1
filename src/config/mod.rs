use crate::models::GroupBy;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

fn group_addresses_path_default() -> String { "group_addresses.json".to_string() }
fn telegraf_config_path_default() -> String { "telegraf_knx.conf".to_string() }
fn service_type_default() -> String { "knxd".to_string() }
fn service_address_default() -> String { "tunnel/tcp".to_string() }
fn dpt_whitelist_default() -> Vec<String> { Vec::new() }
fn ignored_address_prefixes_default() -> Vec<String> { Vec::new() }
fn ignored_dpt_prefixes_default() -> Vec<String> { Vec::new() }
fn dpt_subtype_default_default() -> u16 { 0 }
fn ignore_missing_dpt_subtypes_default() -> bool { false }
fn group_by_default() -> GroupBy { GroupBy::Address }
fn driver_dpt_types_path_default() -> String { "driver_dpt_types.txt".to_string() }

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unable to read the settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Unable to parse the settings file: {0}")]
    Parse(#[from] serde_yml::Error),
}

/// Run settings, loaded once and passed into the pipeline components.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Group-address catalog written by the project extractor.
    #[serde(default = "group_addresses_path_default")]
    pub group_addresses_path: String,
    /// Destination of the generated telegraf config.
    #[serde(default = "telegraf_config_path_default")]
    pub telegraf_config_path: String,
    #[serde(default = "service_type_default")]
    pub service_type: String,
    #[serde(default = "service_address_default")]
    pub service_address: String,
    /// When non-empty, only these canonical dpt identifiers are kept.
    #[serde(default = "dpt_whitelist_default")]
    pub dpt_whitelist: Vec<String>,
    #[serde(default = "ignored_address_prefixes_default")]
    pub ignored_address_prefixes: Vec<String>,
    #[serde(default = "ignored_dpt_prefixes_default")]
    pub ignored_dpt_prefixes: Vec<String>,
    /// Subtype used when the project records only a main type.
    #[serde(default = "dpt_subtype_default_default")]
    pub dpt_subtype_default: u16,
    /// Drop addresses with a missing subtype instead of defaulting it.
    #[serde(default = "ignore_missing_dpt_subtypes_default")]
    pub ignore_missing_dpt_subtypes: bool,
    #[serde(default = "group_by_default")]
    pub group_by: GroupBy,
    /// Input of the dpt_prefix_check binary.
    #[serde(default = "driver_dpt_types_path_default")]
    pub driver_dpt_types_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            group_addresses_path: group_addresses_path_default(),
            telegraf_config_path: telegraf_config_path_default(),
            service_type: service_type_default(),
            service_address: service_address_default(),
            dpt_whitelist: dpt_whitelist_default(),
            ignored_address_prefixes: ignored_address_prefixes_default(),
            ignored_dpt_prefixes: ignored_dpt_prefixes_default(),
            dpt_subtype_default: dpt_subtype_default_default(),
            ignore_missing_dpt_subtypes: ignore_missing_dpt_subtypes_default(),
            group_by: group_by_default(),
            driver_dpt_types_path: driver_dpt_types_path_default(),
        }
    }
}

impl Settings {
    /// Load from `config/knx2telegraf.yaml` or `knx2telegraf.yaml`. All
    /// fields have defaults, so a missing file just yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        /* Check for the two paths of the settings file */
        for path in ["config/knx2telegraf.yaml", "knx2telegraf.yaml"] {
            if Path::new(path).is_file() {
                return Self::load_from(path);
            }
        }

        info!("No settings file found, using defaults");
        Ok(Settings::default())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_yml::from_str(&contents)?;
        Ok(settings)
    }
}
