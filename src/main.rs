use knx2telegraf::{
    read_group_addresses, repair_telegraf_config, ConfigEmitter, MeasurementAggregator, Settings,
};
use log::{error, info};
use std::path::Path;
use std::{env, process};

fn main() {
    // Initialize logging
    let default_filter = env::var("K2T_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    // Run pre-condition checks
    if !Path::new(&settings.group_addresses_path).is_file() {
        error!(
            "Group addresses output does not exist at {}, please ensure to run the project extractor first!",
            settings.group_addresses_path
        );
        process::exit(1);
    }

    // Read group addresses
    info!(
        "Start reading group addresses into memory from {}...",
        settings.group_addresses_path
    );

    let group_addresses = match read_group_addresses(&settings.group_addresses_path) {
        Ok(group_addresses) => group_addresses,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!("Reading group addresses finished!");

    // Generate measurements and log stats
    info!("Start parsing group addresses...");

    let aggregator = MeasurementAggregator::from_settings(&settings);
    let (measurements, stats) = aggregator.aggregate(&group_addresses);
    stats.log_summary(measurements.len());

    // Generate, write and post-process the telegraf config
    info!("Start generating telegraf config file...");

    let emitter = ConfigEmitter::new(settings.service_type.clone(), settings.service_address.clone());
    let result = emitter
        .write(measurements, &settings.telegraf_config_path)
        .and_then(|_| repair_telegraf_config(&settings.telegraf_config_path));

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }

    info!(
        "Telegraf config file was written to {}",
        settings.telegraf_config_path
    );
}
