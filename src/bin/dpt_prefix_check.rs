use knx2telegraf::driver_check::parse_driver_dpt_types;
use knx2telegraf::Settings;
use log::error;
use std::path::Path;
use std::{env, process};

/// Cross-check the dpt identifiers a KNX driver supports against the known
/// prefix set and print them in the generator's canonical form.
fn main() {
    let default_filter = env::var("K2T_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if !Path::new(&settings.driver_dpt_types_path).is_file() {
        error!(
            "Driver dpt type list does not exist at {}!",
            settings.driver_dpt_types_path
        );
        process::exit(1);
    }

    let dpt_types = match parse_driver_dpt_types(&settings.driver_dpt_types_path) {
        Ok(dpt_types) => dpt_types,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    match serde_json::to_string(&dpt_types) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
