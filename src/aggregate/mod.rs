use crate::config::Settings;
use crate::dpt::{format_dpt, DptError};
use crate::filter::AddressFilter;
use crate::models::{GroupAddress, GroupBy, Measurement, RunStats};
use log::{error, info, warn};
use std::collections::HashMap;

/// Turns the ordered group-address catalog into the measurement catalog and
/// the run statistics, in one linear pass. Per-record problems never abort
/// the pass, they only classify the record.
pub struct MeasurementAggregator {
    filter: AddressFilter,
    dpt_subtype_default: u16,
    ignore_missing_dpt_subtypes: bool,
    group_by: GroupBy,
}

impl MeasurementAggregator {
    pub fn new(
        filter: AddressFilter,
        dpt_subtype_default: u16,
        ignore_missing_dpt_subtypes: bool,
        group_by: GroupBy,
    ) -> Self {
        Self {
            filter,
            dpt_subtype_default,
            ignore_missing_dpt_subtypes,
            group_by,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            AddressFilter::new(
                settings.dpt_whitelist.clone(),
                settings.ignored_address_prefixes.clone(),
                settings.ignored_dpt_prefixes.clone(),
            ),
            settings.dpt_subtype_default,
            settings.ignore_missing_dpt_subtypes,
            settings.group_by,
        )
    }

    /// Run the pass. Measurements come out in first-seen order.
    pub fn aggregate(&self, group_addresses: &[GroupAddress]) -> (Vec<Measurement>, RunStats) {
        let mut measurements: Vec<Measurement> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut stats = RunStats::default();

        for ga in group_addresses {
            let formatted = match format_dpt(ga.dpt_type.as_ref(), self.dpt_subtype_default) {
                Ok(formatted) => formatted,
                Err(DptError::MissingDatapointType) => {
                    stats.no_dpt_addresses_count += 1;

                    let name = if ga.name == "-" { "No Address Name" } else { ga.name.as_str() };
                    error!("{} {} | No datapoint found for the address!", ga.address, name);
                    continue;
                }
            };

            // Explicit ignores win over the missing-subtype handling: an
            // address that is both only counts as ignored.
            if self.filter.is_excluded(&ga.address, &formatted.dpt) {
                stats.ignored_addresses_count += 1;

                info!(
                    "{} ({}) {} | Ignoring address explicitly",
                    ga.address, formatted.dpt, ga.name
                );
                continue;
            }

            if formatted.sub_defaulted {
                stats.no_dpt_subtype_addresses_count += 1;

                if self.ignore_missing_dpt_subtypes {
                    continue;
                }

                warn!(
                    "{} ({}) {} | Missing datapoint subtype was replaced with a default value \"{}\"!",
                    ga.address, formatted.dpt, ga.name, self.dpt_subtype_default
                );
            }

            let key = match self.group_by {
                GroupBy::Address => (ga.address.clone(), String::new()),
                // Keyed on name and dpt so one measurement never mixes dpts
                GroupBy::Name => (ga.name.clone(), formatted.dpt.clone()),
            };

            match index.get(&key) {
                Some(&i) => measurements[i].addresses.push(ga.address.clone()),
                None => {
                    index.insert(key, measurements.len());
                    measurements.push(Measurement {
                        name: ga.name.clone(),
                        addresses: vec![ga.address.clone()],
                        dpt: formatted.dpt,
                    });
                }
            }
        }

        (measurements, stats)
    }
}
