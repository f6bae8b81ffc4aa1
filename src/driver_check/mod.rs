use log::warn;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use thiserror::Error;

/// Main-type prefixes of every dpt the PROMOTIC driver table knows about.
/// https://www.promotic.eu/en/pmdoc/Subsystems/Comm/PmDrivers/KNXDTypes.htm
pub const KNOWN_DPT_PREFIXES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "17", "18",
    "19", "20", "21", "22", "23", "25", "26", "27", "29", "30", "31", "200", "201", "202", "203",
    "204", "205", "206", "207", "209", "210", "211", "212", "213", "214", "215", "216", "217",
    "218", "219", "220", "221", "222", "223", "224", "225", "229", "230", "231", "232", "234",
    "235", "236", "237", "238", "239", "240", "241",
];

#[derive(Error, Debug)]
pub enum DriverCheckError {
    #[error("Unable to read the driver dpt type list: {0}")]
    Io(#[from] io::Error),
}

/// Classify a driver's `DPT_<digits>` identifiers against the known prefix
/// set and reformat the matches into the `"main.sub"` scheme the generator
/// emits, for manual comparison. Unknown prefixes are logged, never fatal.
///
/// The identifiers were grep'ed from the knx-go dpt package, one per line.
pub fn parse_driver_dpt_types<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DriverCheckError> {
    let contents = fs::read_to_string(path)?;
    let mut lines: Vec<&str> = contents.lines().map(str::trim_end).collect();
    lines.sort_by(|a, b| natural_cmp(a, b));

    let mut dpt_list = Vec::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let dpt = line.strip_prefix("DPT_").unwrap_or(line);

        let prefix_found = KNOWN_DPT_PREFIXES
            .iter()
            .any(|prefix| dpt.starts_with(prefix));

        if !prefix_found {
            warn!("Unknown dpt prefix {}", dpt);
            continue;
        }

        match dpt.parse::<u32>() {
            Ok(code) => dpt_list.push(format!("{:.3}", code as f64 / 1000.0)),
            Err(_) => warn!("Driver dpt type is not numeric: {}", dpt),
        }
    }

    Ok(dpt_list)
}

/// Alphanumeric-aware ordering: digit runs compare by numeric value, the
/// rest byte-wise, so `DPT_9001` sorts before `DPT_13010`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let a_run = take_digits(&mut a_chars);
                    let b_run = take_digits(&mut b_chars);

                    let ordering = match (a_run.parse::<u64>(), b_run.parse::<u64>()) {
                        (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
                        _ => a_run.cmp(&b_run),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                } else {
                    if ac != bc {
                        return ac.cmp(&bc);
                    }
                    a_chars.next();
                    b_chars.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(*c);
        chars.next();
    }
    run
}
