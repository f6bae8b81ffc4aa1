use crate::models::Measurement;
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Unable to write the telegraf config: {0}")]
    Io(#[from] io::Error),
    #[error("Unable to serialize the telegraf config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unable to replace the telegraf config: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Serialize)]
pub struct TelegrafConfig {
    pub inputs: TelegrafInputs,
}

#[derive(Debug, Serialize)]
pub struct TelegrafInputs {
    pub knx_listener: KnxListenerInput,
}

#[derive(Debug, Serialize)]
pub struct KnxListenerInput {
    pub service_type: String,
    pub service_address: String,
    pub measurement: Vec<Measurement>,
}

/// Wraps the measurement catalog into the knx_listener input document and
/// writes it as TOML. The serializer emits `knx_listener` as a single table;
/// telegraf wants an array of tables, which `repair_telegraf_config` fixes
/// up afterwards.
pub struct ConfigEmitter {
    service_type: String,
    service_address: String,
}

impl ConfigEmitter {
    pub fn new(service_type: String, service_address: String) -> Self {
        Self {
            service_type,
            service_address,
        }
    }

    pub fn build(&self, measurements: Vec<Measurement>) -> TelegrafConfig {
        TelegrafConfig {
            inputs: TelegrafInputs {
                knx_listener: KnxListenerInput {
                    service_type: self.service_type.clone(),
                    service_address: self.service_address.clone(),
                    measurement: measurements,
                },
            },
        }
    }

    /// Serialize and write the raw document. Callers must run
    /// `repair_telegraf_config` on the file afterwards.
    pub fn write<P: AsRef<Path>>(
        &self,
        measurements: Vec<Measurement>,
        path: P,
    ) -> Result<(), EmitError> {
        let document = toml::to_string(&self.build(measurements))?;
        fs::write(path, document)?;
        Ok(())
    }
}

/// Rewrite the serializer's single-table `[inputs.knx_listener]` header to
/// the array-of-tables form telegraf expects, and strip the trailing comma
/// some writers leave before the closing bracket of an `addresses` array.
///
/// Line-oriented on purpose: the repaired copy is built in a temp file next
/// to the destination and atomically swapped in, so a crash never leaves a
/// half-rewritten config behind. Idempotent on already-repaired files.
pub fn repair_telegraf_config<P: AsRef<Path>>(path: P) -> Result<(), EmitError> {
    let path = path.as_ref();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;

    let reader = BufReader::new(fs::File::open(path)?);
    for line in reader.lines() {
        let line = line?;

        let line = if line.trim() == "[inputs.knx_listener]" {
            line.replace("[inputs.knx_listener]", "[[inputs.knx_listener]]")
        } else if line.contains("addresses") {
            line.replace(",]", " ]")
        } else {
            line
        };

        writeln!(temp, "{}", line)?;
    }

    temp.flush()?;
    temp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(name: &str, address: &str, dpt: &str) -> Measurement {
        Measurement {
            name: name.to_string(),
            addresses: vec![address.to_string()],
            dpt: dpt.to_string(),
        }
    }

    #[test]
    fn test_emitted_document_shape() {
        let emitter = ConfigEmitter::new("knxd".to_string(), "tunnel/tcp".to_string());
        let document = toml::to_string(&emitter.build(vec![
            measurement("Light", "1/1/1", "1.001"),
            measurement("Temp", "3/0/1", "9.001"),
        ]))
        .unwrap();

        assert!(document.contains("[inputs.knx_listener]"));
        assert!(document.contains("service_type = \"knxd\""));
        assert!(document.contains("service_address = \"tunnel/tcp\""));
        assert_eq!(document.matches("[[inputs.knx_listener.measurement]]").count(), 2);
        assert!(document.contains("addresses = [\"1/1/1\"]"));
        assert!(document.contains("dpt = \"9.001\""));
    }

    #[test]
    fn test_write_and_repair_produces_final_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telegraf_knx.conf");

        let emitter = ConfigEmitter::new("knxd".to_string(), "tunnel/tcp".to_string());
        emitter
            .write(vec![measurement("Light", "1/1/1", "1.001")], &path)
            .unwrap();
        repair_telegraf_config(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[[inputs.knx_listener]]"));
        assert!(!contents.contains("\n[inputs.knx_listener]\n"));
        assert!(contents.contains("[[inputs.knx_listener.measurement]]"));
        assert!(!contents.contains(",]"));
    }

    #[test]
    fn test_repair_rewrites_singular_marker_and_trailing_comma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.conf");
        fs::write(
            &path,
            "[inputs.knx_listener]\n\
             service_type = \"knxd\"\n\
             [[inputs.knx_listener.measurement]]\n\
             addresses = [\"1/1/1\",\"1/1/2\",]\n\
             dpt = \"1.001\"\n",
        )
        .unwrap();

        repair_telegraf_config(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[[inputs.knx_listener]]\n\
             service_type = \"knxd\"\n\
             [[inputs.knx_listener.measurement]]\n\
             addresses = [\"1/1/1\",\"1/1/2\" ]\n\
             dpt = \"1.001\"\n"
        );
    }

    #[test]
    fn test_repair_is_idempotent_on_final_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final.conf");
        fs::write(
            &path,
            "[[inputs.knx_listener]]\n\
             service_type = \"knxd\"\n\
             [[inputs.knx_listener.measurement]]\n\
             addresses = [\"1/1/1\" ]\n",
        )
        .unwrap();

        repair_telegraf_config(&path).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        repair_telegraf_config(&path).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("[[inputs.knx_listener]]"));
        assert!(!first.contains("[[[inputs.knx_listener]]]"));
    }

    #[test]
    fn test_repair_leaves_unrelated_lines_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.conf");
        fs::write(
            &path,
            "# comment with ,] inside\n\
             name = \"Light, hall\"\n\
             dpt = \"1.001\"\n",
        )
        .unwrap();

        repair_telegraf_config(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# comment with ,] inside\n\
             name = \"Light, hall\"\n\
             dpt = \"1.001\"\n"
        );
    }
}
