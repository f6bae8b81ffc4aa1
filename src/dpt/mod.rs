use crate::models::DptType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DptError {
    #[error("No datapoint type found for the address")]
    MissingDatapointType,
}

/// Canonical dpt identifier plus whether the subtype had to be defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDpt {
    pub dpt: String,
    pub sub_defaulted: bool,
}

/// Canonicalize a datapoint type to the `"main.sub"` form used throughout
/// the telegraf config, with `sub` zero-padded to three digits.
///
/// A missing subtype is replaced by `default_sub`; the caller decides whether
/// such records are kept or dropped. A missing datapoint type is an error,
/// those addresses can never be decoded.
pub fn format_dpt(dpt_type: Option<&DptType>, default_sub: u16) -> Result<FormattedDpt, DptError> {
    let dpt_type = dpt_type.ok_or(DptError::MissingDatapointType)?;

    let sub_defaulted = dpt_type.sub.is_none();
    let sub = dpt_type.sub.unwrap_or(default_sub);

    Ok(FormattedDpt {
        dpt: format!("{}.{:03}", dpt_type.main, sub),
        sub_defaulted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dpt() {
        let dpt = DptType { main: 1, sub: Some(1) };
        let result = format_dpt(Some(&dpt), 0).unwrap();
        assert_eq!(result.dpt, "1.001");
        assert!(!result.sub_defaulted);

        let dpt = DptType { main: 14, sub: Some(56) };
        assert_eq!(format_dpt(Some(&dpt), 0).unwrap().dpt, "14.056");

        let dpt = DptType { main: 232, sub: Some(600) };
        assert_eq!(format_dpt(Some(&dpt), 0).unwrap().dpt, "232.600");
    }

    #[test]
    fn test_format_dpt_defaults_missing_subtype() {
        let dpt = DptType { main: 9, sub: None };
        let result = format_dpt(Some(&dpt), 0).unwrap();
        assert_eq!(result.dpt, "9.000");
        assert!(result.sub_defaulted);

        // The default sentinel is caller-configured, not hardwired
        let result = format_dpt(Some(&dpt), 1).unwrap();
        assert_eq!(result.dpt, "9.001");
        assert!(result.sub_defaulted);
    }

    #[test]
    fn test_format_dpt_missing_type() {
        assert_eq!(format_dpt(None, 0), Err(DptError::MissingDatapointType));
    }

    #[test]
    fn test_format_dpt_is_pure() {
        let dpt = DptType { main: 5, sub: Some(1) };
        let a = format_dpt(Some(&dpt), 0).unwrap();
        let b = format_dpt(Some(&dpt), 0).unwrap();
        assert_eq!(a, b);
    }
}
