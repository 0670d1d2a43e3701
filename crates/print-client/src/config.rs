//! Configuration types for the print client.

use std::time::Duration;

use crate::PrintError;

/// Connector configuration: timeouts and I/O tracing.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PrinterConfig {
    /// Network/transport timeout settings.
    pub timeouts: PrinterTimeouts,
    /// Log every payload at `trace` level (target `tspl::io`).
    pub trace_io: bool,
}

/// Timeout settings for printer connections.
///
/// Defaults are tuned for LAN-connected label printers:
/// - `connect`: 5s (generous for LAN, might be tight for VPN)
/// - `write`: 30s (a printer pauses reads while its buffer drains)
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PrinterTimeouts {
    /// Maximum time to wait for a TCP/serial connection to establish.
    #[cfg_attr(feature = "serde", serde(rename = "connect_ms", with = "millis"))]
    pub connect: Duration,
    /// Maximum time to wait for a write to complete.
    #[cfg_attr(feature = "serde", serde(rename = "write_ms", with = "millis"))]
    pub write: Duration,
}

impl Default for PrinterTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            write: Duration::from_secs(30),
        }
    }
}

impl PrinterConfig {
    /// Reject zero timeouts, which `std::net` treats as an error.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), PrintError> {
        if self.timeouts.connect.is_zero() {
            return Err(PrintError::InvalidConfig(
                "connect timeout must be non-zero".into(),
            ));
        }
        if self.timeouts.write.is_zero() {
            return Err(PrintError::InvalidConfig(
                "write timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PrinterConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeouts_rejected() {
        let mut cfg = PrinterConfig::default();
        cfg.timeouts.connect = Duration::ZERO;
        assert!(matches!(cfg.validate(), Err(PrintError::InvalidConfig(_))));

        let mut cfg = PrinterConfig::default();
        cfg.timeouts.write = Duration::ZERO;
        assert!(matches!(cfg.validate(), Err(PrintError::InvalidConfig(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn timeouts_in_milliseconds() {
        let cfg: PrinterConfig =
            serde_json::from_str(r#"{"timeouts": {"connect_ms": 1500}, "trace_io": true}"#)
                .unwrap();
        assert_eq!(cfg.timeouts.connect, Duration::from_millis(1500));
        assert_eq!(cfg.timeouts.write, Duration::from_secs(30));
        assert!(cfg.trace_io);

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["timeouts"]["write_ms"], 30_000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_config_fields_rejected() {
        let res: Result<PrinterConfig, _> = serde_json::from_str(r#"{"retries": 3}"#);
        assert!(res.is_err());
    }
}
