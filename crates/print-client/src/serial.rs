//! Serial/Bluetooth SPP connector using the `serialport` crate.
//!
//! Feature-gated behind the `serial` Cargo feature.

use std::io::Write;

use tspl_toolchain_core::{Connector, EncoderId};

use crate::{PrintError, PrinterConfig, trace_payload};

/// Default baud rate for TSC label printers (9600 8N1).
const DEFAULT_BAUD: u32 = 9600;

/// A label printer on a serial port (RS-232, USB-serial, or Bluetooth SPP).
pub struct SerialConnector {
    port: Box<dyn serialport::SerialPort>,
    config: PrinterConfig,
    finalized: bool,
    owner: Option<EncoderId>,
}

impl std::fmt::Debug for SerialConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialConnector")
            .field("port", &self.port.name())
            .field("finalized", &self.finalized)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl SerialConnector {
    /// Open a serial port at the given path and baud rate.
    ///
    /// # Arguments
    ///
    /// * `path`: Serial port path, e.g. `/dev/ttyUSB0`, `/dev/rfcomm0`, `COM3`.
    /// * `baud`: Baud rate. TSC printers ship at 9600; many are configured
    ///   for 19200, 38400, or 115200.
    /// * `config`: Connector configuration; the write timeout applies.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::SerialError` if the port cannot be opened.
    pub fn open(path: &str, baud: u32, config: PrinterConfig) -> Result<Self, PrintError> {
        config.validate()?;
        let port = serialport::new(path, baud)
            .timeout(config.timeouts.write)
            .open()
            .map_err(|e| PrintError::SerialError(e.to_string()))?;
        tracing::debug!(path, baud, "serial port opened");

        Ok(Self {
            port,
            config,
            finalized: false,
            owner: None,
        })
    }

    /// Open a serial port at 9600 baud.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::SerialError` if the port cannot be opened.
    pub fn open_default(path: &str, config: PrinterConfig) -> Result<Self, PrintError> {
        Self::open(path, DEFAULT_BAUD, config)
    }

    /// List available serial port names on the system.
    ///
    /// On Linux this crate is built without `libudev`, so enumeration uses
    /// the sysfs fallback and may report fewer details.
    pub fn list_ports() -> Vec<String> {
        serialport::available_ports()
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.port_name)
            .collect()
    }
}

impl Connector for SerialConnector {
    type Error = PrintError;

    fn write(&mut self, payload: &[u8]) -> Result<(), PrintError> {
        if self.finalized {
            return Err(PrintError::Finalized);
        }
        trace_payload(&self.config, "serial", payload);
        self.port.write_all(payload).map_err(PrintError::WriteFailed)?;
        self.port.flush().map_err(PrintError::WriteFailed)
    }

    fn finalize(&mut self) -> Result<(), PrintError> {
        if self.finalized {
            return Err(PrintError::Finalized);
        }
        self.finalized = true;
        self.port.flush().map_err(PrintError::WriteFailed)
    }

    fn owner(&self) -> Option<EncoderId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        self.owner = owner;
    }
}
