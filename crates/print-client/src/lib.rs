//! TSPL print client: deliver encoded TSPL to label printers.
//!
//! Every connector here implements [`tspl_toolchain_core::Connector`], so it
//! can be handed straight to an [`Encoder`](tspl_toolchain_core::Encoder):
//!
//! - [`FileConnector`]: a file, device node (`/dev/usb/lp0`), or stdout.
//! - [`TcpConnector`]: raw TCP, port 9100 by default.
//! - `SerialConnector`: RS-232, USB-serial or Bluetooth SPP (feature `serial`).
//!
//! The API is synchronous (`std::net`, `std::fs`) and write-only: printer
//! responses are never read, and failed writes are reported, not retried.
mod addr;
mod config;
mod error;
mod file;
#[cfg(feature = "serial")]
mod serial;
#[cfg(feature = "tcp")]
mod tcp;

pub use addr::DEFAULT_PORT;
#[cfg(feature = "tcp")]
pub use addr::resolve_printer_addr;
pub use config::{PrinterConfig, PrinterTimeouts};
pub use error::PrintError;
pub use file::FileConnector;
#[cfg(feature = "serial")]
pub use serial::SerialConnector;
#[cfg(feature = "tcp")]
pub use tcp::TcpConnector;

pub use tspl_toolchain_core::{Connector, EncoderId};

/// Emit a payload dump at `trace` level when `trace_io` is enabled.
pub(crate) fn trace_payload(config: &PrinterConfig, target: &str, payload: &[u8]) {
    if config.trace_io {
        tracing::trace!(
            target: "tspl::io",
            connector = target,
            len = payload.len(),
            bytes = %payload.escape_ascii(),
            "write"
        );
    }
}
