//! TSPL toolchain core library.
//!
//! Encodes label-printing operations (label size, gap, text, barcodes,
//! print triggers) into the line-oriented TSPL command language spoken by
//! TSC and compatible thermal label printers. The main entry point is
//! [`Encoder`], which validates every parameter before formatting a command
//! line and handing it to a [`Connector`].
//!
//! ```
//! use tspl_toolchain_core::{Encoder, MemoryConnector, Text, Unit};
//!
//! let mut out = MemoryConnector::new();
//! let mut encoder = Encoder::new(&mut out, 38, 20, Unit::Millimeters)?;
//! encoder.set_text(&Text::new("Rs. 750").at(300, 68).scale(12, 12))?;
//! encoder.set_print(1, 1)?;
//! encoder.close()?;
//! drop(encoder);
//!
//! assert!(out.as_string().starts_with("SIZE 38 mm 20 mm\r\n"));
//! # Ok::<(), tspl_toolchain_core::TsplError<tspl_toolchain_core::ConnectorClosed>>(())
//! ```

#![warn(missing_docs)]

/// Protocol vocabulary and command-line formatting.
pub mod command;
/// The connector contract and the in-memory connector.
pub mod connector;
/// The stateful, validating command encoder.
pub mod encoder;
/// Error types produced by the encoder.
pub mod error;
/// Declarative label jobs (JSON interchange).
pub mod job;
/// Numeric range validation shared by every operation.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Vocabulary
pub use command::{Alignment, Barcode, END_OF_PRINT, LINE_BREAK, Symbology, Text, Unit};

// Connectors
pub use connector::{Connector, ConnectorClosed, EncoderId, MemoryConnector};

// Encoder
pub use encoder::{Encoder, LabelSize};

// Errors
pub use error::TsplError;
pub use validate::InvalidParameter;

// Jobs
pub use job::{BarcodeElement, Element, Gap, LabelJob, PrintCount, Size, TextElement};
