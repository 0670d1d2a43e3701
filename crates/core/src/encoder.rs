//! The label command encoder.
//!
//! [`Encoder`] turns label operations into TSPL lines and writes them to a
//! [`Connector`] in call order. Every operation checks all of its numeric
//! parameters first; an out-of-range value aborts the operation before
//! anything is written.

use std::mem;

use crate::command::{self, Barcode, END_OF_PRINT, Text, Unit};
use crate::connector::{Connector, EncoderId};
use crate::error::TsplError;
use crate::validate::check_range;

/// Current label dimensions as last sent with `SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSize {
    /// Label width, 1-100.
    pub width: u32,
    /// Label height, 1-100.
    pub height: u32,
    /// Unit of `width` and `height`.
    pub unit: Unit,
}

/// Stateful, validating TSPL encoder bound to one connector.
///
/// The connector is held by value; pass `&mut connector` to keep ownership
/// with the caller, or an `Rc<RefCell<_>>` handle to share it. While bound,
/// the connector reports this encoder's [`EncoderId`] as its owner, and a
/// connector owned by another encoder cannot be bound. Dropping the encoder
/// releases the connector.
#[derive(Debug)]
pub struct Encoder<C: Connector> {
    connector: C,
    id: EncoderId,
    size: LabelSize,
}

impl<C: Connector> Encoder<C> {
    /// Bind `connector` and emit the label size followed by
    /// `DIRECTION 1` and `CLS`.
    ///
    /// # Errors
    ///
    /// - [`TsplError::InvalidParameter`] if `width` or `height` is outside
    ///   1-100 (checked in either unit). Nothing is written.
    /// - [`TsplError::AlreadyBound`] if the connector belongs to another
    ///   encoder. Nothing is written.
    /// - [`TsplError::Connector`] if a write fails.
    pub fn new(
        mut connector: C,
        width: u32,
        height: u32,
        unit: Unit,
    ) -> Result<Self, TsplError<C::Error>> {
        check_size(width, height)?;

        let id = EncoderId::next();
        if let Some(owner) = connector.owner() {
            return Err(TsplError::AlreadyBound { owner });
        }
        connector.set_owner(Some(id));
        tracing::debug!(encoder = %id, width, height, ?unit, "encoder created");

        let mut encoder = Self {
            connector,
            id,
            size: LabelSize {
                width,
                height,
                unit,
            },
        };
        encoder.emit(&command::size(width, height, unit))?;
        encoder.initialize()?;
        Ok(encoder)
    }

    /// This encoder's identity, as recorded by its connector.
    pub fn id(&self) -> EncoderId {
        self.id
    }

    /// The label size most recently sent.
    pub fn size(&self) -> LabelSize {
        self.size
    }

    /// The bound connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Mutable access to the bound connector.
    ///
    /// Writing through this bypasses validation; the owner must not be
    /// changed by hand.
    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Reset print direction and clear the image buffer
    /// (`DIRECTION 1`, `CLS`).
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::Connector`] if a write fails.
    pub fn initialize(&mut self) -> Result<(), TsplError<C::Error>> {
        self.emit(&command::direction())?;
        self.emit(&command::cls())
    }

    /// Send a new label size (`SIZE`). Both dimensions must be 1-100.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::InvalidParameter`] for an out-of-range
    /// dimension, [`TsplError::Connector`] if the write fails.
    pub fn set_size(
        &mut self,
        width: u32,
        height: u32,
        unit: Unit,
    ) -> Result<(), TsplError<C::Error>> {
        check_size(width, height)?;
        self.emit(&command::size(width, height, unit))?;
        self.size = LabelSize {
            width,
            height,
            unit,
        };
        Ok(())
    }

    /// Send the gap between labels (`GAP`). Both values must be 0-255.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::InvalidParameter`] for an out-of-range gap,
    /// [`TsplError::Connector`] if the write fails.
    pub fn set_gap(
        &mut self,
        gap_x: u32,
        gap_y: u32,
        unit: Unit,
    ) -> Result<(), TsplError<C::Error>> {
        check_range(gap_x, 0, 255, "set_gap", "gap_x")?;
        check_range(gap_y, 0, 255, "set_gap", "gap_y")?;
        self.emit(&command::gap(gap_x, gap_y, unit))
    }

    /// Place a text field (`TEXT`). Multiplication factors must be 1-15.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::InvalidParameter`] for an out-of-range
    /// multiplier, [`TsplError::Connector`] if the write fails.
    pub fn set_text(&mut self, text: &Text<'_>) -> Result<(), TsplError<C::Error>> {
        check_range(text.x_multiplier, 1, 15, "set_text", "x_multiplier")?;
        check_range(text.y_multiplier, 1, 15, "set_text", "y_multiplier")?;
        self.emit(&command::text(text))
    }

    /// Place a barcode (`BARCODE`).
    ///
    /// Accepted ranges: x 1-350, y 1-10000, height 1-100, rotation 0-361,
    /// narrow and wide 1-10. The symbology token is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::InvalidParameter`] for the first out-of-range
    /// field, [`TsplError::Connector`] if the write fails.
    pub fn set_barcode(&mut self, barcode: &Barcode<'_>) -> Result<(), TsplError<C::Error>> {
        const OP: &str = "set_barcode";
        check_range(barcode.x, 1, 350, OP, "x")?;
        check_range(barcode.y, 1, 10_000, OP, "y")?;
        check_range(barcode.height, 1, 100, OP, "height")?;
        check_range(barcode.rotation, 0, 361, OP, "rotation")?;
        check_range(barcode.narrow, 1, 10, OP, "narrow")?;
        check_range(barcode.wide, 1, 10, OP, "wide")?;
        self.emit(&command::barcode(barcode))
    }

    /// Print the buffered label (`PRINT`), then send the bare `EOP` marker.
    /// `sets` and `copies` must be 1-10.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::InvalidParameter`] for an out-of-range count,
    /// [`TsplError::Connector`] if a write fails.
    pub fn set_print(&mut self, sets: u32, copies: u32) -> Result<(), TsplError<C::Error>> {
        check_range(sets, 1, 10, "set_print", "sets")?;
        check_range(copies, 1, 10, "set_print", "copies")?;
        self.emit(&command::print(sets, copies))?;
        self.emit(END_OF_PRINT)
    }

    /// Finalize the connector. With some connectors nothing reaches the
    /// printer until this is called.
    ///
    /// # Errors
    ///
    /// Returns whatever the connector's `finalize` returns, unchanged.
    pub fn close(&mut self) -> Result<(), TsplError<C::Error>> {
        tracing::debug!(encoder = %self.id, "finalizing connector");
        self.connector.finalize().map_err(TsplError::Connector)
    }

    /// Swap in a different connector, returning the previous one.
    ///
    /// The previous connector is released (its owner cleared) before the new
    /// one is claimed. Rebinding a connector this encoder already owns is
    /// allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TsplError::AlreadyBound`] if `connector` is owned by a
    /// different encoder. Both encoders keep their current bindings.
    pub fn bind(&mut self, mut connector: C) -> Result<C, TsplError<C::Error>> {
        if let Some(owner) = connector.owner()
            && owner != self.id
        {
            return Err(TsplError::AlreadyBound { owner });
        }

        self.connector.set_owner(None);
        connector.set_owner(Some(self.id));
        let previous = mem::replace(&mut self.connector, connector);
        tracing::debug!(encoder = %self.id, "connector rebound");
        Ok(previous)
    }

    fn emit(&mut self, line: &str) -> Result<(), TsplError<C::Error>> {
        tracing::trace!(encoder = %self.id, command = line.trim_end(), "emit");
        self.connector
            .write(line.as_bytes())
            .map_err(TsplError::Connector)
    }
}

impl<C: Connector> Drop for Encoder<C> {
    fn drop(&mut self) {
        if self.connector.owner() == Some(self.id) {
            self.connector.set_owner(None);
        }
    }
}

fn check_size(width: u32, height: u32) -> Result<(), crate::InvalidParameter> {
    check_range(width, 1, 100, "set_size", "width")?;
    check_range(height, 1, 100, "set_size", "height")
}
