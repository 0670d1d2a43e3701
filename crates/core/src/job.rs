//! Declarative label jobs.
//!
//! A [`LabelJob`] lists the operations of one job in document order: label
//! size, optional gap, text and barcode elements, and an optional print
//! trigger. It is a serialization of encoder calls, not a layout model;
//! positions are taken as given.
//!
//! ```json
//! {
//!   "size": { "width": 38, "height": 20, "unit": "mm" },
//!   "elements": [
//!     { "type": "text", "content": "Rs. 750", "x": 300, "y": 68,
//!       "x_multiplier": 12, "y_multiplier": 12 },
//!     { "type": "barcode", "data": "2024123030", "x": 33, "y": 304,
//!       "height": 20, "narrow": 2, "wide": 4 }
//!   ],
//!   "print": { "sets": 1, "copies": 1 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::command::{Alignment, Barcode, Symbology, Text, Unit};
use crate::connector::{Connector, ConnectorClosed, MemoryConnector};
use crate::encoder::Encoder;
use crate::error::TsplError;

/// One label job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelJob {
    /// Label size, sent when the encoder is created.
    pub size: Size,
    /// Gap between labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Gap>,
    /// Text and barcode elements, emitted in order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Print trigger. Without it the label is only buffered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print: Option<PrintCount>,
}

/// Label dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Size {
    /// Width, 1-100.
    pub width: u32,
    /// Height, 1-100.
    pub height: u32,
    /// Unit of both dimensions.
    #[serde(default)]
    pub unit: Unit,
}

/// Gap between labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gap {
    /// Gap distance, 0-255.
    pub x: u32,
    /// Gap offset, 0-255.
    pub y: u32,
    /// Unit of both values.
    #[serde(default)]
    pub unit: Unit,
}

/// Print trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrintCount {
    /// Number of label sets, 1-10.
    #[serde(default = "one")]
    pub sets: u32,
    /// Copies per set, 1-10.
    #[serde(default = "one")]
    pub copies: u32,
}

fn one() -> u32 {
    1
}

impl Default for PrintCount {
    fn default() -> Self {
        Self { sets: 1, copies: 1 }
    }
}

/// A positioned element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A `TEXT` command.
    Text(TextElement),
    /// A `BARCODE` command.
    Barcode(BarcodeElement),
}

/// Owned form of [`Text`]. Missing fields take the [`Text::new`] defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct TextElement {
    pub content: String,
    pub x: u32,
    pub y: u32,
    pub font: String,
    pub rotation: u16,
    pub x_multiplier: u8,
    pub y_multiplier: u8,
    pub alignment: Alignment,
}

impl Default for TextElement {
    fn default() -> Self {
        let t = Text::new("");
        Self {
            content: String::new(),
            x: t.x,
            y: t.y,
            font: t.font.to_string(),
            rotation: t.rotation,
            x_multiplier: t.x_multiplier,
            y_multiplier: t.y_multiplier,
            alignment: t.alignment,
        }
    }
}

impl TextElement {
    /// Borrow as encoder parameters.
    pub fn as_text(&self) -> Text<'_> {
        Text::new(&self.content)
            .at(self.x, self.y)
            .font(&self.font)
            .rotation(self.rotation)
            .scale(self.x_multiplier, self.y_multiplier)
            .align(self.alignment)
    }
}

/// Owned form of [`Barcode`]. Missing fields take the [`Barcode::new`]
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct BarcodeElement {
    pub data: String,
    pub x: u32,
    pub y: u32,
    pub symbology: Symbology,
    pub height: u32,
    pub human_readable: bool,
    pub rotation: u16,
    pub narrow: u8,
    pub wide: u8,
}

impl Default for BarcodeElement {
    fn default() -> Self {
        let b = Barcode::new("");
        Self {
            data: String::new(),
            x: b.x,
            y: b.y,
            symbology: b.symbology,
            height: b.height,
            human_readable: b.human_readable,
            rotation: b.rotation,
            narrow: b.narrow,
            wide: b.wide,
        }
    }
}

impl BarcodeElement {
    /// Borrow as encoder parameters.
    pub fn as_barcode(&self) -> Barcode<'_> {
        Barcode::new(&self.data)
            .at(self.x, self.y)
            .symbology(self.symbology.clone())
            .height(self.height)
            .human_readable(self.human_readable)
            .rotation(self.rotation)
            .widths(self.narrow, self.wide)
    }
}

impl LabelJob {
    /// Parse a job from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or unknown fields.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Drive an encoder over `connector` with this job's operations and
    /// return it. The connector is not finalized; call
    /// [`Encoder::close`] when done.
    ///
    /// # Errors
    ///
    /// Stops at the first failing operation and returns its error. Lines
    /// emitted before that point have already been written.
    pub fn encode<C: Connector>(&self, connector: C) -> Result<Encoder<C>, TsplError<C::Error>> {
        let mut encoder = Encoder::new(connector, self.size.width, self.size.height, self.size.unit)?;
        if let Some(gap) = self.gap {
            encoder.set_gap(gap.x, gap.y, gap.unit)?;
        }
        for element in &self.elements {
            match element {
                Element::Text(t) => encoder.set_text(&t.as_text())?,
                Element::Barcode(b) => encoder.set_barcode(&b.as_barcode())?,
            }
        }
        if let Some(print) = self.print {
            encoder.set_print(print.sets, print.copies)?;
        }
        Ok(encoder)
    }

    /// Encode into memory and return each write as a string, in order.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; nothing is returned partially.
    pub fn to_commands(&self) -> Result<Vec<String>, TsplError<ConnectorClosed>> {
        let mut out = MemoryConnector::new();
        let mut encoder = self.encode(&mut out)?;
        encoder.close()?;
        drop(encoder);
        Ok(out
            .chunks()
            .iter()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect())
    }

    /// A 38x20 mm price tag: size and price text, a Code 128 barcode, one
    /// print.
    pub fn price_tag_sample() -> Self {
        Self {
            size: Size {
                width: 38,
                height: 20,
                unit: Unit::Millimeters,
            },
            gap: None,
            elements: vec![
                Element::Text(TextElement {
                    content: "SIZE:32".into(),
                    x: 25,
                    y: 68,
                    x_multiplier: 12,
                    y_multiplier: 12,
                    ..TextElement::default()
                }),
                Element::Text(TextElement {
                    content: "Rs. 750".into(),
                    x: 300,
                    y: 68,
                    x_multiplier: 12,
                    y_multiplier: 12,
                    ..TextElement::default()
                }),
                Element::Barcode(BarcodeElement {
                    data: "2024123030".into(),
                    x: 33,
                    y: 304,
                    height: 20,
                    human_readable: true,
                    narrow: 2,
                    wide: 4,
                    ..BarcodeElement::default()
                }),
            ],
            print: Some(PrintCount::default()),
        }
    }
}
