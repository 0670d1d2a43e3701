//! TSPL vocabulary and command-line formatting.
//!
//! Every command is a single ASCII line: keyword, a space, then
//! comma-separated positional fields, string fields double-quoted, ending in
//! [`LINE_BREAK`]. The printer parses fields by position, so field order and
//! punctuation here are load-bearing.
//!
//! The functions in this module only format; range checks live in
//! [`crate::validate`] and are applied by [`crate::Encoder`] before any of
//! these are called.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-character terminator that ends every command line.
pub const LINE_BREAK: &str = "\r\n";

/// Bare end-of-job marker sent after `PRINT`. Written without a terminator.
pub const END_OF_PRINT: &str = "EOP";

// ── Vocabulary ──────────────────────────────────────────────────────────

/// Unit for label size and gap dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    /// The printer's native unit (inches for `SIZE`/`GAP` on most models).
    #[default]
    #[serde(rename = "native")]
    Native,
    /// Millimetres.
    #[serde(rename = "mm")]
    Millimeters,
}

/// Text justification, sent as a small integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-aligned (code `1`).
    #[default]
    Left,
    /// Centered (code `2`).
    Center,
    /// Right-aligned (code `3`).
    Right,
}

impl Alignment {
    /// Protocol code for this alignment.
    pub fn code(self) -> u8 {
        match self {
            Alignment::Left => 1,
            Alignment::Center => 2,
            Alignment::Right => 3,
        }
    }
}

/// Barcode symbology token (`"128"`, `"39"`, ...).
///
/// Tokens are passed through to the printer unchecked. The associated
/// constants cover the common TSPL symbologies; anything else can be built
/// with [`Symbology::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbology(Cow<'static, str>);

impl Symbology {
    /// Interleaved 2 of 5.
    pub const CODE_25: Symbology = Symbology(Cow::Borrowed("25"));
    /// Interleaved 2 of 5 with check digit.
    pub const CODE_25C: Symbology = Symbology(Cow::Borrowed("25C"));
    /// Code 39 full ASCII.
    pub const CODE_39: Symbology = Symbology(Cow::Borrowed("39"));
    /// Code 39 full ASCII with check digit.
    pub const CODE_39C: Symbology = Symbology(Cow::Borrowed("39C"));
    /// Code 39 standard.
    pub const CODE_39S: Symbology = Symbology(Cow::Borrowed("39S"));
    /// Code 93.
    pub const CODE_93: Symbology = Symbology(Cow::Borrowed("93"));
    /// Code 128 with automatic subset switching.
    pub const CODE_128: Symbology = Symbology(Cow::Borrowed("128"));
    /// Code 128 with manual subset selection.
    pub const CODE_128M: Symbology = Symbology(Cow::Borrowed("128M"));
    /// GS1-128 (UCC/EAN-128).
    pub const EAN_128: Symbology = Symbology(Cow::Borrowed("EAN128"));
    /// EAN-13.
    pub const EAN_13: Symbology = Symbology(Cow::Borrowed("EAN13"));
    /// EAN-8.
    pub const EAN_8: Symbology = Symbology(Cow::Borrowed("EAN8"));
    /// EAN-14.
    pub const EAN_14: Symbology = Symbology(Cow::Borrowed("EAN14"));
    /// UPC-A.
    pub const UPC_A: Symbology = Symbology(Cow::Borrowed("UPCA"));
    /// UPC-E.
    pub const UPC_E: Symbology = Symbology(Cow::Borrowed("UPCE"));
    /// Codabar.
    pub const CODABAR: Symbology = Symbology(Cow::Borrowed("CODA"));
    /// MSI.
    pub const MSI: Symbology = Symbology(Cow::Borrowed("MSI"));
    /// ITF-14.
    pub const ITF_14: Symbology = Symbology(Cow::Borrowed("ITF14"));

    /// A symbology token not covered by the named constants.
    pub fn custom(token: impl Into<String>) -> Self {
        Symbology(Cow::Owned(token.into()))
    }

    /// The token as sent to the printer.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Symbology {
    fn default() -> Self {
        Symbology::CODE_128
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Parameter sets ──────────────────────────────────────────────────────

/// Parameters of a `TEXT` command.
///
/// Only the multiplication factors are range-checked; position, font and
/// rotation are passed to the printer as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text<'a> {
    /// The literal text, emitted inside double quotes.
    pub content: &'a str,
    /// Horizontal position in dots.
    pub x: u32,
    /// Vertical position in dots.
    pub y: u32,
    /// Font name (`"0"`..`"8"` for built-in fonts, or a downloaded font file).
    pub font: &'a str,
    /// Rotation in degrees.
    pub rotation: u16,
    /// Horizontal multiplication, 1-15.
    pub x_multiplier: u8,
    /// Vertical multiplication, 1-15.
    pub y_multiplier: u8,
    /// Justification.
    pub alignment: Alignment,
}

impl<'a> Text<'a> {
    /// Text at (10, 10) in font `"0"`, unrotated, unscaled, left-aligned.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            x: 10,
            y: 10,
            font: "0",
            rotation: 0,
            x_multiplier: 1,
            y_multiplier: 1,
            alignment: Alignment::Left,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the font name.
    #[must_use]
    pub fn font(mut self, font: &'a str) -> Self {
        self.font = font;
        self
    }

    /// Set the rotation.
    #[must_use]
    pub fn rotation(mut self, degrees: u16) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set horizontal and vertical multiplication.
    #[must_use]
    pub fn scale(mut self, x_multiplier: u8, y_multiplier: u8) -> Self {
        self.x_multiplier = x_multiplier;
        self.y_multiplier = y_multiplier;
        self
    }

    /// Set the justification.
    #[must_use]
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Parameters of a `BARCODE` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode<'a> {
    /// Data to encode, emitted inside double quotes.
    pub data: &'a str,
    /// Horizontal position in dots, 1-350.
    pub x: u32,
    /// Vertical position in dots, 1-10000.
    pub y: u32,
    /// Symbology token.
    pub symbology: Symbology,
    /// Bar height in dots, 1-100.
    pub height: u32,
    /// Print the human-readable interpretation below the bars.
    pub human_readable: bool,
    /// Rotation in degrees, 0-361.
    pub rotation: u16,
    /// Narrow bar width in dots, 1-10.
    pub narrow: u8,
    /// Wide bar width in dots, 1-10.
    pub wide: u8,
}

impl<'a> Barcode<'a> {
    /// Code 128 at (10, 10), 50 dots high, no human-readable line,
    /// unrotated, 1-dot bars.
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            x: 10,
            y: 10,
            symbology: Symbology::CODE_128,
            height: 50,
            human_readable: false,
            rotation: 0,
            narrow: 1,
            wide: 1,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the symbology.
    #[must_use]
    pub fn symbology(mut self, symbology: Symbology) -> Self {
        self.symbology = symbology;
        self
    }

    /// Set the bar height.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Enable or disable the human-readable line.
    #[must_use]
    pub fn human_readable(mut self, enabled: bool) -> Self {
        self.human_readable = enabled;
        self
    }

    /// Set the rotation.
    #[must_use]
    pub fn rotation(mut self, degrees: u16) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set narrow and wide bar widths.
    #[must_use]
    pub fn widths(mut self, narrow: u8, wide: u8) -> Self {
        self.narrow = narrow;
        self.wide = wide;
        self
    }
}

// ── Formatting ──────────────────────────────────────────────────────────

/// `SIZE <w>[ mm] <h>[ mm]`
pub fn size(width: u32, height: u32, unit: Unit) -> String {
    let suffix = match unit {
        Unit::Native => "",
        Unit::Millimeters => " mm",
    };
    format!("SIZE {width}{suffix} {height}{suffix}{LINE_BREAK}")
}

/// `GAP <gx>[ MM ],<gy>[ MM ]`
pub fn gap(gap_x: u32, gap_y: u32, unit: Unit) -> String {
    let suffix = match unit {
        Unit::Native => "",
        Unit::Millimeters => " MM ",
    };
    format!("GAP {gap_x}{suffix},{gap_y}{suffix}{LINE_BREAK}")
}

/// `DIRECTION 1`
pub fn direction() -> String {
    format!("DIRECTION 1{LINE_BREAK}")
}

/// `CLS`
pub fn cls() -> String {
    format!("CLS{LINE_BREAK}")
}

/// `TEXT <x>,<y>,"<font>",<rotation>,<hmul>,<vmul>,<align>,"<text>"`
pub fn text(t: &Text<'_>) -> String {
    format!(
        "TEXT {},{},\"{}\",{},{},{},{},\"{}\"{LINE_BREAK}",
        t.x,
        t.y,
        t.font,
        t.rotation,
        t.x_multiplier,
        t.y_multiplier,
        t.alignment.code(),
        t.content,
    )
}

/// `BARCODE <x>,<y>,"<symbology>",<height>,<hr>,<rotation>,<narrow>,<wide>, "<data>"`
///
/// The space before the quoted data is part of the established wire format.
pub fn barcode(b: &Barcode<'_>) -> String {
    format!(
        "BARCODE {},{},\"{}\",{},{},{},{},{}, \"{}\"{LINE_BREAK}",
        b.x,
        b.y,
        b.symbology,
        b.height,
        u8::from(b.human_readable),
        b.rotation,
        b.narrow,
        b.wide,
        b.data,
    )
}

/// `PRINT <sets>,<copies>`
pub fn print(sets: u32, copies: u32) -> String {
    format!("PRINT {sets},{copies}{LINE_BREAK}")
}
