//! Barcodes. Used both for the legacy singular `barcode` key and for each
//! entry of the `barcodes` array.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use pkpass_core::PassError;

use crate::writer::JsonWriter;

/// Symbology of a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "PKBarcodeFormatQR")]
    Qr,
    #[serde(rename = "PKBarcodeFormatPDF417")]
    Pdf417,
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
    #[serde(rename = "PKBarcodeFormatCode128")]
    Code128,
}

impl BarcodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qr => "PKBarcodeFormatQR",
            Self::Pdf417 => "PKBarcodeFormatPDF417",
            Self::Aztec => "PKBarcodeFormatAztec",
            Self::Code128 => "PKBarcodeFormatCode128",
        }
    }
}

/// A barcode shown on the pass face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub format: BarcodeFormat,
    pub message: String,
    /// IANA character set used to convert `message` to bytes, usually
    /// `iso-8859-1`.
    pub message_encoding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Barcode {
    pub fn new(
        format: BarcodeFormat,
        message: impl Into<String>,
        message_encoding: impl Into<String>,
    ) -> Self {
        Self {
            format,
            message: message.into(),
            message_encoding: message_encoding.into(),
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        w.start_object()?;
        w.string_property("format", self.format.as_str())?;
        w.string_property("message", &self.message)?;
        w.string_property("messageEncoding", &self.message_encoding)?;
        w.optional_string_property("altText", self.alt_text.as_deref())?;
        w.end_object()
    }
}
