//! NFC payload for Value Added Services passes.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use pkpass_core::PassError;

use crate::writer::JsonWriter;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nfc {
    /// Payload sent to the terminal. The `nfc` key is only written when this
    /// is non-empty.
    pub message: String,
    /// Base64 public key used to encrypt the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_public_key: Option<String>,
    #[serde(default)]
    pub requires_authentication: bool,
}

impl Nfc {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_encryption_public_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_public_key = Some(key.into());
        self
    }

    /// Whether the `nfc` key should be written at all.
    pub fn is_emittable(&self) -> bool {
        !self.message.is_empty()
    }

    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        w.start_object()?;
        w.string_property("message", &self.message)?;
        w.optional_string_property("encryptionPublicKey", self.encryption_public_key.as_deref())?;
        if self.requires_authentication {
            w.bool_property("requiresAuthentication", true)?;
        }
        w.end_object()
    }
}
