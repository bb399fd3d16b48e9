//! # Error Types
//!
//! Defines the error hierarchy shared by every pkpass crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is immediate and hard. There is no retry and no
//!   partial-success mode.
//! - Errors raised by a mutator abort only that mutation; the request keeps
//!   its previous contents.
//! - Errors raised while writing leave the sink in an indeterminate state.
//!   Bytes already flushed are not rolled back, so callers must discard the
//!   sink.

use thiserror::Error;

/// Top-level error type for pass document assembly and serialization.
#[derive(Error, Debug)]
pub enum PassError {
    /// A field key collides with a key already present in one of the five
    /// field sections.
    #[error("duplicate field key: {key:?} is already used by another field")]
    DuplicateKey {
        /// The rejected key.
        key: String,
    },

    /// A relevancy interval spans more than 24 hours.
    #[error("relevancy interval from {start} to {end} spans more than 24 hours")]
    IntervalTooLong {
        /// Rendered start instant.
        start: String,
        /// Rendered end instant.
        end: String,
    },

    /// A `#`-prefixed color string is not a usable hex triple.
    #[error("invalid color {color:?}: {reason}")]
    InvalidColorFormat {
        /// The color string as supplied by the caller.
        color: String,
        /// Why the string was rejected.
        reason: String,
    },

    /// A field row index is neither 0 nor 1.
    #[error("field {key:?}: row must be 0 or 1, got {row}")]
    InvalidFieldRow {
        /// Key of the offending field.
        key: String,
        /// The rejected row.
        row: u8,
    },

    /// An image role has no filename mapping.
    #[error("no image role is mapped to {0:?}")]
    UnmappedImageRole(String),

    /// A wire or descriptor string does not name a known enum variant.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// Name of the enum being parsed.
        kind: &'static str,
        /// The offending input.
        value: String,
    },

    /// A date-time string could not be parsed.
    #[error("invalid date-time: {0}")]
    InvalidDateTime(String),

    /// The streaming writer was driven in a structurally invalid order.
    #[error("json writer misuse: {0}")]
    Writer(String),

    /// JSON encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the sink failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PassError {
    /// Returns true for errors caused by caller-supplied data, as opposed to
    /// sink or writer failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. }
                | Self::IntervalTooLong { .. }
                | Self::InvalidColorFormat { .. }
                | Self::InvalidFieldRow { .. }
                | Self::UnmappedImageRole(_)
                | Self::UnknownVariant { .. }
                | Self::InvalidDateTime(_)
        )
    }
}
