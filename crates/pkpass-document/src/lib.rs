//! # pkpass-document: Pass Document Model and Serializer
//!
//! Builds the `pass.json` document of a wallet pass from an in-memory
//! description, validating the format's structural rules on the way in and
//! again on the way out.
//!
//! - **Entity model** (`field.rs`, `barcode.rs`, `relevance.rs`, `nfc.rs`,
//!   `localization.rs`): value objects for every pass attribute.
//!
//! - **Validation** (`validation.rs`): field-key uniqueness, the 24-hour
//!   relevancy span, and color syntax. Checks run inside the mutators that
//!   could break them.
//!
//! - **Semantic tags** (`semantics.rs`): a closed catalogue of typed tags
//!   plus the [`TagEncoder`] extension point.
//!
//! - **Serialization** (`serialize.rs`, `writer.rs`, `observer.rs`): the
//!   fixed top-level emission order, driven through a streaming writer with
//!   per-section progress hooks.
//!
//! - **Descriptors** (`descriptor.rs`): YAML/JSON pass descriptions that
//!   convert into a [`PassRequest`] through the same validating mutators.
//!
//! - **Bundle** (`bundle.rs`): the payloads handed to packaging.
//!
//! ## Example
//!
//! ```
//! use pkpass_core::PassStyle;
//! use pkpass_document::{Field, PassRequest, SemanticTag};
//!
//! let mut pass = PassRequest::new(PassStyle::EventTicket);
//! pass.serial_number = "0001".into();
//! pass.add_primary_field(Field::new("event", "Event", "Final")).unwrap();
//! pass.add_semantic_tag(SemanticTag::event_name("Final"));
//!
//! let json = pass.to_json_vec().unwrap();
//! assert!(json.starts_with(br#"{"semantics":{"eventName":"Final"}"#));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `pkpass-core` internally.
//! - Libraries log through `tracing` and never install a subscriber.
//! - Output bytes are a function of the request alone: two writes of an
//!   unmodified request are byte-identical.

pub mod barcode;
pub mod bundle;
pub mod descriptor;
pub mod field;
pub mod localization;
pub mod nfc;
pub mod observer;
pub mod relevance;
pub mod request;
pub mod semantics;
pub mod serialize;
pub mod validation;
pub mod writer;

pub use barcode::{Barcode, BarcodeFormat};
pub use bundle::PassBundle;
pub use descriptor::{DescriptorError, DescriptorFormat, PassDescriptor};
pub use field::{Field, FieldSection, FieldSet, FieldValue};
pub use localization::LocalizationTable;
pub use nfc::Nfc;
pub use observer::{NoopObserver, Section, TracingObserver, WriteObserver};
pub use relevance::{RelevantBeacon, RelevantDate, RelevantLocation};
pub use request::PassRequest;
pub use semantics::{SemanticTag, SemanticTags, TagEncoder, TagValue};
pub use writer::JsonWriter;
