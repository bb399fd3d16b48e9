//! # pkpass-core: Foundational Types for Pass Documents
//!
//! Leaf crate of the pkpass workspace. Defines the primitives every other
//! crate builds on: the error hierarchy, offset-preserving date-times, color
//! normalization, and the compile-time wire-string tables for styles,
//! transit types, style schemes, and image roles.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit wire tables.** Every enum that reaches the output maps to
//!    its string through an exhaustive `match`. Adding a variant forces the
//!    table to be updated.
//!
//! 2. **Offsets are data.** `PassDate` keeps the caller's UTC offset and
//!    renders it verbatim.
//!
//! 3. **One error type.** `PassError` carries every failure kind, so callers
//!    handle a single enum regardless of which stage failed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pkpass-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod color;
pub mod error;
pub mod image;
pub mod style;
pub mod temporal;

pub use color::normalize_color;
pub use error::PassError;
pub use image::{PassImage, PASS_IMAGE_COUNT};
pub use style::{PassStyle, PreferredStyleScheme, TransitType};
pub use temporal::PassDate;
