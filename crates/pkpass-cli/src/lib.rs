//! # pkpass-cli: Pass Descriptor Command-Line Interface
//!
//! Turns YAML or JSON pass descriptors into `pass.json` documents.
//!
//! ## Subcommands
//!
//! - `render`: Build a descriptor and write its `pass.json`
//! - `validate`: Build a descriptor and dry-run the write
//! - `images`: Print the image role table
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in one module per
//!   subcommand and return an exit code.
//! - Pass semantics belong to `pkpass-document`. Handlers only load files,
//!   call into the library, and print.

use std::path::Path;

use anyhow::{Context, Result};

use pkpass_document::{DescriptorFormat, PassDescriptor};

pub mod images;
pub mod render;
pub mod validate;

/// Read and decode a descriptor file. The format follows the extension.
pub fn load_descriptor(path: &Path) -> Result<PassDescriptor> {
    let format = DescriptorFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read descriptor: {}", path.display()))?;
    let descriptor = PassDescriptor::parse(&text, format)
        .with_context(|| format!("failed to decode descriptor: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, "loaded descriptor");
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("pass.yaml");
        std::fs::write(&yaml, "serialNumber: \"7\"\n").unwrap();
        assert_eq!(load_descriptor(&yaml).unwrap().serial_number, "7");

        let json = dir.path().join("pass.json");
        std::fs::write(&json, r#"{"serialNumber":"8"}"#).unwrap();
        assert_eq!(load_descriptor(&json).unwrap().serial_number, "8");
    }

    #[test]
    fn missing_file_and_bad_extension_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_descriptor(&dir.path().join("absent.yaml")).is_err());
        let txt = dir.path().join("pass.txt");
        std::fs::write(&txt, "serialNumber: x\n").unwrap();
        assert!(load_descriptor(&txt).is_err());
    }
}
