//! # Validate Subcommand
//!
//! Builds a descriptor and runs a full write into a discarding sink, so
//! every check that `render` would hit is applied without producing output.
//! Image paths are resolved relative to the descriptor's directory and must
//! exist.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use pkpass_document::NoopObserver;

use crate::load_descriptor;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Descriptor file (.yaml, .yml, or .json).
    pub descriptor: PathBuf,
}

/// Execute the validate subcommand. Prints `OK` and returns 0, or prints
/// the failure and returns 1.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    match check_descriptor(&args.descriptor) {
        Ok(()) => {
            println!("OK");
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e:#}");
            Ok(1)
        }
    }
}

/// Run every check on the descriptor at `path`.
pub fn check_descriptor(path: &Path) -> Result<()> {
    let descriptor = load_descriptor(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for (role, image) in descriptor.image_roles()? {
        let resolved = base.join(image);
        if !resolved.is_file() {
            bail!("image {} not found at {}", role.filename(), resolved.display());
        }
    }

    let request = descriptor
        .into_request()
        .with_context(|| format!("invalid pass descriptor: {}", path.display()))?;
    request
        .write_with_observer(std::io::sink(), &mut NoopObserver)
        .context("pass document failed to serialize")?;
    tracing::info!(path = %path.display(), "descriptor is valid");
    Ok(())
}
