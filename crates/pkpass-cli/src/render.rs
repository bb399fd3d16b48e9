//! # Render Subcommand
//!
//! Builds a pass descriptor into a `pass.json` document.
//!
//! ```bash
//! pkpass render ticket.yaml --output pass.json
//! pkpass render ticket.json --pretty
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::load_descriptor;

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Descriptor file (.yaml, .yml, or .json).
    pub descriptor: PathBuf,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the output.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs) -> Result<u8> {
    let bytes = render_descriptor(&args.descriptor, args.pretty)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote pass document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(0)
}

/// Build the descriptor at `path` and serialize it into memory, so a
/// failed write never leaves a truncated file behind.
pub fn render_descriptor(path: &Path, pretty: bool) -> Result<Vec<u8>> {
    let request = load_descriptor(path)?
        .into_request()
        .with_context(|| format!("invalid pass descriptor: {}", path.display()))?;
    let mut buf = Vec::new();
    if pretty {
        request.write_pretty(&mut buf)?;
    } else {
        request.write(&mut buf)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = "\
style: coupon
serialNumber: \"42\"
primaryFields:
  - key: offer
    label: Offer
    value: 20% off
";

    #[test]
    fn renders_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coupon.yaml");
        let output = dir.path().join("pass.json");
        std::fs::write(&input, DESCRIPTOR).unwrap();

        let args = RenderArgs {
            descriptor: input,
            output: Some(output.clone()),
            pretty: false,
        };
        assert_eq!(run_render(&args).unwrap(), 0);

        let v: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(v["serialNumber"], "42");
        assert_eq!(v["coupon"]["primaryFields"][0]["value"], "20% off");
    }

    #[test]
    fn pretty_rendering_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("coupon.yaml");
        std::fs::write(&input, DESCRIPTOR).unwrap();
        let bytes = render_descriptor(&input, true).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("\n  \"serialNumber\": \"42\""));
    }

    #[test]
    fn invalid_descriptor_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.yaml");
        let output = dir.path().join("pass.json");
        std::fs::write(&input, "foregroundColor: \"#12\"\n").unwrap();

        let args = RenderArgs {
            descriptor: input,
            output: Some(output.clone()),
            pretty: false,
        };
        assert!(run_render(&args).is_err());
        assert!(!output.exists());
    }
}
