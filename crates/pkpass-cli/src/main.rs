//! # pkpass CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pkpass_cli::images::{run_images, ImagesArgs};
use pkpass_cli::render::{run_render, RenderArgs};
use pkpass_cli::validate::{run_validate, ValidateArgs};

/// Build wallet pass documents from YAML or JSON descriptors.
#[derive(Parser, Debug)]
#[command(name = "pkpass", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a descriptor and write its pass.json.
    Render(RenderArgs),

    /// Check a descriptor without writing output.
    Validate(ValidateArgs),

    /// List image roles and their archive filenames.
    Images(ImagesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Render(args) => run_render(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Images(args) => run_images(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_render_defaults() {
        let cli = Cli::try_parse_from(["pkpass", "render", "ticket.yaml"]).unwrap();
        if let Commands::Render(args) = cli.command {
            assert_eq!(args.descriptor, PathBuf::from("ticket.yaml"));
            assert!(args.output.is_none());
            assert!(!args.pretty);
        } else {
            panic!("expected render");
        }
    }

    #[test]
    fn cli_parse_render_with_output_and_pretty() {
        let cli = Cli::try_parse_from([
            "pkpass", "render", "ticket.json", "-o", "pass.json", "--pretty",
        ])
        .unwrap();
        if let Commands::Render(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("pass.json")));
            assert!(args.pretty);
        } else {
            panic!("expected render");
        }
    }

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["pkpass", "validate", "pass.yml"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn cli_parse_images_json() {
        let cli = Cli::try_parse_from(["pkpass", "images", "--json"]).unwrap();
        if let Commands::Images(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("expected images");
        }
    }

    #[test]
    fn cli_verbosity_counts() {
        let cli = Cli::try_parse_from(["pkpass", "-vv", "images"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_render_requires_descriptor() {
        assert!(Cli::try_parse_from(["pkpass", "render"]).is_err());
    }
}
