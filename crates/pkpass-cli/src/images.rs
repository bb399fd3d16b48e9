//! # Images Subcommand
//!
//! Prints the image role to archive filename table.

use anyhow::Result;
use clap::Args;

use pkpass_core::PassImage;

/// Arguments for the images subcommand.
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Print a JSON object instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the images subcommand.
pub fn run_images(args: &ImagesArgs) -> Result<u8> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&image_table())?);
    } else {
        for role in PassImage::all() {
            println!("  {:<16} {}", format!("{role:?}"), role.filename());
        }
    }
    Ok(0)
}

/// Role name to filename, in declaration order.
pub fn image_table() -> serde_json::Map<String, serde_json::Value> {
    PassImage::all()
        .iter()
        .map(|role| (format!("{role:?}"), role.filename().into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkpass_core::PASS_IMAGE_COUNT;

    #[test]
    fn table_covers_every_role() {
        let table = image_table();
        assert_eq!(table.len(), PASS_IMAGE_COUNT);
        assert_eq!(table["VenueMap3x"], "venueMap@3x.png");
        assert_eq!(table["Icon2x"], "icon@2x.png");
    }

    #[test]
    fn table_follows_declaration_order() {
        let table = image_table();
        let names: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(names[..3], ["Icon", "Icon2x", "Icon3x"]);
        assert_eq!(names.last(), Some(&"VenueMap3x"));
    }
}
