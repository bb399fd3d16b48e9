//! # Wire Table Consistency Tests
//!
//! Every enum that reaches the output has a hand-written string table. These
//! tests check each table against its inverse and against the serde names,
//! so a descriptor file and a rendered document always agree.

use std::collections::HashSet;

use pkpass_core::{PassImage, PassStyle, PreferredStyleScheme, TransitType, PASS_IMAGE_COUNT};

#[test]
fn image_filenames_are_unique_and_invert() {
    let mut seen = HashSet::new();
    for role in PassImage::all() {
        let name = role.filename();
        assert!(seen.insert(name), "duplicate filename {name}");
        assert_eq!(PassImage::from_filename(name).unwrap(), *role);
    }
    assert_eq!(seen.len(), PASS_IMAGE_COUNT);
}

#[test]
fn every_image_family_has_three_scales() {
    for base in ["icon", "logo", "background", "strip", "thumbnail", "footer", "artwork", "venueMap"] {
        for suffix in ["", "@2x", "@3x"] {
            let name = format!("{base}{suffix}.png");
            assert!(PassImage::from_filename(&name).is_ok(), "missing {name}");
        }
    }
}

#[test]
fn style_wrapper_keys_match_serde_names() {
    for style in PassStyle::all() {
        let serde_name = serde_json::to_value(style).unwrap();
        assert_eq!(serde_name, style.wrapper_key());
    }
}

#[test]
fn transit_and_scheme_strings_match_serde_names() {
    for transit in TransitType::all() {
        assert_eq!(serde_json::to_value(transit).unwrap(), transit.as_str());
    }
    for scheme in PreferredStyleScheme::all() {
        assert_eq!(serde_json::to_value(scheme).unwrap(), scheme.as_str());
    }
}

#[test]
fn only_boarding_passes_are_transit() {
    let transit: Vec<_> = PassStyle::all().iter().filter(|s| s.is_transit()).collect();
    assert_eq!(transit, [&PassStyle::BoardingPass]);
}
