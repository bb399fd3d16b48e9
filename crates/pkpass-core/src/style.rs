//! # Pass Style Tables
//!
//! Wire strings for the style selector, the transit type, and preferred style
//! schemes. Each enum maps to its wire string through an explicit `match`
//! table fixed at compile time; nothing is derived from variant names at
//! runtime, so renaming a variant cannot change the output.
//!
//! The style wrapper key and style scheme strings follow the format's rule of
//! lowercasing only the first character of the type name (`BoardingPass` →
//! `boardingPass`). Transit types are written verbatim (`PKTransitTypeAir`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PassError;

/// The pass category. Selects the top-level key that wraps the five field
/// sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassStyle {
    /// Boarding pass. The only style that carries a `transitType`.
    BoardingPass,
    /// Coupon.
    Coupon,
    /// Event ticket.
    EventTicket,
    /// Generic pass.
    #[default]
    Generic,
    /// Store card.
    StoreCard,
}

impl PassStyle {
    /// All styles in declaration order.
    pub fn all() -> &'static [PassStyle] {
        &[
            Self::BoardingPass,
            Self::Coupon,
            Self::EventTicket,
            Self::Generic,
            Self::StoreCard,
        ]
    }

    /// The top-level key that wraps the field sections.
    pub fn wrapper_key(&self) -> &'static str {
        match self {
            Self::BoardingPass => "boardingPass",
            Self::Coupon => "coupon",
            Self::EventTicket => "eventTicket",
            Self::Generic => "generic",
            Self::StoreCard => "storeCard",
        }
    }

    /// Whether this style must carry a `transitType` key.
    pub fn is_transit(&self) -> bool {
        matches!(self, Self::BoardingPass)
    }
}

impl fmt::Display for PassStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wrapper_key())
    }
}

impl FromStr for PassStyle {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|style| style.wrapper_key() == s)
            .ok_or_else(|| PassError::UnknownVariant {
                kind: "pass style",
                value: s.to_string(),
            })
    }
}

/// Transit mode of a boarding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransitType {
    /// Air travel.
    #[serde(rename = "PKTransitTypeAir")]
    Air,
    /// Boat or ferry.
    #[serde(rename = "PKTransitTypeBoat")]
    Boat,
    /// Bus.
    #[serde(rename = "PKTransitTypeBus")]
    Bus,
    /// Any other mode.
    #[default]
    #[serde(rename = "PKTransitTypeGeneric")]
    Generic,
    /// Train.
    #[serde(rename = "PKTransitTypeTrain")]
    Train,
}

impl TransitType {
    /// All transit types in declaration order.
    pub fn all() -> &'static [TransitType] {
        &[Self::Air, Self::Boat, Self::Bus, Self::Generic, Self::Train]
    }

    /// Wire string, written without any case transformation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Air => "PKTransitTypeAir",
            Self::Boat => "PKTransitTypeBoat",
            Self::Bus => "PKTransitTypeBus",
            Self::Generic => "PKTransitTypeGeneric",
            Self::Train => "PKTransitTypeTrain",
        }
    }
}

impl fmt::Display for TransitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitType {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PassError::UnknownVariant {
                kind: "transit type",
                value: s.to_string(),
            })
    }
}

/// A style scheme the system resolves into a concrete style at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredStyleScheme {
    /// Classic event ticket layout.
    EventTicket,
    /// Poster-style event ticket layout.
    PosterEventTicket,
    /// Classic boarding pass layout.
    BoardingPass,
    /// Boarding pass layout driven by semantic tags.
    SemanticBoardingPass,
}

impl PreferredStyleScheme {
    /// All schemes in declaration order.
    pub fn all() -> &'static [PreferredStyleScheme] {
        &[
            Self::EventTicket,
            Self::PosterEventTicket,
            Self::BoardingPass,
            Self::SemanticBoardingPass,
        ]
    }

    /// Wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventTicket => "eventTicket",
            Self::PosterEventTicket => "posterEventTicket",
            Self::BoardingPass => "boardingPass",
            Self::SemanticBoardingPass => "semanticBoardingPass",
        }
    }
}

impl fmt::Display for PreferredStyleScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferredStyleScheme {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| PassError::UnknownVariant {
                kind: "preferred style scheme",
                value: s.to_string(),
            })
    }
}
