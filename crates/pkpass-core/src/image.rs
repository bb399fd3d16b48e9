//! # Image Roles
//!
//! The fixed set of image slots a pass package can carry, and the filename
//! each slot is stored under. Image bytes are never decoded here; the table
//! only tells the packaging stage where each asset goes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PassError;

/// Number of image roles.
pub const PASS_IMAGE_COUNT: usize = 24;

/// An image slot, with its 1x/2x/3x resolution variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassImage {
    /// Icon shown in notifications and on the lock screen.
    Icon,
    /// Icon, 2x.
    Icon2x,
    /// Icon, 3x.
    Icon3x,
    /// Logo, 160x50 points.
    Logo,
    /// Logo, 2x.
    Logo2x,
    /// Logo, 3x.
    Logo3x,
    /// Background, 180x220 points.
    Background,
    /// Background, 2x.
    Background2x,
    /// Background, 3x.
    Background3x,
    /// Strip image behind the primary fields.
    Strip,
    /// Strip, 2x.
    Strip2x,
    /// Strip, 3x.
    Strip3x,
    /// Thumbnail, 90x90 points.
    Thumbnail,
    /// Thumbnail, 2x.
    Thumbnail2x,
    /// Thumbnail, 3x.
    Thumbnail3x,
    /// Footer, 286x15 points.
    Footer,
    /// Footer, 2x.
    Footer2x,
    /// Footer, 3x.
    Footer3x,
    /// Poster artwork, 358x448 points.
    Artwork,
    /// Artwork, 2x.
    Artwork2x,
    /// Artwork, 3x.
    Artwork3x,
    /// Static venue map shown in the event guide.
    VenueMap,
    /// Venue map, 2x.
    VenueMap2x,
    /// Venue map, 3x.
    VenueMap3x,
}

impl PassImage {
    /// All roles in declaration order.
    pub fn all() -> &'static [PassImage] {
        &[
            Self::Icon,
            Self::Icon2x,
            Self::Icon3x,
            Self::Logo,
            Self::Logo2x,
            Self::Logo3x,
            Self::Background,
            Self::Background2x,
            Self::Background3x,
            Self::Strip,
            Self::Strip2x,
            Self::Strip3x,
            Self::Thumbnail,
            Self::Thumbnail2x,
            Self::Thumbnail3x,
            Self::Footer,
            Self::Footer2x,
            Self::Footer3x,
            Self::Artwork,
            Self::Artwork2x,
            Self::Artwork3x,
            Self::VenueMap,
            Self::VenueMap2x,
            Self::VenueMap3x,
        ]
    }

    /// Filename inside the pass package.
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Icon => "icon.png",
            Self::Icon2x => "icon@2x.png",
            Self::Icon3x => "icon@3x.png",
            Self::Logo => "logo.png",
            Self::Logo2x => "logo@2x.png",
            Self::Logo3x => "logo@3x.png",
            Self::Background => "background.png",
            Self::Background2x => "background@2x.png",
            Self::Background3x => "background@3x.png",
            Self::Strip => "strip.png",
            Self::Strip2x => "strip@2x.png",
            Self::Strip3x => "strip@3x.png",
            Self::Thumbnail => "thumbnail.png",
            Self::Thumbnail2x => "thumbnail@2x.png",
            Self::Thumbnail3x => "thumbnail@3x.png",
            Self::Footer => "footer.png",
            Self::Footer2x => "footer@2x.png",
            Self::Footer3x => "footer@3x.png",
            Self::Artwork => "artwork.png",
            Self::Artwork2x => "artwork@2x.png",
            Self::Artwork3x => "artwork@3x.png",
            Self::VenueMap => "venueMap.png",
            Self::VenueMap2x => "venueMap@2x.png",
            Self::VenueMap3x => "venueMap@3x.png",
        }
    }

    /// Inverse of [`PassImage::filename`].
    ///
    /// # Errors
    ///
    /// Returns `PassError::UnmappedImageRole` if no role uses `name`.
    pub fn from_filename(name: &str) -> Result<Self, PassError> {
        Self::all()
            .iter()
            .copied()
            .find(|image| image.filename() == name)
            .ok_or_else(|| PassError::UnmappedImageRole(name.to_string()))
    }
}

impl fmt::Display for PassImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

impl FromStr for PassImage {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_filename(s)
    }
}
