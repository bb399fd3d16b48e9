//! # Pass Request
//!
//! The root aggregate describing one pass. Scalar attributes are plain
//! public fields. Collections that carry invariants, or that the
//! orchestrator walks in order, are private and populated only through the
//! mutators below, so every check runs at the call that would break it.
//!
//! ## Invariants
//!
//! - A field key is unique across all five field sections
//!   ([`PassRequest::add_field`]).
//! - A relevancy interval spans at most 24 hours
//!   ([`PassRequest::add_relevant_date`]).
//!
//! A rejected mutation leaves the request unchanged.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use pkpass_core::{PassDate, PassError, PassImage, PassStyle, PreferredStyleScheme, TransitType};

use crate::barcode::Barcode;
use crate::field::{Field, FieldSection, FieldSet};
use crate::localization::LocalizationTable;
use crate::nfc::Nfc;
use crate::relevance::{RelevantBeacon, RelevantDate, RelevantLocation};
use crate::semantics::{SemanticTag, SemanticTags};

/// `formatVersion` written into every document.
pub const FORMAT_VERSION: u64 = 1;

/// Everything needed to produce one `pass.json`.
#[derive(Debug, Clone, Default)]
pub struct PassRequest {
    // Identity and organization.
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub description: String,
    pub organization_name: String,
    pub team_identifier: String,

    // Companion app and sharing.
    pub sharing_prohibited: bool,
    pub auxiliary_store_identifiers: i64,
    pub associated_store_identifiers: Vec<u64>,
    pub app_launch_url: String,

    // Poster event ticket extras.
    pub suppress_header_darkening: bool,
    pub use_automatic_colors: bool,
    pub footer_background_color: String,
    pub sell_url: String,
    pub transfer_url: String,
    pub bag_policy_url: String,
    pub order_food_url: String,
    pub merchandise_url: String,
    pub transit_information_url: String,
    pub parking_information_url: String,
    pub directions_information_url: String,
    pub accessibility_url: String,
    pub purchase_parking_url: String,
    pub add_on_url: String,
    pub contact_venue_email: String,
    pub contact_venue_website: String,
    pub contact_venue_phone_number: String,

    /// Legacy single relevant instant, written as top-level `relevantDate`.
    pub relevant_date: Option<PassDate>,
    /// Meters. Written as a decimal string.
    pub max_distance: Option<u32>,

    // Appearance.
    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
    pub label_color: Option<String>,
    pub logo_text: String,
    pub suppress_strip_shine: Option<bool>,
    pub grouping_identifier: Option<String>,

    // Expiration.
    pub expiration_date: Option<PassDate>,
    pub voided: Option<bool>,

    pub style: PassStyle,
    /// Only written when `style` is [`PassStyle::BoardingPass`].
    pub transit_type: TransitType,

    /// Legacy singular barcode. Independent of [`PassRequest::barcodes`].
    pub barcode: Option<Barcode>,
    pub nfc: Option<Nfc>,

    // Web service. The URL is dropped when the token is empty.
    pub authentication_token: String,
    pub web_service_url: String,

    fields: FieldSet,
    barcodes: Vec<Barcode>,
    relevant_dates: Vec<RelevantDate>,
    locations: Vec<RelevantLocation>,
    beacons: Vec<RelevantBeacon>,
    semantic_tags: SemanticTags,
    preferred_style_schemes: Vec<PreferredStyleScheme>,
    user_info: Map<String, Value>,
    localizations: LocalizationTable,
    images: BTreeMap<PassImage, Vec<u8>>,
}

impl PassRequest {
    /// An empty request with the given style.
    pub fn new(style: PassStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    // ── Fields ──────────────────────────────────────────────────────

    /// Append a field to a section.
    ///
    /// # Errors
    ///
    /// Returns `PassError::DuplicateKey` if the key is already used in any
    /// section.
    pub fn add_field(&mut self, section: FieldSection, field: Field) -> Result<(), PassError> {
        self.fields.insert(section, field)
    }

    pub fn add_header_field(&mut self, field: Field) -> Result<(), PassError> {
        self.add_field(FieldSection::Header, field)
    }

    pub fn add_primary_field(&mut self, field: Field) -> Result<(), PassError> {
        self.add_field(FieldSection::Primary, field)
    }

    pub fn add_secondary_field(&mut self, field: Field) -> Result<(), PassError> {
        self.add_field(FieldSection::Secondary, field)
    }

    pub fn add_auxiliary_field(&mut self, field: Field) -> Result<(), PassError> {
        self.add_field(FieldSection::Auxiliary, field)
    }

    pub fn add_back_field(&mut self, field: Field) -> Result<(), PassError> {
        self.add_field(FieldSection::Back, field)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    // ── Relevance ───────────────────────────────────────────────────

    /// Append an entry to `relevantDates`.
    ///
    /// # Errors
    ///
    /// Returns `PassError::IntervalTooLong` if the entry spans more than
    /// 24 hours.
    pub fn add_relevant_date(&mut self, date: RelevantDate) -> Result<(), PassError> {
        date.validate()?;
        self.relevant_dates.push(date);
        Ok(())
    }

    /// Append a single relevant instant.
    pub fn add_relevant_instant(&mut self, at: PassDate) {
        self.relevant_dates.push(RelevantDate::at(at));
    }

    /// Append a relevancy interval.
    ///
    /// # Errors
    ///
    /// Returns `PassError::IntervalTooLong` if `end - start` exceeds 24
    /// hours.
    pub fn add_relevant_interval(&mut self, start: PassDate, end: PassDate) -> Result<(), PassError> {
        self.add_relevant_date(RelevantDate::interval(start, end)?)
    }

    pub fn relevant_dates(&self) -> &[RelevantDate] {
        &self.relevant_dates
    }

    pub fn add_location(&mut self, location: RelevantLocation) {
        self.locations.push(location);
    }

    pub fn locations(&self) -> &[RelevantLocation] {
        &self.locations
    }

    pub fn add_beacon(&mut self, beacon: RelevantBeacon) {
        self.beacons.push(beacon);
    }

    pub fn beacons(&self) -> &[RelevantBeacon] {
        &self.beacons
    }

    // ── Barcodes ────────────────────────────────────────────────────

    pub fn add_barcode(&mut self, barcode: Barcode) {
        self.barcodes.push(barcode);
    }

    pub fn barcodes(&self) -> &[Barcode] {
        &self.barcodes
    }

    // ── Semantics and style ─────────────────────────────────────────

    /// Append a semantic tag. Tags sharing a wire key are all kept.
    pub fn add_semantic_tag(&mut self, tag: SemanticTag) {
        self.semantic_tags.add(tag);
    }

    pub fn semantic_tags(&self) -> &SemanticTags {
        &self.semantic_tags
    }

    pub fn add_preferred_style_scheme(&mut self, scheme: PreferredStyleScheme) {
        self.preferred_style_schemes.push(scheme);
    }

    pub fn preferred_style_schemes(&self) -> &[PreferredStyleScheme] {
        &self.preferred_style_schemes
    }

    // ── Pass-through data ───────────────────────────────────────────

    /// Set a `userInfo` entry. Values are written verbatim, in insertion
    /// order; re-setting a key keeps its first position.
    pub fn add_user_info(&mut self, key: impl Into<String>, value: Value) {
        self.user_info.insert(key.into(), value);
    }

    pub fn user_info(&self) -> &Map<String, Value> {
        &self.user_info
    }

    pub fn add_localization(&mut self, language: &str, key: &str, value: impl Into<String>) {
        self.localizations.add(language, key, value);
    }

    pub fn localizations(&self) -> &LocalizationTable {
        &self.localizations
    }

    /// Attach image bytes for a role, replacing any previous bytes.
    pub fn add_image(&mut self, role: PassImage, bytes: Vec<u8>) {
        self.images.insert(role, bytes);
    }

    pub fn images(&self) -> &BTreeMap<PassImage, Vec<u8>> {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_request_is_empty() {
        let request = PassRequest::new(PassStyle::EventTicket);
        assert_eq!(request.style, PassStyle::EventTicket);
        assert!(request.fields().is_empty());
        assert!(request.semantic_tags().is_empty());
        assert!(request.relevant_dates().is_empty());
        assert!(request.user_info().is_empty());
        assert!(request.images().is_empty());
    }

    #[test]
    fn duplicate_field_keys_rejected_across_sections() {
        let mut request = PassRequest::default();
        request.add_header_field(Field::new("gate", "Gate", "A1")).unwrap();
        let err = request
            .add_back_field(Field::new("gate", "Gate", "B2"))
            .unwrap_err();
        assert!(matches!(err, PassError::DuplicateKey { ref key } if key == "gate"));
        assert_eq!(request.fields().len(), 1);
        assert_eq!(
            request.fields().get("gate").map(|(s, _)| s),
            Some(FieldSection::Header)
        );
    }

    #[test]
    fn over_long_interval_leaves_request_unchanged() {
        let mut request = PassRequest::default();
        let start = PassDate::parse("2025-10-31T00:00:00Z").unwrap();
        let end = start.checked_add(Duration::hours(25)).unwrap();
        assert!(request.add_relevant_interval(start, end).is_err());
        assert!(request
            .add_relevant_date(RelevantDate::interval_unchecked(start, end))
            .is_err());
        assert!(request.relevant_dates().is_empty());

        request.add_relevant_instant(start);
        assert_eq!(request.relevant_dates().len(), 1);
    }

    #[test]
    fn images_replace_per_role() {
        let mut request = PassRequest::default();
        request.add_image(PassImage::Icon, vec![1]);
        request.add_image(PassImage::Icon, vec![2]);
        assert_eq!(request.images().get(&PassImage::Icon), Some(&vec![2]));
    }
}
