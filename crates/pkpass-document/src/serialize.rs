//! # Serialization Orchestrator
//!
//! Writes a [`PassRequest`] as one JSON object, in a fixed top-level order:
//!
//! | # | Keys | Written when |
//! |---|------|--------------|
//! | 1 | `semantics` | at least one tag |
//! | 2 | identity, organization, URL keys | always (`logoText`, `associatedStoreIdentifiers`, `appLaunchURL` only if non-empty) |
//! | 3 | `userInfo` | at least one entry |
//! | 4 | `relevantDate`, `relevantDates`, `maxDistance`, `locations`, `beacons` | each if set / non-empty |
//! | 5 | `foregroundColor`, `backgroundColor`, `labelColor`, `suppressStripShine`, `groupingIdentifier` | each if set |
//! | 6 | `expirationDate`, `voided` | each if set |
//! | 7 | `barcodes` | non-empty |
//! | 8 | `nfc` | message non-empty |
//! | 9 | style wrapper with the five field arrays (+ `transitType`) | always |
//! | 10 | `preferredStyleSchemes` | non-empty |
//! | 11 | `barcode` | set |
//! | 12 | `authenticationToken`, `webServiceURL` | token non-empty |
//!
//! Bytes reach the sink as they are produced. A failure part-way through
//! leaves a truncated document in the sink; callers must discard it.

use std::io;

use serde_json::ser::Formatter;

use pkpass_core::{normalize_color, PassError};

use crate::field::FieldSection;
use crate::observer::{Section, TracingObserver, WriteObserver};
use crate::request::{PassRequest, FORMAT_VERSION};
use crate::writer::JsonWriter;

impl PassRequest {
    /// Write compact JSON to `out`, reporting progress through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns the first validation or I/O failure. Earlier sections may
    /// already have been written to `out`.
    pub fn write<W: io::Write>(&self, out: W) -> Result<(), PassError> {
        self.write_with_observer(out, &mut TracingObserver)
    }

    /// Write indented JSON to `out`.
    pub fn write_pretty<W: io::Write>(&self, out: W) -> Result<(), PassError> {
        let mut w = JsonWriter::pretty(out);
        self.write_json(&mut w, &mut TracingObserver)?;
        w.finish().map(drop)
    }

    /// Write compact JSON to `out`, reporting progress to `observer`.
    pub fn write_with_observer<W: io::Write>(
        &self,
        out: W,
        observer: &mut dyn WriteObserver,
    ) -> Result<(), PassError> {
        let mut w = JsonWriter::new(out);
        self.write_json(&mut w, observer)?;
        w.finish().map(drop)
    }

    /// Serialize into a fresh buffer.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, PassError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Write the document as the next value of `w`.
    pub fn write_json<W: io::Write, F: Formatter>(
        &self,
        w: &mut JsonWriter<W, F>,
        observer: &mut dyn WriteObserver,
    ) -> Result<(), PassError> {
        w.start_object()?;

        observer.section(Section::Semantics);
        self.semantic_tags().write(w)?;

        observer.section(Section::StandardKeys);
        self.write_standard_keys(w)?;

        observer.section(Section::UserInfo);
        if !self.user_info().is_empty() {
            w.property_name("userInfo")?;
            w.start_object()?;
            for (key, value) in self.user_info() {
                w.property_name(key)?;
                w.value(value)?;
            }
            w.end_object()?;
        }

        observer.section(Section::Relevance);
        self.write_relevance_keys(w)?;

        observer.section(Section::Appearance);
        self.write_appearance_keys(w)?;

        observer.section(Section::Expiration);
        if let Some(date) = &self.expiration_date {
            w.date_property("expirationDate", date)?;
        }
        if let Some(voided) = self.voided {
            w.bool_property("voided", voided)?;
        }

        observer.section(Section::Barcodes);
        if !self.barcodes().is_empty() {
            w.property_name("barcodes")?;
            w.start_array()?;
            for barcode in self.barcodes() {
                barcode.write(w)?;
            }
            w.end_array()?;
        }

        observer.section(Section::Nfc);
        if let Some(nfc) = self.nfc.as_ref().filter(|n| n.is_emittable()) {
            w.property_name("nfc")?;
            nfc.write(w)?;
        }

        observer.section(Section::StyleFields);
        self.write_style_fields(w)?;

        observer.section(Section::PreferredStyleSchemes);
        if !self.preferred_style_schemes().is_empty() {
            w.property_name("preferredStyleSchemes")?;
            w.start_array()?;
            for scheme in self.preferred_style_schemes() {
                w.string(scheme.as_str())?;
            }
            w.end_array()?;
        }

        observer.section(Section::LegacyBarcode);
        if let Some(barcode) = &self.barcode {
            w.property_name("barcode")?;
            barcode.write(w)?;
        }

        observer.section(Section::WebService);
        if !self.authentication_token.is_empty() {
            w.string_property("authenticationToken", &self.authentication_token)?;
            w.string_property("webServiceURL", &self.web_service_url)?;
        }

        w.end_object()?;
        observer.finished();
        Ok(())
    }

    fn write_standard_keys<W: io::Write, F: Formatter>(
        &self,
        w: &mut JsonWriter<W, F>,
    ) -> Result<(), PassError> {
        w.string_property("passTypeIdentifier", &self.pass_type_identifier)?;
        w.property_name("formatVersion")?;
        w.u64(FORMAT_VERSION)?;
        w.string_property("serialNumber", &self.serial_number)?;
        w.string_property("description", &self.description)?;
        w.string_property("organizationName", &self.organization_name)?;
        w.string_property("teamIdentifier", &self.team_identifier)?;
        w.bool_property("sharingProhibited", self.sharing_prohibited)?;
        w.property_name("auxiliaryStoreIdentifiers")?;
        w.i64(self.auxiliary_store_identifiers)?;
        w.bool_property("suppressHeaderDarkening", self.suppress_header_darkening)?;
        w.bool_property("useAutomaticColors", self.use_automatic_colors)?;
        w.string_property("footerBackgroundColor", &self.footer_background_color)?;

        let urls = [
            ("sellURL", &self.sell_url),
            ("transferURL", &self.transfer_url),
            ("bagPolicyURL", &self.bag_policy_url),
            ("orderFoodURL", &self.order_food_url),
            ("merchandiseURL", &self.merchandise_url),
            ("transitInformationURL", &self.transit_information_url),
            ("parkingInformationURL", &self.parking_information_url),
            ("directionsInformationURL", &self.directions_information_url),
            ("accessibilityURL", &self.accessibility_url),
            ("purchaseParkingURL", &self.purchase_parking_url),
            ("addOnURL", &self.add_on_url),
            ("contactVenueEmail", &self.contact_venue_email),
            ("contactVenueWebsite", &self.contact_venue_website),
            ("contactVenuePhoneNumber", &self.contact_venue_phone_number),
        ];
        for (name, value) in urls {
            w.string_property(name, value)?;
        }

        w.optional_string_property("logoText", Some(self.logo_text.as_str()))?;
        if !self.associated_store_identifiers.is_empty() {
            w.property_name("associatedStoreIdentifiers")?;
            w.start_array()?;
            for id in &self.associated_store_identifiers {
                w.u64(*id)?;
            }
            w.end_array()?;
        }
        w.optional_string_property("appLaunchURL", Some(self.app_launch_url.as_str()))
    }

    fn write_relevance_keys<W: io::Write, F: Formatter>(
        &self,
        w: &mut JsonWriter<W, F>,
    ) -> Result<(), PassError> {
        if let Some(date) = &self.relevant_date {
            w.date_property("relevantDate", date)?;
        }
        if !self.relevant_dates().is_empty() {
            w.property_name("relevantDates")?;
            w.start_array()?;
            for date in self.relevant_dates() {
                date.write(w)?;
            }
            w.end_array()?;
        }
        if let Some(distance) = self.max_distance {
            w.string_property("maxDistance", &distance.to_string())?;
        }
        if !self.locations().is_empty() {
            w.property_name("locations")?;
            w.start_array()?;
            for location in self.locations() {
                location.write(w)?;
            }
            w.end_array()?;
        }
        if !self.beacons().is_empty() {
            w.property_name("beacons")?;
            w.start_array()?;
            for beacon in self.beacons() {
                beacon.write(w)?;
            }
            w.end_array()?;
        }
        Ok(())
    }

    fn write_appearance_keys<W: io::Write, F: Formatter>(
        &self,
        w: &mut JsonWriter<W, F>,
    ) -> Result<(), PassError> {
        let colors = [
            ("foregroundColor", &self.foreground_color),
            ("backgroundColor", &self.background_color),
            ("labelColor", &self.label_color),
        ];
        for (name, color) in colors {
            if let Some(color) = color.as_deref().filter(|c| !c.is_empty()) {
                w.string_property(name, &normalize_color(color)?)?;
            }
        }
        if let Some(suppress) = self.suppress_strip_shine {
            w.bool_property("suppressStripShine", suppress)?;
        }
        w.optional_string_property("groupingIdentifier", self.grouping_identifier.as_deref())
    }

    fn write_style_fields<W: io::Write, F: Formatter>(
        &self,
        w: &mut JsonWriter<W, F>,
    ) -> Result<(), PassError> {
        w.property_name(self.style.wrapper_key())?;
        w.start_object()?;
        for section in FieldSection::all() {
            w.property_name(section.wire_key())?;
            w.start_array()?;
            for field in self.fields().section(*section) {
                field.write(w)?;
            }
            w.end_array()?;
        }
        if self.style.is_transit() {
            w.string_property("transitType", self.transit_type.as_str())?;
        }
        w.end_object()
    }
}
