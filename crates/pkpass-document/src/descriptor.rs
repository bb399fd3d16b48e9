//! # Pass Descriptors
//!
//! A declarative, file-based description of a pass in YAML or JSON. Keys
//! mirror the output format (camelCase), so an existing `pass.json` is
//! close to a valid descriptor.
//!
//! [`PassDescriptor::into_request`] builds a [`PassRequest`] through the
//! same validating mutators a programmatic caller uses. Duplicate field keys
//! and over-long relevancy intervals are rejected during conversion, not
//! deferred to the write.
//!
//! ```yaml
//! style: eventTicket
//! passTypeIdentifier: pass.com.example.ticket
//! serialNumber: "0001"
//! primaryFields:
//!   - key: event
//!     label: Event
//!     value: Final
//! semantics:
//!   - key: eventName
//!     value: Final
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use pkpass_core::{PassDate, PassError, PassImage, PassStyle, PreferredStyleScheme, TransitType};

use crate::barcode::Barcode;
use crate::field::{DataDetectorType, DateStyle, Field, FieldSection, FieldValue, NumberStyle, TextAlignment};
use crate::nfc::Nfc;
use crate::relevance::{RelevantBeacon, RelevantDate, RelevantLocation};
use crate::request::PassRequest;
use crate::semantics::SemanticTag;

/// Errors raised while loading or converting a descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The YAML text could not be decoded into a descriptor.
    #[error("invalid YAML descriptor: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON text could not be decoded into a descriptor.
    #[error("invalid JSON descriptor: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported descriptor format: {0:?} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat(String),

    /// The descriptor decoded but describes an invalid pass.
    #[error(transparent)]
    Pass(#[from] PassError),
}

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Yaml,
    Json,
}

impl DescriptorFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, DescriptorError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(DescriptorError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// A field value as written in a descriptor.
///
/// Untagged: `{date: …}` is a date, `{amount: …, currencyCode: …}` a
/// currency amount, a bare number a number, and anything else text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Date {
        date: PassDate,
    },
    Currency {
        amount: Number,
        #[serde(rename = "currencyCode")]
        currency_code: String,
    },
    Number(Number),
    Text(String),
}

impl From<ValueSpec> for FieldValue {
    fn from(spec: ValueSpec) -> Self {
        match spec {
            ValueSpec::Date { date } => Self::Date(date),
            ValueSpec::Currency {
                amount,
                currency_code,
            } => Self::Currency {
                amount,
                currency_code,
            },
            ValueSpec::Number(n) => Self::Number(n),
            ValueSpec::Text(s) => Self::Text(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub value: ValueSpec,
    #[serde(default)]
    pub change_message: Option<String>,
    #[serde(default)]
    pub attributed_value: Option<String>,
    #[serde(default)]
    pub text_alignment: Option<TextAlignment>,
    #[serde(default)]
    pub date_style: Option<DateStyle>,
    #[serde(default)]
    pub time_style: Option<DateStyle>,
    #[serde(default)]
    pub is_relative: Option<bool>,
    #[serde(default)]
    pub ignores_time_zone: Option<bool>,
    #[serde(default)]
    pub number_style: Option<NumberStyle>,
    #[serde(default)]
    pub data_detector_types: Vec<DataDetectorType>,
    #[serde(default)]
    pub row: Option<u8>,
}

impl TryFrom<FieldSpec> for Field {
    type Error = PassError;

    fn try_from(spec: FieldSpec) -> Result<Self, PassError> {
        let mut field = Field::unlabeled(spec.key, spec.value);
        field.label = spec.label;
        field.change_message = spec.change_message;
        field.attributed_value = spec.attributed_value;
        field.text_alignment = spec.text_alignment;
        field.date_style = spec.date_style;
        field.time_style = spec.time_style;
        field.is_relative = spec.is_relative;
        field.ignores_time_zone = spec.ignores_time_zone;
        field.number_style = spec.number_style;
        field.data_detector_types = spec.data_detector_types;
        match spec.row {
            Some(row) => field.with_row(row),
            None => Ok(field),
        }
    }
}

/// One `relevantDates` entry: an instant or an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelevantDateSpec {
    Interval {
        #[serde(rename = "startDate")]
        start_date: PassDate,
        #[serde(rename = "endDate")]
        end_date: PassDate,
    },
    Instant {
        #[serde(rename = "relevantDate")]
        relevant_date: PassDate,
    },
}

/// One semantic tag: a wire key and its JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSpec {
    pub key: String,
    pub value: Value,
}

/// A complete pass description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PassDescriptor {
    pub style: PassStyle,
    pub transit_type: TransitType,

    pub pass_type_identifier: String,
    pub serial_number: String,
    pub description: String,
    pub organization_name: String,
    pub team_identifier: String,

    pub sharing_prohibited: bool,
    pub auxiliary_store_identifiers: i64,
    pub associated_store_identifiers: Vec<u64>,
    #[serde(rename = "appLaunchURL")]
    pub app_launch_url: String,

    pub suppress_header_darkening: bool,
    pub use_automatic_colors: bool,
    pub footer_background_color: String,
    #[serde(rename = "sellURL")]
    pub sell_url: String,
    #[serde(rename = "transferURL")]
    pub transfer_url: String,
    #[serde(rename = "bagPolicyURL")]
    pub bag_policy_url: String,
    #[serde(rename = "orderFoodURL")]
    pub order_food_url: String,
    #[serde(rename = "merchandiseURL")]
    pub merchandise_url: String,
    #[serde(rename = "transitInformationURL")]
    pub transit_information_url: String,
    #[serde(rename = "parkingInformationURL")]
    pub parking_information_url: String,
    #[serde(rename = "directionsInformationURL")]
    pub directions_information_url: String,
    #[serde(rename = "accessibilityURL")]
    pub accessibility_url: String,
    #[serde(rename = "purchaseParkingURL")]
    pub purchase_parking_url: String,
    #[serde(rename = "addOnURL")]
    pub add_on_url: String,
    pub contact_venue_email: String,
    pub contact_venue_website: String,
    pub contact_venue_phone_number: String,

    pub header_fields: Vec<FieldSpec>,
    pub primary_fields: Vec<FieldSpec>,
    pub secondary_fields: Vec<FieldSpec>,
    pub auxiliary_fields: Vec<FieldSpec>,
    pub back_fields: Vec<FieldSpec>,

    pub relevant_date: Option<PassDate>,
    pub relevant_dates: Vec<RelevantDateSpec>,
    pub max_distance: Option<u32>,
    pub locations: Vec<RelevantLocation>,
    pub beacons: Vec<RelevantBeacon>,

    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
    pub label_color: Option<String>,
    pub logo_text: String,
    pub suppress_strip_shine: Option<bool>,
    pub grouping_identifier: Option<String>,

    pub expiration_date: Option<PassDate>,
    pub voided: Option<bool>,

    pub barcode: Option<Barcode>,
    pub barcodes: Vec<Barcode>,
    pub nfc: Option<Nfc>,

    pub semantics: Vec<TagSpec>,
    pub preferred_style_schemes: Vec<PreferredStyleScheme>,
    pub user_info: serde_json::Map<String, Value>,
    /// Language tag to key/value table.
    pub localizations: BTreeMap<String, BTreeMap<String, String>>,
    /// Image filename (e.g. `icon@2x.png`) to a path on disk.
    pub images: BTreeMap<String, PathBuf>,

    pub authentication_token: String,
    #[serde(rename = "webServiceURL")]
    pub web_service_url: String,
}

impl PassDescriptor {
    pub fn from_yaml_str(s: &str) -> Result<Self, DescriptorError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn parse(s: &str, format: DescriptorFormat) -> Result<Self, DescriptorError> {
        match format {
            DescriptorFormat::Yaml => Self::from_yaml_str(s),
            DescriptorFormat::Json => Self::from_json_str(s),
        }
    }

    /// Resolve image filenames to roles.
    ///
    /// # Errors
    ///
    /// Returns `PassError::UnmappedImageRole` for a filename outside the
    /// role table.
    pub fn image_roles(&self) -> Result<Vec<(PassImage, &Path)>, DescriptorError> {
        self.images
            .iter()
            .map(|(name, path)| Ok((PassImage::from_filename(name)?, path.as_path())))
            .collect()
    }

    /// Build a request through the validating mutators.
    ///
    /// Image paths are checked against the role table but not read; see
    /// [`PassDescriptor::image_roles`].
    ///
    /// # Errors
    ///
    /// Returns the first `PassError` raised by a mutator, wrapped in
    /// [`DescriptorError::Pass`].
    pub fn into_request(self) -> Result<PassRequest, DescriptorError> {
        self.image_roles()?;

        let mut request = PassRequest::new(self.style);
        request.transit_type = self.transit_type;
        request.pass_type_identifier = self.pass_type_identifier;
        request.serial_number = self.serial_number;
        request.description = self.description;
        request.organization_name = self.organization_name;
        request.team_identifier = self.team_identifier;
        request.sharing_prohibited = self.sharing_prohibited;
        request.auxiliary_store_identifiers = self.auxiliary_store_identifiers;
        request.associated_store_identifiers = self.associated_store_identifiers;
        request.app_launch_url = self.app_launch_url;
        request.suppress_header_darkening = self.suppress_header_darkening;
        request.use_automatic_colors = self.use_automatic_colors;
        request.footer_background_color = self.footer_background_color;
        request.sell_url = self.sell_url;
        request.transfer_url = self.transfer_url;
        request.bag_policy_url = self.bag_policy_url;
        request.order_food_url = self.order_food_url;
        request.merchandise_url = self.merchandise_url;
        request.transit_information_url = self.transit_information_url;
        request.parking_information_url = self.parking_information_url;
        request.directions_information_url = self.directions_information_url;
        request.accessibility_url = self.accessibility_url;
        request.purchase_parking_url = self.purchase_parking_url;
        request.add_on_url = self.add_on_url;
        request.contact_venue_email = self.contact_venue_email;
        request.contact_venue_website = self.contact_venue_website;
        request.contact_venue_phone_number = self.contact_venue_phone_number;
        request.relevant_date = self.relevant_date;
        request.max_distance = self.max_distance;
        request.foreground_color = self.foreground_color;
        request.background_color = self.background_color;
        request.label_color = self.label_color;
        request.logo_text = self.logo_text;
        request.suppress_strip_shine = self.suppress_strip_shine;
        request.grouping_identifier = self.grouping_identifier;
        request.expiration_date = self.expiration_date;
        request.voided = self.voided;
        request.barcode = self.barcode;
        request.nfc = self.nfc;
        request.authentication_token = self.authentication_token;
        request.web_service_url = self.web_service_url;

        let sections = [
            (FieldSection::Header, self.header_fields),
            (FieldSection::Primary, self.primary_fields),
            (FieldSection::Secondary, self.secondary_fields),
            (FieldSection::Auxiliary, self.auxiliary_fields),
            (FieldSection::Back, self.back_fields),
        ];
        for (section, specs) in sections {
            for spec in specs {
                request.add_field(section, Field::try_from(spec)?)?;
            }
        }

        for spec in self.relevant_dates {
            match spec {
                RelevantDateSpec::Instant { relevant_date } => {
                    request.add_relevant_instant(relevant_date)
                }
                RelevantDateSpec::Interval {
                    start_date,
                    end_date,
                } => request.add_relevant_date(RelevantDate::interval(start_date, end_date)?)?,
            }
        }
        for location in self.locations {
            request.add_location(location);
        }
        for beacon in self.beacons {
            request.add_beacon(beacon);
        }
        for barcode in self.barcodes {
            request.add_barcode(barcode);
        }
        for tag in self.semantics {
            request.add_semantic_tag(SemanticTag::raw(tag.key, tag.value));
        }
        for scheme in self.preferred_style_schemes {
            request.add_preferred_style_scheme(scheme);
        }
        for (key, value) in self.user_info {
            request.add_user_info(key, value);
        }
        for (language, entries) in &self.localizations {
            for (key, value) in entries {
                request.add_localization(language, key, value.as_str());
            }
        }

        tracing::debug!(
            serial_number = %request.serial_number,
            fields = request.fields().len(),
            "built pass request from descriptor"
        );
        Ok(request)
    }
}
