//! # Fields and Field Sections
//!
//! A field is a labeled value shown in one of the five placement sections
//! of the pass face. Field keys are unique across all five sections; the
//! [`FieldSet`] enforces that on every insertion through a single key index,
//! so the check does not scan the sections.

use std::collections::HashMap;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Number;

use pkpass_core::{PassDate, PassError};

use crate::validation::ensure_unique_key;
use crate::writer::JsonWriter;

/// The five placement sections, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldSection {
    /// Fields at the top of the pass, visible when stacked.
    Header,
    /// The most prominent fields.
    Primary,
    /// Fields below the primary fields.
    Secondary,
    /// Additional front-of-pass fields.
    Auxiliary,
    /// Fields on the back of the pass.
    Back,
}

impl FieldSection {
    /// All sections in emission order.
    pub fn all() -> &'static [FieldSection; 5] {
        &[
            Self::Header,
            Self::Primary,
            Self::Secondary,
            Self::Auxiliary,
            Self::Back,
        ]
    }

    /// Key of the section's array inside the style wrapper.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Header => "headerFields",
            Self::Primary => "primaryFields",
            Self::Secondary => "secondaryFields",
            Self::Auxiliary => "auxiliaryFields",
            Self::Back => "backFields",
        }
    }

    fn ordinal(&self) -> usize {
        match self {
            Self::Header => 0,
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Auxiliary => 3,
            Self::Back => 4,
        }
    }
}

impl fmt::Display for FieldSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// Horizontal alignment of a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlignment {
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
    #[serde(rename = "PKTextAlignmentNatural")]
    Natural,
}

impl TextAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "PKTextAlignmentLeft",
            Self::Center => "PKTextAlignmentCenter",
            Self::Right => "PKTextAlignmentRight",
            Self::Natural => "PKTextAlignmentNatural",
        }
    }
}

/// Display style for the date or time part of a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateStyle {
    #[serde(rename = "PKDateStyleNone")]
    None,
    #[serde(rename = "PKDateStyleShort")]
    Short,
    #[serde(rename = "PKDateStyleMedium")]
    Medium,
    #[serde(rename = "PKDateStyleLong")]
    Long,
    #[serde(rename = "PKDateStyleFull")]
    Full,
}

impl DateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "PKDateStyleNone",
            Self::Short => "PKDateStyleShort",
            Self::Medium => "PKDateStyleMedium",
            Self::Long => "PKDateStyleLong",
            Self::Full => "PKDateStyleFull",
        }
    }
}

/// Display style for number fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberStyle {
    #[serde(rename = "PKNumberStyleDecimal")]
    Decimal,
    #[serde(rename = "PKNumberStylePercent")]
    Percent,
    #[serde(rename = "PKNumberStyleScientific")]
    Scientific,
    #[serde(rename = "PKNumberStyleSpellOut")]
    SpellOut,
}

impl NumberStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "PKNumberStyleDecimal",
            Self::Percent => "PKNumberStylePercent",
            Self::Scientific => "PKNumberStyleScientific",
            Self::SpellOut => "PKNumberStyleSpellOut",
        }
    }
}

/// Data the system may detect and link in back-of-pass text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataDetectorType {
    #[serde(rename = "PKDataDetectorTypePhoneNumber")]
    PhoneNumber,
    #[serde(rename = "PKDataDetectorTypeLink")]
    Link,
    #[serde(rename = "PKDataDetectorTypeAddress")]
    Address,
    #[serde(rename = "PKDataDetectorTypeCalendarEvent")]
    CalendarEvent,
}

impl DataDetectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneNumber => "PKDataDetectorTypePhoneNumber",
            Self::Link => "PKDataDetectorTypeLink",
            Self::Address => "PKDataDetectorTypeAddress",
            Self::CalendarEvent => "PKDataDetectorTypeCalendarEvent",
        }
    }
}

/// The typed value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain text.
    Text(String),
    /// A number, rendered as a JSON number.
    Number(Number),
    /// A date-time, rendered in wire format.
    Date(PassDate),
    /// A monetary amount. Adds a `currencyCode` key next to `value`.
    Currency {
        amount: Number,
        currency_code: String,
    },
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<PassDate> for FieldValue {
    fn from(d: PassDate) -> Self {
        Self::Date(d)
    }
}

/// A labeled value in one of the field sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    pub label: Option<String>,
    pub value: FieldValue,
    pub change_message: Option<String>,
    pub attributed_value: Option<String>,
    pub text_alignment: Option<TextAlignment>,
    pub date_style: Option<DateStyle>,
    pub time_style: Option<DateStyle>,
    pub is_relative: Option<bool>,
    pub ignores_time_zone: Option<bool>,
    pub number_style: Option<NumberStyle>,
    pub data_detector_types: Vec<DataDetectorType>,
    row: Option<u8>,
}

impl Field {
    /// A field with the given key, label, and value and no formatting hints.
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
            value: value.into(),
            change_message: None,
            attributed_value: None,
            text_alignment: None,
            date_style: None,
            time_style: None,
            is_relative: None,
            ignores_time_zone: None,
            number_style: None,
            data_detector_types: Vec::new(),
            row: None,
        }
    }

    /// A field with no label.
    pub fn unlabeled(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut field = Self::new(key, "", value);
        field.label = None;
        field
    }

    /// A monetary field.
    pub fn currency(
        key: impl Into<String>,
        label: impl Into<String>,
        amount: impl Into<Number>,
        currency_code: impl Into<String>,
    ) -> Self {
        Self::new(
            key,
            label,
            FieldValue::Currency {
                amount: amount.into(),
                currency_code: currency_code.into(),
            },
        )
    }

    /// A date field with date and time styles.
    pub fn date(
        key: impl Into<String>,
        label: impl Into<String>,
        value: PassDate,
        date_style: DateStyle,
        time_style: DateStyle,
    ) -> Self {
        let mut field = Self::new(key, label, value);
        field.date_style = Some(date_style);
        field.time_style = Some(time_style);
        field
    }

    /// The field key. Immutable once constructed so the uniqueness index
    /// cannot go stale.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Place the field in row 0 or 1 of a two-row auxiliary layout.
    ///
    /// # Errors
    ///
    /// Returns `PassError::InvalidFieldRow` for any other row.
    pub fn with_row(mut self, row: u8) -> Result<Self, PassError> {
        if row > 1 {
            return Err(PassError::InvalidFieldRow {
                key: self.key,
                row,
            });
        }
        self.row = Some(row);
        Ok(self)
    }

    pub fn row(&self) -> Option<u8> {
        self.row
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.text_alignment = Some(alignment);
        self
    }

    pub fn with_change_message(mut self, message: impl Into<String>) -> Self {
        self.change_message = Some(message.into());
        self
    }

    pub fn with_number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = Some(style);
        self
    }

    pub fn with_data_detectors(mut self, detectors: impl IntoIterator<Item = DataDetectorType>) -> Self {
        self.data_detector_types = detectors.into_iter().collect();
        self
    }

    /// Write the field as one JSON object.
    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        w.start_object()?;
        w.string_property("key", &self.key)?;
        if let Some(label) = &self.label {
            w.string_property("label", label)?;
        }
        w.property_name("value")?;
        match &self.value {
            FieldValue::Text(s) => w.string(s)?,
            FieldValue::Number(n) => w.number(n)?,
            FieldValue::Date(d) => w.date_time(d)?,
            FieldValue::Currency {
                amount,
                currency_code,
            } => {
                w.number(amount)?;
                w.string_property("currencyCode", currency_code)?;
            }
        }
        w.optional_string_property("changeMessage", self.change_message.as_deref())?;
        w.optional_string_property("attributedValue", self.attributed_value.as_deref())?;
        if let Some(alignment) = self.text_alignment {
            w.string_property("textAlignment", alignment.as_str())?;
        }
        if let Some(style) = self.date_style {
            w.string_property("dateStyle", style.as_str())?;
        }
        if let Some(style) = self.time_style {
            w.string_property("timeStyle", style.as_str())?;
        }
        if let Some(relative) = self.is_relative {
            w.bool_property("isRelative", relative)?;
        }
        if let Some(ignores) = self.ignores_time_zone {
            w.bool_property("ignoresTimeZone", ignores)?;
        }
        if let Some(style) = self.number_style {
            w.string_property("numberStyle", style.as_str())?;
        }
        if !self.data_detector_types.is_empty() {
            w.property_name("dataDetectorTypes")?;
            w.start_array()?;
            for detector in &self.data_detector_types {
                w.string(detector.as_str())?;
            }
            w.end_array()?;
        }
        if let Some(row) = self.row {
            w.property_name("row")?;
            w.u64(u64::from(row))?;
        }
        w.end_object()
    }
}

/// The five field sections with a key index spanning all of them.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    sections: [Vec<Field>; 5],
    index: HashMap<String, (FieldSection, usize)>,
}

impl FieldSet {
    /// Empty sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `field` to `section`.
    ///
    /// # Errors
    ///
    /// Returns `PassError::DuplicateKey` if any section already holds a field
    /// with the same key. The set is unchanged in that case.
    pub fn insert(&mut self, section: FieldSection, field: Field) -> Result<(), PassError> {
        ensure_unique_key(&self.index, field.key())?;
        let fields = &mut self.sections[section.ordinal()];
        self.index
            .insert(field.key.clone(), (section, fields.len()));
        fields.push(field);
        Ok(())
    }

    /// Fields of one section in insertion order.
    pub fn section(&self, section: FieldSection) -> &[Field] {
        &self.sections[section.ordinal()]
    }

    /// Look up a field by key in any section.
    pub fn get(&self, key: &str) -> Option<(FieldSection, &Field)> {
        let (section, position) = self.index.get(key)?;
        self.sections[section.ordinal()]
            .get(*position)
            .map(|field| (*section, field))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Total number of fields across all sections.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All fields, section by section in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldSection, &Field)> {
        FieldSection::all()
            .iter()
            .flat_map(move |s| self.section(*s).iter().map(move |f| (*s, f)))
    }
}
