//! # Relevance Entries
//!
//! Conditions under which the wallet surfaces a pass on its own: points in
//! time (or bounded time windows), geographic locations, and BLE beacons.
//!
//! ## Relevant Dates
//!
//! A [`RelevantDate`] is either a single instant, written as
//! `{"relevantDate": …}`, or an interval, written as
//! `{"startDate": …, "endDate": …}`. Which form is written depends only on
//! whether an end instant exists; an interval whose start equals its end is
//! still written as an interval.
//!
//! An interval may span at most 24 hours. The limit is checked when the
//! interval is built through [`RelevantDate::interval`] and checked again by
//! [`RelevantDate::write`], so an entry built through
//! [`RelevantDate::interval_unchecked`] still cannot reach the output.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use pkpass_core::{PassDate, PassError};

use crate::validation::check_interval;
use crate::writer::JsonWriter;

/// A relevant instant or a relevancy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevantDate {
    start: PassDate,
    end: Option<PassDate>,
}

impl RelevantDate {
    /// A single relevant instant.
    pub fn at(date: PassDate) -> Self {
        Self {
            start: date,
            end: None,
        }
    }

    /// A relevancy interval.
    ///
    /// # Errors
    ///
    /// Returns `PassError::IntervalTooLong` if the interval spans more than
    /// 24 hours.
    pub fn interval(start: PassDate, end: PassDate) -> Result<Self, PassError> {
        check_interval(&start, Some(&end))?;
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// A relevancy interval built without the span check. Writing it still
    /// fails if the span is too long.
    pub fn interval_unchecked(start: PassDate, end: PassDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn start(&self) -> &PassDate {
        &self.start
    }

    pub fn end(&self) -> Option<&PassDate> {
        self.end.as_ref()
    }

    /// Re-run the span check.
    pub fn validate(&self) -> Result<(), PassError> {
        check_interval(&self.start, self.end.as_ref())
    }

    /// Validate, then write one entry of the `relevantDates` array.
    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        self.validate()?;
        w.start_object()?;
        match &self.end {
            None => w.date_property("relevantDate", &self.start)?,
            Some(end) => {
                w.date_property("startDate", &self.start)?;
                w.date_property("endDate", end)?;
            }
        }
        w.end_object()
    }
}

/// A location where the pass is relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Text shown on the lock screen when the pass becomes relevant here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

impl RelevantLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            relevant_text: None,
        }
    }

    pub fn with_relevant_text(mut self, text: impl Into<String>) -> Self {
        self.relevant_text = Some(text.into());
        self
    }

    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        w.start_object()?;
        w.property_name("latitude")?;
        w.f64(self.latitude)?;
        w.property_name("longitude")?;
        w.f64(self.longitude)?;
        if let Some(altitude) = self.altitude {
            w.property_name("altitude")?;
            w.f64(altitude)?;
        }
        w.optional_string_property("relevantText", self.relevant_text.as_deref())?;
        w.end_object()
    }
}

/// A BLE beacon near which the pass is relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantBeacon {
    #[serde(rename = "proximityUUID")]
    pub proximity_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

impl RelevantBeacon {
    pub fn new(proximity_uuid: impl Into<String>) -> Self {
        Self {
            proximity_uuid: proximity_uuid.into(),
            major: None,
            minor: None,
            relevant_text: None,
        }
    }

    pub fn with_major(mut self, major: u16) -> Self {
        self.major = Some(major);
        self
    }

    pub fn with_minor(mut self, minor: u16) -> Self {
        self.minor = Some(minor);
        self
    }

    pub fn with_relevant_text(mut self, text: impl Into<String>) -> Self {
        self.relevant_text = Some(text.into());
        self
    }

    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        w.start_object()?;
        w.string_property("proximityUUID", &self.proximity_uuid)?;
        if let Some(major) = self.major {
            w.property_name("major")?;
            w.u64(u64::from(major))?;
        }
        if let Some(minor) = self.minor {
            w.property_name("minor")?;
            w.u64(u64::from(minor))?;
        }
        w.optional_string_property("relevantText", self.relevant_text.as_deref())?;
        w.end_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> PassDate {
        PassDate::parse(s).unwrap()
    }

    fn render(f: impl FnOnce(&mut JsonWriter<&mut Vec<u8>>) -> Result<(), PassError>) -> Result<String, PassError> {
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        f(&mut w)?;
        w.finish()?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn single_instant_writes_relevant_date_only() {
        let d = RelevantDate::at(at("2025-02-11T09:40:00+02:00"));
        let s = render(|w| d.write(w)).unwrap();
        assert_eq!(s, r#"{"relevantDate":"2025-02-11T09:40:00+02:00"}"#);
    }

    #[test]
    fn interval_writes_start_and_end() {
        let d = RelevantDate::interval(
            at("2025-10-31T06:30:00+04:00"),
            at("2025-10-31T23:00:00+04:00"),
        )
        .unwrap();
        let s = render(|w| d.write(w)).unwrap();
        assert_eq!(
            s,
            r#"{"startDate":"2025-10-31T06:30:00+04:00","endDate":"2025-10-31T23:00:00+04:00"}"#
        );
    }

    #[test]
    fn zero_length_interval_is_still_an_interval() {
        let t = at("2025-10-31T06:30:00+04:00");
        let d = RelevantDate::interval(t, t).unwrap();
        let s = render(|w| d.write(w)).unwrap();
        assert!(s.contains("startDate"));
        assert!(!s.contains("relevantDate"));
    }

    #[test]
    fn exactly_24_hours_accepted() {
        let start = at("2025-10-31T00:00:00Z");
        let end = start.checked_add(Duration::hours(24)).unwrap();
        let d = RelevantDate::interval(start, end).unwrap();
        assert!(render(|w| d.write(w)).is_ok());
    }

    #[test]
    fn over_24_hours_rejected_at_construction() {
        let start = at("2025-10-31T00:00:00Z");
        let end = start.checked_add(Duration::hours(24) + Duration::seconds(1)).unwrap();
        assert!(matches!(
            RelevantDate::interval(start, end),
            Err(PassError::IntervalTooLong { .. })
        ));
    }

    #[test]
    fn unchecked_interval_fails_at_write_before_any_output() {
        let start = at("2025-10-31T00:00:00Z");
        let end = start.checked_add(Duration::hours(30)).unwrap();
        let d = RelevantDate::interval_unchecked(start, end);
        let mut buf = Vec::new();
        let mut w = JsonWriter::new(&mut buf);
        assert!(matches!(d.write(&mut w), Err(PassError::IntervalTooLong { .. })));
        drop(w);
        assert!(buf.is_empty());
    }

    #[test]
    fn location_keys() {
        let loc = RelevantLocation::new(52.37, 4.89).with_relevant_text("Store nearby");
        let s = render(|w| loc.write(w)).unwrap();
        assert_eq!(
            s,
            r#"{"latitude":52.37,"longitude":4.89,"relevantText":"Store nearby"}"#
        );
    }

    #[test]
    fn beacon_optional_keys() {
        let beacon = RelevantBeacon::new("E2C56DB5-DFFB-48D2-B060-D0F5A71096E0")
            .with_major(3)
            .with_relevant_text("Welcome");
        let v: serde_json::Value = serde_json::from_str(&render(|w| beacon.write(w)).unwrap()).unwrap();
        assert_eq!(v["proximityUUID"], "E2C56DB5-DFFB-48D2-B060-D0F5A71096E0");
        assert_eq!(v["major"], 3);
        assert!(v.get("minor").is_none());
        assert_eq!(v["relevantText"], "Welcome");
    }

    #[test]
    fn beacon_descriptor_uses_uppercase_uuid_key() {
        let beacon: RelevantBeacon =
            serde_json::from_str(r#"{"proximityUUID":"abc","minor":7}"#).unwrap();
        assert_eq!(beacon.proximity_uuid, "abc");
        assert_eq!(beacon.minor, Some(7));
    }
}
