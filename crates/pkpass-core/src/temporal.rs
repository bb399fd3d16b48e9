//! # Temporal Types: Offset-Preserving Date-Times
//!
//! Defines `PassDate`, the date-time type used for every instant that ends
//! up in a pass document (relevant dates, expiration, semantic tag dates,
//! date fields).
//!
//! ## Wire Format
//!
//! Instants render as `YYYY-MM-DDTHH:MM:SS±HH:MM`. The numeric UTC offset
//! the caller supplied is kept verbatim: `2025-02-11T09:40:00+02:00` is
//! never normalized to `2025-02-11T07:40:00+00:00`. Sub-second precision is
//! kept for arithmetic but dropped on output.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PassError;

/// `chrono` format string for the wire representation.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// A date-time with an explicit, preserved UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassDate(DateTime<FixedOffset>);

impl PassDate {
    /// Wrap a `chrono` date-time, keeping its offset.
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// Build a date-time from calendar parts and an offset in whole minutes
    /// east of UTC.
    ///
    /// # Errors
    ///
    /// Returns `PassError::InvalidDateTime` if any component is out of range.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_minutes: i32,
    ) -> Result<Self, PassError> {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                PassError::InvalidDateTime(format!("offset out of range: {offset_minutes} minutes"))
            })?;
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                PassError::InvalidDateTime(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02} is not a valid date-time"
                ))
            })?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(Self)
            .ok_or_else(|| PassError::InvalidDateTime(format!("ambiguous local time {naive}")))
    }

    /// Parse an RFC 3339 string. The offset in the input is preserved.
    ///
    /// # Errors
    ///
    /// Returns `PassError::InvalidDateTime` if the string is not RFC 3339.
    pub fn parse(s: &str) -> Result<Self, PassError> {
        DateTime::parse_from_rfc3339(s)
            .map(Self)
            .map_err(|e| PassError::InvalidDateTime(format!("{s:?}: {e}")))
    }

    /// Access the inner `chrono` value.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Elapsed time from `earlier` to `self`. Negative if `self` is before
    /// `earlier`. Offsets do not matter; both are compared as instants.
    pub fn since(&self, earlier: &PassDate) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// Shift by a duration, keeping the offset.
    pub fn checked_add(&self, d: Duration) -> Option<Self> {
        self.0.checked_add_signed(d).map(Self)
    }

    /// Render in wire format.
    pub fn to_wire(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }
}

impl From<DateTime<FixedOffset>> for PassDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for PassDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for PassDate {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PassDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PassDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
