//! # Semantic Tags
//!
//! Machine-readable annotations that let the wallet offer features beyond
//! display: calendar entries for event dates, Wi-Fi auto-join, gate change
//! notifications, and so on. Every tag contributes exactly one key to the
//! document's `semantics` object.
//!
//! ## Structure
//!
//! - [`TagValue`] is the small vocabulary of value shapes a tag can take
//!   (text, flag, number, date-time, nested object, array, raw JSON).
//! - [`SemanticTag`] is the closed core. Tags that share a value shape are
//!   grouped under one variant keyed by a wire-key enum ([`TextTag`],
//!   [`DateTag`], …). Tags with structured values get their own variant.
//! - [`TagEncoder`] is the open extension point. Any type implementing it
//!   can be wrapped with [`SemanticTag::custom`]; the orchestrator only ever
//!   calls [`SemanticTag::key`] and [`SemanticTag::value`], so new kinds
//!   never require changes there.
//!
//! ## Duplicate Keys
//!
//! Tags are written in insertion order and duplicates are not rejected.
//! Two tags with the same wire key produce two entries under the same
//! object key; JSON readers keep the last one.

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::{Number, Value};

use pkpass_core::{PassDate, PassError};

use crate::writer::JsonWriter;

// ─── Value shapes ───────────────────────────────────────────────────

/// The value written under a tag's wire key.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Flag(bool),
    Number(Number),
    Date(PassDate),
    /// Nested object. Entries are written in order.
    Object(Vec<(String, TagValue)>),
    List(Vec<TagValue>),
    /// Arbitrary JSON written verbatim.
    Json(Value),
}

impl TagValue {
    /// A float as a JSON number, or `null` if it is not finite.
    pub fn float(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Json(Value::Null), Self::Number)
    }

    /// Object builder that skips absent optional entries.
    fn object<'a>(entries: impl IntoIterator<Item = (&'a str, Option<TagValue>)>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
                .collect(),
        )
    }

    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        match self {
            Self::Text(s) => w.string(s),
            Self::Flag(b) => w.bool(*b),
            Self::Number(n) => w.number(n),
            Self::Date(d) => w.date_time(d),
            Self::Object(entries) => {
                w.start_object()?;
                for (key, value) in entries {
                    w.property_name(key)?;
                    value.write(w)?;
                }
                w.end_object()
            }
            Self::List(items) => {
                w.start_array()?;
                for item in items {
                    item.write(w)?;
                }
                w.end_array()
            }
            Self::Json(v) => w.value(v),
        }
    }
}

fn text(s: &Option<String>) -> Option<TagValue> {
    s.as_ref().map(|s| TagValue::Text(s.clone()))
}

// ─── Wire-key tables ────────────────────────────────────────────────

/// Defines a wire-key enum with its `as_str` table, `all()` listing, and
/// `FromStr` inverse.
macro_rules! wire_keys {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every key in declaration order.
            pub fn all() -> &'static [$name] {
                &[ $( Self::$variant ),+ ]
            }

            /// The wire key written into `semantics`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PassError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(PassError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_keys! {
    /// Tags whose value is a plain string.
    TextTag, "text semantic tag" {
        AirlineCode => "airlineCode",
        AwayTeamAbbreviation => "awayTeamAbbreviation",
        AwayTeamLocation => "awayTeamLocation",
        AwayTeamName => "awayTeamName",
        BoardingGroup => "boardingGroup",
        BoardingSequenceNumber => "boardingSequenceNumber",
        CarNumber => "carNumber",
        ConfirmationNumber => "confirmationNumber",
        DepartureAirportCode => "departureAirportCode",
        DepartureAirportName => "departureAirportName",
        DepartureGate => "departureGate",
        DepartureLocationDescription => "departureLocationDescription",
        DeparturePlatform => "departurePlatform",
        DepartureStationName => "departureStationName",
        DepartureTerminal => "departureTerminal",
        DestinationAirportCode => "destinationAirportCode",
        DestinationAirportName => "destinationAirportName",
        DestinationGate => "destinationGate",
        DestinationLocationDescription => "destinationLocationDescription",
        DestinationPlatform => "destinationPlatform",
        DestinationStationName => "destinationStationName",
        DestinationTerminal => "destinationTerminal",
        EventName => "eventName",
        FlightCode => "flightCode",
        Genre => "genre",
        HomeTeamAbbreviation => "homeTeamAbbreviation",
        HomeTeamLocation => "homeTeamLocation",
        HomeTeamName => "homeTeamName",
        LeagueAbbreviation => "leagueAbbreviation",
        LeagueName => "leagueName",
        MembershipProgramName => "membershipProgramName",
        MembershipProgramNumber => "membershipProgramNumber",
        PriorityStatus => "priorityStatus",
        SecurityScreening => "securityScreening",
        SportName => "sportName",
        TransitProvider => "transitProvider",
        TransitStatus => "transitStatus",
        TransitStatusReason => "transitStatusReason",
        VehicleName => "vehicleName",
        VehicleNumber => "vehicleNumber",
        VehicleType => "vehicleType",
        VenueEntrance => "venueEntrance",
        VenueName => "venueName",
        VenuePhoneNumber => "venuePhoneNumber",
        VenueRoom => "venueRoom",
        AdmissionLevel => "admissionLevel",
        AdmissionLevelAbbreviation => "admissionLevelAbbreviation",
        AttendeeName => "attendeeName",
        EntranceDescription => "entranceDescription",
        VenueEntranceDoor => "venueEntranceDoor",
        VenueEntranceGate => "venueEntranceGate",
        VenueEntrancePortal => "venueEntrancePortal",
        VenueRegionName => "venueRegionName",
        AdditionalTicketAttributes => "additionalTicketAttributes",
    }
}

wire_keys! {
    /// Tags whose value is a date-time.
    DateTag, "date semantic tag" {
        CurrentArrivalDate => "currentArrivalDate",
        CurrentBoardingDate => "currentBoardingDate",
        CurrentDepartureDate => "currentDepartureDate",
        OriginalArrivalDate => "originalArrivalDate",
        OriginalBoardingDate => "originalBoardingDate",
        OriginalDepartureDate => "originalDepartureDate",
        EventStartDate => "eventStartDate",
        EventEndDate => "eventEndDate",
        VenueOpenDate => "venueOpenDate",
        VenueCloseDate => "venueCloseDate",
        VenueDoorsOpenDate => "venueDoorsOpenDate",
        VenueGatesOpenDate => "venueGatesOpenDate",
        VenueBoxOfficeOpenDate => "venueBoxOfficeOpenDate",
        VenueFanZoneOpenDate => "venueFanZoneOpenDate",
        VenueParkingLotsOpenDate => "venueParkingLotsOpenDate",
    }
}

wire_keys! {
    /// Tags whose value is a boolean.
    FlagTag, "flag semantic tag" {
        SilenceRequested => "silenceRequested",
        TailgatingAllowed => "tailgatingAllowed",
    }
}

wire_keys! {
    /// Tags whose value is a number.
    NumberTag, "number semantic tag" {
        Duration => "duration",
        FlightNumber => "flightNumber",
    }
}

wire_keys! {
    /// Tags whose value is an array of strings.
    ListTag, "list semantic tag" {
        ArtistIds => "artistIDs",
        PerformerNames => "performerNames",
    }
}

// ─── Structured values ──────────────────────────────────────────────

/// A monetary amount. The amount is kept as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmount {
    pub amount: String,
    pub currency_code: String,
}

impl CurrencyAmount {
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    fn to_value(&self) -> TagValue {
        TagValue::object([
            ("amount", Some(TagValue::Text(self.amount.clone()))),
            ("currencyCode", Some(TagValue::Text(self.currency_code.clone()))),
        ])
    }
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    fn to_value(self) -> TagValue {
        TagValue::object([
            ("latitude", Some(TagValue::float(self.latitude))),
            ("longitude", Some(TagValue::float(self.longitude))),
        ])
    }
}

/// Components of a person's name. Only set components are written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub name_prefix: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub family_name: Option<String>,
    pub name_suffix: Option<String>,
    pub nickname: Option<String>,
}

impl PersonName {
    fn to_value(&self) -> TagValue {
        TagValue::object([
            ("namePrefix", text(&self.name_prefix)),
            ("givenName", text(&self.given_name)),
            ("middleName", text(&self.middle_name)),
            ("familyName", text(&self.family_name)),
            ("nameSuffix", text(&self.name_suffix)),
            ("nickname", text(&self.nickname)),
        ])
    }
}

/// A seat assignment. Only set properties are written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_description: Option<String>,
    pub seat_identifier: Option<String>,
    pub seat_number: Option<String>,
    pub seat_row: Option<String>,
    pub seat_section: Option<String>,
    pub seat_type: Option<String>,
}

impl Seat {
    fn to_value(&self) -> TagValue {
        TagValue::object([
            ("seatDescription", text(&self.seat_description)),
            ("seatIdentifier", text(&self.seat_identifier)),
            ("seatNumber", text(&self.seat_number)),
            ("seatRow", text(&self.seat_row)),
            ("seatSection", text(&self.seat_section)),
            ("seatType", text(&self.seat_type)),
        ])
    }
}

/// Credentials for one Wi-Fi network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    pub password: String,
}

impl WifiNetwork {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
        }
    }

    fn to_value(&self) -> TagValue {
        TagValue::object([
            ("ssid", Some(TagValue::Text(self.ssid.clone()))),
            ("password", Some(TagValue::Text(self.password.clone()))),
        ])
    }
}

/// Kind of event an event ticket admits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "PKEventTypeGeneric")]
    Generic,
    #[serde(rename = "PKEventTypeLivePerformance")]
    LivePerformance,
    #[serde(rename = "PKEventTypeMovie")]
    Movie,
    #[serde(rename = "PKEventTypeSports")]
    Sports,
    #[serde(rename = "PKEventTypeConference")]
    Conference,
    #[serde(rename = "PKEventTypeConvention")]
    Convention,
    #[serde(rename = "PKEventTypeWorkshop")]
    Workshop,
    #[serde(rename = "PKEventTypeSocialGathering")]
    SocialGathering,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "PKEventTypeGeneric",
            Self::LivePerformance => "PKEventTypeLivePerformance",
            Self::Movie => "PKEventTypeMovie",
            Self::Sports => "PKEventTypeSports",
            Self::Conference => "PKEventTypeConference",
            Self::Convention => "PKEventTypeConvention",
            Self::Workshop => "PKEventTypeWorkshop",
            Self::SocialGathering => "PKEventTypeSocialGathering",
        }
    }
}

// ─── Extension point ────────────────────────────────────────────────

/// A tag kind defined outside this crate.
pub trait TagEncoder: fmt::Debug + Send + Sync {
    /// Wire key inside `semantics`.
    fn key(&self) -> &str;

    /// Value written under [`TagEncoder::key`].
    fn encode(&self) -> TagValue;
}

/// A tag carrying caller-supplied JSON under any key.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTag {
    pub key: String,
    pub value: Value,
}

impl TagEncoder for RawTag {
    fn key(&self) -> &str {
        &self.key
    }

    fn encode(&self) -> TagValue {
        TagValue::Json(self.value.clone())
    }
}

// ─── Closed core ────────────────────────────────────────────────────

/// One semantic tag.
#[derive(Debug, Clone)]
pub enum SemanticTag {
    Text(TextTag, String),
    Date(DateTag, PassDate),
    Flag(FlagTag, bool),
    Number(NumberTag, Number),
    TextList(ListTag, Vec<String>),
    Balance(CurrencyAmount),
    TotalPrice(CurrencyAmount),
    DepartureLocation(Location),
    DestinationLocation(Location),
    VenueLocation(Location),
    PassengerName(PersonName),
    Seats(Vec<Seat>),
    WifiAccess(Vec<WifiNetwork>),
    EventType(EventType),
    Custom(Arc<dyn TagEncoder>),
}

impl SemanticTag {
    pub fn text(tag: TextTag, value: impl Into<String>) -> Self {
        Self::Text(tag, value.into())
    }

    pub fn date(tag: DateTag, value: PassDate) -> Self {
        Self::Date(tag, value)
    }

    pub fn airline_code(code: impl Into<String>) -> Self {
        Self::text(TextTag::AirlineCode, code)
    }

    pub fn event_name(name: impl Into<String>) -> Self {
        Self::text(TextTag::EventName, name)
    }

    pub fn venue_name(name: impl Into<String>) -> Self {
        Self::text(TextTag::VenueName, name)
    }

    pub fn event_start_date(date: PassDate) -> Self {
        Self::date(DateTag::EventStartDate, date)
    }

    pub fn event_end_date(date: PassDate) -> Self {
        Self::date(DateTag::EventEndDate, date)
    }

    pub fn venue_close_date(date: PassDate) -> Self {
        Self::date(DateTag::VenueCloseDate, date)
    }

    pub fn balance(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self::Balance(CurrencyAmount::new(amount, currency_code))
    }

    pub fn total_price(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self::TotalPrice(CurrencyAmount::new(amount, currency_code))
    }

    pub fn wifi_access(networks: impl IntoIterator<Item = WifiNetwork>) -> Self {
        Self::WifiAccess(networks.into_iter().collect())
    }

    /// Wrap an externally defined tag kind.
    pub fn custom(encoder: impl TagEncoder + 'static) -> Self {
        Self::Custom(Arc::new(encoder))
    }

    /// Pass arbitrary JSON through under `key`.
    pub fn raw(key: impl Into<String>, value: Value) -> Self {
        Self::custom(RawTag {
            key: key.into(),
            value,
        })
    }

    /// Wire key inside `semantics`.
    pub fn key(&self) -> &str {
        match self {
            Self::Text(tag, _) => tag.as_str(),
            Self::Date(tag, _) => tag.as_str(),
            Self::Flag(tag, _) => tag.as_str(),
            Self::Number(tag, _) => tag.as_str(),
            Self::TextList(tag, _) => tag.as_str(),
            Self::Balance(_) => "balance",
            Self::TotalPrice(_) => "totalPrice",
            Self::DepartureLocation(_) => "departureLocation",
            Self::DestinationLocation(_) => "destinationLocation",
            Self::VenueLocation(_) => "venueLocation",
            Self::PassengerName(_) => "passengerName",
            Self::Seats(_) => "seats",
            Self::WifiAccess(_) => "wifiAccess",
            Self::EventType(_) => "eventType",
            Self::Custom(encoder) => encoder.key(),
        }
    }

    /// Value written under [`SemanticTag::key`].
    pub fn value(&self) -> TagValue {
        match self {
            Self::Text(_, s) => TagValue::Text(s.clone()),
            Self::Date(_, d) => TagValue::Date(*d),
            Self::Flag(_, b) => TagValue::Flag(*b),
            Self::Number(_, n) => TagValue::Number(n.clone()),
            Self::TextList(_, items) => {
                TagValue::List(items.iter().cloned().map(TagValue::Text).collect())
            }
            Self::Balance(amount) | Self::TotalPrice(amount) => amount.to_value(),
            Self::DepartureLocation(loc)
            | Self::DestinationLocation(loc)
            | Self::VenueLocation(loc) => loc.to_value(),
            Self::PassengerName(name) => name.to_value(),
            Self::Seats(seats) => TagValue::List(seats.iter().map(Seat::to_value).collect()),
            Self::WifiAccess(networks) => {
                TagValue::List(networks.iter().map(WifiNetwork::to_value).collect())
            }
            Self::EventType(t) => TagValue::Text(t.as_str().to_string()),
            Self::Custom(encoder) => encoder.encode(),
        }
    }
}

/// The ordered tags of one pass.
#[derive(Debug, Clone, Default)]
pub struct SemanticTags {
    tags: Vec<SemanticTag>,
}

impl SemanticTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. Duplicated keys are kept.
    pub fn add(&mut self, tag: SemanticTag) {
        self.tags.push(tag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Write `"semantics": {…}`. Writes nothing if there are no tags.
    pub fn write<W: io::Write, F: Formatter>(&self, w: &mut JsonWriter<W, F>) -> Result<(), PassError> {
        if self.tags.is_empty() {
            return Ok(());
        }
        w.property_name("semantics")?;
        w.start_object()?;
        for tag in &self.tags {
            w.property_name(tag.key())?;
            tag.value().write(w)?;
        }
        w.end_object()
    }
}

impl Extend<SemanticTag> for SemanticTags {
    fn extend<I: IntoIterator<Item = SemanticTag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}
