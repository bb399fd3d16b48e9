//! # End-to-End Pass Document Tests
//!
//! Builds requests through the public API and checks the emitted bytes:
//! top-level key order, cross-section key uniqueness, the relevancy span
//! limit, color normalization, semantic tags, and byte-stable rewrites.

use std::fmt;

use chrono::Duration;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::{json, Value};

use pkpass_core::{PassDate, PassError, PassStyle, PreferredStyleScheme, TransitType};
use pkpass_document::semantics::WifiNetwork;
use pkpass_document::{
    Barcode, BarcodeFormat, Field, FieldSection, Nfc, PassRequest, RelevantBeacon, RelevantDate,
    RelevantLocation, SemanticTag,
};

/// Top-level object keys in document order.
struct TopLevelKeys(Vec<String>);

impl<'de> Deserialize<'de> for TopLevelKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = TopLevelKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut keys = Vec::new();
                while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                    keys.push(key);
                }
                Ok(TopLevelKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

fn at(s: &str) -> PassDate {
    PassDate::parse(s).unwrap()
}

fn parse(request: &PassRequest) -> Value {
    serde_json::from_slice(&request.to_json_vec().unwrap()).unwrap()
}

fn top_level_keys(request: &PassRequest) -> Vec<String> {
    let keys: TopLevelKeys = serde_json::from_slice(&request.to_json_vec().unwrap()).unwrap();
    keys.0
}

fn boarding_pass() -> PassRequest {
    let mut pass = PassRequest::new(PassStyle::BoardingPass);
    pass.transit_type = TransitType::Air;
    pass.pass_type_identifier = "pass.com.example.flight".into();
    pass.serial_number = "EX815-12C".into();
    pass.description = "Boarding pass".into();
    pass.organization_name = "Example Air".into();
    pass.team_identifier = "ABCDE12345".into();
    pass.logo_text = "Example Air".into();
    pass.associated_store_identifiers = vec![284_882_215];
    pass.app_launch_url = "examplear://boarding".into();
    pass.relevant_date = Some(at("2025-02-11T09:40:00+02:00"));
    pass.max_distance = Some(100);
    pass.foreground_color = Some("#fff".into());
    pass.background_color = Some("#17BB52".into());
    pass.label_color = Some("rgb(1,2,3)".into());
    pass.suppress_strip_shine = Some(true);
    pass.grouping_identifier = Some("trip-42".into());
    pass.expiration_date = Some(at("2025-02-12T00:00:00+02:00"));
    pass.voided = Some(false);
    pass.barcode = Some(Barcode::new(BarcodeFormat::Pdf417, "M1DOE/JOHN", "iso-8859-1"));
    pass.nfc = Some(Nfc::new("nfc-payload"));
    pass.authentication_token = "vxwxd7J8AlNNFPS8k0a0FfUFtq0ewzFdc".into();
    pass.web_service_url = "https://example.com/passes/".into();

    pass.add_semantic_tag(SemanticTag::airline_code("EX"));
    pass.add_user_info("customer", json!({"tier": "gold"}));
    pass.add_relevant_instant(at("2025-02-11T09:40:00+02:00"));
    pass.add_location(RelevantLocation::new(52.31, 4.76));
    pass.add_beacon(RelevantBeacon::new("E2C56DB5-DFFB-48D2-B060-D0F5A71096E0"));
    pass.add_barcode(Barcode::new(BarcodeFormat::Qr, "M1DOE/JOHN", "iso-8859-1"));
    pass.add_preferred_style_scheme(PreferredStyleScheme::SemanticBoardingPass);
    pass.add_primary_field(Field::new("origin", "Amsterdam", "AMS")).unwrap();
    pass.add_primary_field(Field::new("destination", "London", "LHR")).unwrap();
    pass
}

#[test]
fn top_level_keys_follow_emission_order() {
    let expected = [
        "semantics",
        "passTypeIdentifier",
        "formatVersion",
        "serialNumber",
        "description",
        "organizationName",
        "teamIdentifier",
        "sharingProhibited",
        "auxiliaryStoreIdentifiers",
        "suppressHeaderDarkening",
        "useAutomaticColors",
        "footerBackgroundColor",
        "sellURL",
        "transferURL",
        "bagPolicyURL",
        "orderFoodURL",
        "merchandiseURL",
        "transitInformationURL",
        "parkingInformationURL",
        "directionsInformationURL",
        "accessibilityURL",
        "purchaseParkingURL",
        "addOnURL",
        "contactVenueEmail",
        "contactVenueWebsite",
        "contactVenuePhoneNumber",
        "logoText",
        "associatedStoreIdentifiers",
        "appLaunchURL",
        "userInfo",
        "relevantDate",
        "relevantDates",
        "maxDistance",
        "locations",
        "beacons",
        "foregroundColor",
        "backgroundColor",
        "labelColor",
        "suppressStripShine",
        "groupingIdentifier",
        "expirationDate",
        "voided",
        "barcodes",
        "nfc",
        "boardingPass",
        "preferredStyleSchemes",
        "barcode",
        "authenticationToken",
        "webServiceURL",
    ];
    assert_eq!(top_level_keys(&boarding_pass()), expected);
}

#[test]
fn fully_populated_values() {
    let v = parse(&boarding_pass());
    assert_eq!(v["formatVersion"], 1);
    assert_eq!(v["maxDistance"], "100");
    assert_eq!(v["foregroundColor"], "rgb(15,15,15)");
    assert_eq!(v["backgroundColor"], "rgb(23,187,82)");
    assert_eq!(v["labelColor"], "rgb(1,2,3)");
    assert_eq!(v["relevantDate"], "2025-02-11T09:40:00+02:00");
    assert_eq!(v["relevantDates"], json!([{"relevantDate": "2025-02-11T09:40:00+02:00"}]));
    assert_eq!(v["userInfo"], json!({"customer": {"tier": "gold"}}));
    assert_eq!(v["boardingPass"]["transitType"], "PKTransitTypeAir");
    assert_eq!(v["preferredStyleSchemes"], json!(["semanticBoardingPass"]));
    assert_eq!(v["nfc"]["message"], "nfc-payload");
    assert_eq!(v["associatedStoreIdentifiers"], json!([284_882_215]));
}

#[test]
fn fields_keep_insertion_order_and_reject_duplicates() {
    let mut pass = PassRequest::new(PassStyle::StoreCard);
    pass.add_field(FieldSection::Secondary, Field::new("b", "B", "2")).unwrap();
    pass.add_field(FieldSection::Secondary, Field::new("a", "A", "1")).unwrap();
    pass.add_field(FieldSection::Back, Field::new("terms", "Terms", "None")).unwrap();

    for section in FieldSection::all() {
        let err = pass
            .add_field(*section, Field::new("a", "Again", "x"))
            .unwrap_err();
        assert!(matches!(err, PassError::DuplicateKey { .. }), "{section}");
    }

    let v = parse(&pass);
    let keys: Vec<&str> = v["storeCard"]["secondaryFields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(v["storeCard"]["backFields"][0]["value"], "None");
    assert_eq!(v["storeCard"]["headerFields"], json!([]));
}

#[test]
fn relevancy_span_boundary() {
    let start = at("2025-10-31T06:00:00+04:00");

    let mut pass = PassRequest::default();
    pass.add_relevant_interval(start, start.checked_add(Duration::hours(24)).unwrap())
        .unwrap();
    let v = parse(&pass);
    assert_eq!(v["relevantDates"][0]["startDate"], "2025-10-31T06:00:00+04:00");
    assert_eq!(v["relevantDates"][0]["endDate"], "2025-11-01T06:00:00+04:00");
    assert!(v["relevantDates"][0].get("relevantDate").is_none());

    let too_long = start
        .checked_add(Duration::hours(24) + Duration::seconds(1))
        .unwrap();
    assert!(matches!(
        pass.add_relevant_interval(start, too_long),
        Err(PassError::IntervalTooLong { .. })
    ));
    assert!(matches!(
        RelevantDate::interval(start, too_long),
        Err(PassError::IntervalTooLong { .. })
    ));
}

#[test]
fn invalid_color_fails_the_write_after_partial_output() {
    let mut pass = PassRequest::default();
    pass.serial_number = "partial".into();
    pass.foreground_color = Some("#12".into());

    let mut sink = Vec::new();
    let err = pass.write(&mut sink).unwrap_err();
    assert!(matches!(err, PassError::InvalidColorFormat { .. }));
    // Earlier sections already reached the sink; the document is unusable.
    assert!(String::from_utf8_lossy(&sink).contains("\"serialNumber\":\"partial\""));
    assert!(serde_json::from_slice::<Value>(&sink).is_err());
}

#[test]
fn semantic_tags_example() {
    let mut pass = PassRequest::new(PassStyle::EventTicket);
    pass.add_semantic_tag(SemanticTag::airline_code("EX"));
    pass.add_semantic_tag(SemanticTag::balance("1000", "GBP"));
    pass.add_semantic_tag(SemanticTag::venue_close_date(at("2025-08-10T09:10:00+03:00")));
    let v = parse(&pass);
    assert_eq!(v["semantics"]["airlineCode"], "EX");
    assert_eq!(v["semantics"]["balance"]["amount"], "1000");
    assert_eq!(v["semantics"]["balance"]["currencyCode"], "GBP");
    assert_eq!(v["semantics"]["venueCloseDate"], "2025-08-10T09:10:00+03:00");
}

#[test]
fn style_schemes_lowercase_first_letter_only() {
    let mut pass = PassRequest::new(PassStyle::EventTicket);
    pass.add_preferred_style_scheme(PreferredStyleScheme::EventTicket);
    pass.add_preferred_style_scheme(PreferredStyleScheme::PosterEventTicket);
    assert_eq!(
        parse(&pass)["preferredStyleSchemes"],
        json!(["eventTicket", "posterEventTicket"])
    );
}

#[test]
fn wifi_networks_keep_order() {
    let mut pass = PassRequest::new(PassStyle::EventTicket);
    pass.add_semantic_tag(SemanticTag::wifi_access([
        WifiNetwork::new("first", "p1"),
        WifiNetwork::new("second", "p2"),
    ]));
    assert_eq!(
        parse(&pass)["semantics"]["wifiAccess"],
        json!([
            {"ssid": "first", "password": "p1"},
            {"ssid": "second", "password": "p2"}
        ])
    );
}

#[test]
fn rewriting_an_unchanged_request_is_byte_identical() {
    let pass = boarding_pass();
    let first = pass.to_json_vec().unwrap();
    let second = pass.to_json_vec().unwrap();
    assert_eq!(first, second);

    let mut pretty_a = Vec::new();
    let mut pretty_b = Vec::new();
    pass.write_pretty(&mut pretty_a).unwrap();
    pass.write_pretty(&mut pretty_b).unwrap();
    assert_eq!(pretty_a, pretty_b);
}
