//! # Validation Engine
//!
//! Cross-entity checks applied to a pass document. All checks are pure:
//! they inspect their inputs and either succeed without side effects or
//! return the matching `PassError`.
//!
//! | Check | Error | Applied |
//! |-------|-------|---------|
//! | Field key uniqueness across all sections | `DuplicateKey` | every field insertion |
//! | Relevancy interval at most 24 hours | `IntervalTooLong` | relevant-date construction, insertion, and emission |
//! | `#`-prefixed colors are 3 or 6+ hex digits | `InvalidColorFormat` | appearance-key emission |

use std::collections::HashMap;

use chrono::Duration;

use pkpass_core::{PassDate, PassError};

pub use pkpass_core::normalize_color;

/// Longest span a relevancy interval may cover. Exactly this long is allowed.
pub fn max_relevancy_span() -> Duration {
    Duration::hours(24)
}

/// Fail if `key` is already present in the field index.
pub fn ensure_unique_key<V>(index: &HashMap<String, V>, key: &str) -> Result<(), PassError> {
    if index.contains_key(key) {
        tracing::debug!(key, "rejecting duplicate field key");
        return Err(PassError::DuplicateKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Fail if `end - start` is longer than [`max_relevancy_span`].
///
/// A missing end never fails. An end before the start is not rejected; the
/// format only bounds the span from above.
pub fn check_interval(start: &PassDate, end: Option<&PassDate>) -> Result<(), PassError> {
    let Some(end) = end else {
        return Ok(());
    };
    if end.since(start) > max_relevancy_span() {
        tracing::debug!(%start, %end, "rejecting relevancy interval longer than 24 hours");
        return Err(PassError::IntervalTooLong {
            start: start.to_wire(),
            end: end.to_wire(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(s: &str) -> PassDate {
        PassDate::parse(s).unwrap()
    }

    #[test]
    fn unique_key_accepts_new_and_rejects_existing() {
        let mut index = HashMap::new();
        index.insert("gate".to_string(), ());
        assert!(ensure_unique_key(&index, "seat").is_ok());
        assert!(matches!(
            ensure_unique_key(&index, "gate"),
            Err(PassError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut index = HashMap::new();
        index.insert("Gate".to_string(), ());
        assert!(ensure_unique_key(&index, "gate").is_ok());
    }

    #[test]
    fn exactly_24_hours_allowed() {
        let start = at("2025-10-31T00:00:00+04:00");
        let end = at("2025-11-01T00:00:00+04:00");
        assert!(check_interval(&start, Some(&end)).is_ok());
    }

    #[test]
    fn one_second_over_rejected() {
        let start = at("2025-10-31T00:00:00+04:00");
        let end = at("2025-11-01T00:00:01+04:00");
        match check_interval(&start, Some(&end)) {
            Err(PassError::IntervalTooLong { start, end }) => {
                assert_eq!(start, "2025-10-31T00:00:00+04:00");
                assert_eq!(end, "2025-11-01T00:00:01+04:00");
            }
            other => panic!("expected IntervalTooLong, got {other:?}"),
        }
    }

    #[test]
    fn span_is_measured_between_instants_not_wall_clocks() {
        // 23:00 wall-clock difference, 26 hours elapsed.
        let start = at("2025-10-31T01:00:00+02:00");
        let end = at("2025-11-01T00:00:00-01:00");
        assert!(check_interval(&start, Some(&end)).is_err());
    }

    #[test]
    fn open_ended_and_reversed_intervals_pass() {
        let start = at("2025-10-31T00:00:00Z");
        assert!(check_interval(&start, None).is_ok());
        let earlier = at("2025-10-01T00:00:00Z");
        assert!(check_interval(&start, Some(&earlier)).is_ok());
    }

    proptest! {
        #[test]
        fn boundary_is_inclusive(offset_secs in -86_400i64..=172_800) {
            let start = at("2025-06-01T12:00:00+00:00");
            let end = start.checked_add(Duration::seconds(offset_secs)).unwrap();
            let result = check_interval(&start, Some(&end));
            prop_assert_eq!(result.is_ok(), offset_secs <= 86_400);
        }
    }
}
