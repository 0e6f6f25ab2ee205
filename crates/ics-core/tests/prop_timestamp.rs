//! Property-based tests for timestamp bounds using proptest.
//!
//! These check invariants that hold for any list of well-formed entries, not
//! just the fixed examples in `timestamp_tests.rs`.

use ics_core::TimestampSet;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_timezone() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("UTC".to_string()),
        Just("Europe/Zurich".to_string()),
        Just("Europe/Paris".to_string()),
        Just("America/Caracas".to_string()),
        Just("America/Los_Angeles".to_string()),
        Just("Asia/Tokyo".to_string()),
    ]
}

/// A civil date-time in 1970-2030. Day is capped at 28 to avoid invalid
/// month/day combos.
fn arb_civil() -> impl Strategy<Value = String> {
    (1970u32..=2030, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59, 0u32..=59).prop_map(
        |(y, mo, d, h, mi, s)| format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, mo, d, h, mi, s),
    )
}

fn arb_entry() -> impl Strategy<Value = String> {
    (arb_civil(), arb_timezone()).prop_map(|(civil, tz)| format!("{} {}", civil, tz))
}

/// Entries sharing one zone, plus a shuffled copy.
fn arb_same_zone_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (prop::collection::vec(arb_civil(), 1..20), arb_timezone()).prop_flat_map(|(civils, tz)| {
        let entries: Vec<String> = civils
            .into_iter()
            .map(|civil| format!("{} {}", civil, tz))
            .collect();
        (Just(entries.clone()), Just(entries).prop_shuffle())
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: bounds do not depend on input order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn bounds_are_order_insensitive((entries, shuffled) in arb_same_zone_permutation()) {
        let set = TimestampSet::new();
        let (min_a, max_a) = set.min_max(&entries).unwrap();
        let (min_b, max_b) = set.min_max(&shuffled).unwrap();

        prop_assert_eq!(min_a, min_b);
        prop_assert_eq!(max_a, max_b);
        prop_assert_eq!(min_a.to_ics_local(), min_b.to_ics_local());
        prop_assert_eq!(max_a.to_ics_local(), max_b.to_ics_local());
    }
}

// ---------------------------------------------------------------------------
// Property 2: every entry lies within the bounds, and both bounds are entries
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn bounds_enclose_every_entry(entries in prop::collection::vec(arb_entry(), 1..20)) {
        let set = TimestampSet::new();
        let (min, max) = set.min_max(&entries).unwrap();

        prop_assert!(min <= max);
        let parsed: Vec<_> = entries.iter().map(|e| set.parse(e).unwrap()).collect();
        for instant in &parsed {
            prop_assert!(min <= *instant && *instant <= max, "{} outside [{}, {}]", instant, min, max);
        }
        prop_assert!(parsed.iter().any(|p| p.tzid() == min.tzid() && *p == min));
        prop_assert!(parsed.iter().any(|p| p.tzid() == max.tzid() && *p == max));
    }
}

// ---------------------------------------------------------------------------
// Property 3: bounds agree with sorting by UTC instant
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn bounds_match_utc_sort(entries in prop::collection::vec(arb_entry(), 1..20)) {
        let set = TimestampSet::new();
        let (min, max) = set.min_max(&entries).unwrap();

        let mut utc: Vec<_> = entries.iter().map(|e| set.parse(e).unwrap().to_utc()).collect();
        utc.sort();

        prop_assert_eq!(min.to_utc(), utc[0]);
        prop_assert_eq!(max.to_utc(), utc[utc.len() - 1]);
    }
}
