//! Property-based tests for OID ordering and triple set traversal.

use std::cmp::Ordering;

use pass_persist::{OidKey, Triple, TripleSetBuilder, ValueType};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_arcs() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 1..=12)
}

/// Arcs drawn from a small range so sets share prefixes and siblings.
fn arb_dense_arcs() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..12, 1..=6)
}

fn dotted(arcs: &[u32]) -> String {
    arcs.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

// =============================================================================
// OidKey ordering
// =============================================================================

proptest! {
    #[test]
    fn prop_order_matches_arc_comparison(a in arb_arcs(), b in arb_arcs()) {
        let ka = OidKey::new(dotted(&a));
        let kb = OidKey::new(dotted(&b));
        // Vec<u32> orders arc by arc, shorter prefix first
        prop_assert_eq!(ka.cmp(&kb), a.cmp(&b));
    }

    #[test]
    fn prop_order_is_antisymmetric(a in arb_arcs(), b in arb_arcs()) {
        let ka = OidKey::new(dotted(&a));
        let kb = OidKey::new(dotted(&b));
        prop_assert_eq!(ka.cmp(&kb), kb.cmp(&ka).reverse());
        prop_assert_eq!(ka.cmp(&kb) == Ordering::Equal, ka == kb);
    }

    #[test]
    fn prop_starts_with_matches_arc_prefix(a in arb_dense_arcs(), b in arb_dense_arcs()) {
        let ka = OidKey::new(dotted(&a));
        let kb = OidKey::new(dotted(&b));
        prop_assert_eq!(ka.starts_with(&kb), a.starts_with(&b));
    }
}

// =============================================================================
// TripleSet traversal
// =============================================================================

proptest! {
    #[test]
    fn prop_getnext_walk_visits_all_in_order(oids in prop::collection::vec(arb_dense_arcs(), 0..40)) {
        let mut builder = TripleSetBuilder::new();
        for arcs in &oids {
            builder.push(Triple::typed(dotted(arcs), ValueType::Integer, 0)).unwrap();
        }
        let set = builder.finalize();

        let mut expected = oids.clone();
        expected.sort();
        expected.dedup();

        let mut walked = Vec::new();
        let mut cursor = OidKey::new("");
        while let Some(t) = set.get_next(&cursor) {
            prop_assert!(t.oid() > &cursor);
            walked.push(t.oid().as_str().to_string());
            cursor = t.oid().clone();
        }

        let expected: Vec<String> = expected.iter().map(|a| dotted(a)).collect();
        prop_assert_eq!(walked, expected);
    }

    #[test]
    fn prop_get_finds_exactly_members(
        oids in prop::collection::vec(arb_dense_arcs(), 0..30),
        probe in arb_dense_arcs(),
    ) {
        let mut builder = TripleSetBuilder::new();
        for arcs in &oids {
            builder.push(Triple::typed(dotted(arcs), ValueType::Integer, 0)).unwrap();
        }
        let set = builder.finalize();

        let key = OidKey::new(dotted(&probe));
        match set.get(&key) {
            Some(t) => prop_assert_eq!(t.oid(), &key),
            None => prop_assert!(!oids.contains(&probe)),
        }
        if oids.contains(&probe) {
            prop_assert!(set.get(&key).is_some());
        }
    }
}
