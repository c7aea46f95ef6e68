// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Hosted Zone Resolution

use cim_topology::domain::{ancestor_chain, canonical_domain, resolve};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Domain of 2-4 labels drawn from a small alphabet so that patterns
/// frequently share ancestors
fn domain() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(vec!["a", "b", "x", "api", "www"]), 1..4),
        prop::sample::select(vec!["com", "org"]),
    )
        .prop_map(|(labels, tld)| format!("{}.{}", labels.join("."), tld))
}

/// Domain pattern, wildcarded about a third of the time
fn pattern() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => domain(),
        1 => domain().prop_map(|d| format!("*.{d}")),
    ]
}

fn patterns() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(pattern(), 0..20)
}

fn plain_domains() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(domain(), 0..20)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Every input pattern is assigned to a registered zone
    #[test]
    fn prop_assignment_is_total(input in patterns()) {
        let resolution = resolve(&input);

        for pattern in &input {
            let zone = resolution.zone_for(pattern);
            prop_assert!(zone.is_some(), "{} has no zone", pattern);
            prop_assert!(resolution.zones.contains(zone.unwrap_or_default()));
        }

        let distinct: BTreeSet<&String> = input.iter().collect();
        prop_assert_eq!(resolution.assignments.len(), distinct.len());
    }

    /// Property: A pattern is served by its own domain or an ancestor
    #[test]
    fn prop_zone_is_self_or_ancestor(input in patterns()) {
        let resolution = resolve(&input);

        for (pattern, zone) in &resolution.assignments {
            let canonical = canonical_domain(pattern);
            prop_assert!(
                ancestor_chain(canonical).contains(&zone.as_str()),
                "{} assigned to unrelated zone {}", pattern, zone
            );
        }
    }

    /// Property: Zones are canonical domains that appeared in the input
    #[test]
    fn prop_zones_come_from_input(input in patterns()) {
        let resolution = resolve(&input);
        let canonical: BTreeSet<&str> = input.iter().map(|p| canonical_domain(p)).collect();

        for zone in &resolution.zones {
            prop_assert!(canonical.contains(zone.as_str()));
        }
    }

    /// Property: Every zone serves at least the pattern that registered it
    #[test]
    fn prop_no_idle_zones(input in patterns()) {
        let resolution = resolve(&input);
        for zone in &resolution.zones {
            prop_assert!(resolution.patterns_in(zone).next().is_some());
        }
    }

    /// Property: Resolution is deterministic
    #[test]
    fn prop_resolution_is_deterministic(input in patterns()) {
        prop_assert_eq!(resolve(&input), resolve(&input));
    }

    /// Property: Repeating patterns does not change the result
    #[test]
    fn prop_duplicates_are_ignored(input in patterns()) {
        let doubled: Vec<&String> = input.iter().chain(input.iter()).collect();
        prop_assert_eq!(resolve(doubled), resolve(&input));
    }

    /// Property: Without wildcards the zone set ignores input order
    ///
    /// Same dot count means same depth, so no tie can be an ancestor of
    /// another. Wildcards break this, see the unit tests.
    #[test]
    fn prop_plain_zone_set_is_order_independent(
        (input, shuffled) in plain_domains().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(resolve(&input).zones, resolve(&shuffled).zones);
    }
}
