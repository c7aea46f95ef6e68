// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosted Zone Resolution
//!
//! Computes the smallest set of DNS hosted zones that can serve a list of
//! domain patterns, and which zone serves each pattern. Hosted zones are
//! billed per zone, so subdomains and wildcards share an ancestor zone
//! whenever one has already been chosen.
//!
//! # Algorithm
//!
//! 1. Deduplicate patterns, keeping first-seen order
//! 2. Stable-sort by the dot count of the raw pattern (`*.` included);
//!    equal counts keep first-seen order
//! 3. For each pattern, walk the ancestor chain of its canonical domain
//!    from the most general suffix; the first suffix that is already a zone
//!    serves the pattern
//! 4. Otherwise the canonical domain becomes a new zone
//!
//! Zones are never removed or merged once registered.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::domain_pattern::{ancestor_chain, canonical_domain, dot_count};

/// Zones chosen for a set of domain patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneResolution {
    /// Canonical domains to materialize as hosted zones
    pub zones: BTreeSet<String>,
    /// Input pattern → zone serving it
    pub assignments: BTreeMap<String, String>,
}

impl ZoneResolution {
    /// Zone assigned to `pattern`, if the pattern was part of the input
    pub fn zone_for(&self, pattern: &str) -> Option<&str> {
        self.assignments.get(pattern).map(String::as_str)
    }

    /// Patterns served by `zone`
    pub fn patterns_in<'a>(&'a self, zone: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.assignments
            .iter()
            .filter(move |(_, z)| z.as_str() == zone)
            .map(|(pattern, _)| pattern.as_str())
    }

    /// True when no zone was registered, i.e. the input was empty
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Resolve the hosted zones for `patterns`
///
/// Every pattern is assigned; a pattern with no registered ancestor
/// registers its own canonical domain. There is no error path.
///
/// Patterns are taken verbatim: no case folding and no validation, use
/// [`DomainPattern`](super::DomainPattern) for that.
///
/// # Examples
///
/// ```rust
/// use cim_topology::domain::resolve;
///
/// let resolution = resolve(["a.com", "x.a.com", "*.b.com"]);
/// assert_eq!(resolution.zone_for("x.a.com"), Some("a.com"));
/// assert_eq!(resolution.zone_for("*.b.com"), Some("b.com"));
/// assert_eq!(resolution.zones.len(), 2);
/// ```
pub fn resolve<I, S>(patterns: I) -> ZoneResolution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ordered: Vec<String> = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if seen.insert(pattern.to_string()) {
            ordered.push(pattern.to_string());
        }
    }

    // sort_by_key is stable: ties keep first-seen order
    ordered.sort_by_key(|pattern| dot_count(pattern));

    let mut resolution = ZoneResolution::default();
    for pattern in ordered {
        let canonical = canonical_domain(&pattern);
        let existing = ancestor_chain(canonical)
            .into_iter()
            .find(|candidate| resolution.zones.contains(*candidate))
            .map(str::to_string);

        let zone = match existing {
            Some(zone) => zone,
            None => {
                resolution.zones.insert(canonical.to_string());
                canonical.to_string()
            }
        };

        resolution.assignments.insert(pattern, zone);
    }

    resolution
}
