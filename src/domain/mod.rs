// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Domain Models
//!
//! Pure, plan-time computations over address blocks and DNS names. Nothing
//! here performs I/O or keeps state between calls; inputs and outputs are
//! plain, fully resolved values.
//!
//! # Value Objects with Invariants
//!
//! - [`CidrBlock`] - IPv4/IPv6 network block in CIDR notation
//! - [`DomainPattern`] - DNS-validated domain, optionally wildcarded
//!
//! # Algorithms
//!
//! - [`allocate`] / [`CidrBlock::subnet`] - deterministic sub-block carving
//! - [`resolve`] - minimal hosted zone set for a list of domain patterns

pub mod domain_pattern;
pub mod hosted_zone;
pub mod network;

pub use domain_pattern::{
    ancestor_chain, canonical_domain, dot_count, DomainPattern, DomainPatternError,
    WILDCARD_PREFIX,
};
pub use hosted_zone::{resolve, ZoneResolution};
pub use network::{allocate, CidrBlock, NetworkError};
