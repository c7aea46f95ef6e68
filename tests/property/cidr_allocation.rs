// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for CIDR Sub-block Allocation

use cim_topology::domain::{CidrBlock, NetworkError};
use proptest::prelude::*;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// ============================================================================
// Helpers
// ============================================================================

fn bits(block: &CidrBlock) -> u128 {
    match block.address() {
        IpAddr::V4(addr) => u128::from(u32::from(addr)),
        IpAddr::V6(addr) => u128::from(addr),
    }
}

fn mask(len: u32) -> u128 {
    if len >= 128 {
        u128::MAX
    } else {
        (1u128 << len) - 1
    }
}

/// Extract `len` bits starting `offset` bits from the MSB of a `width`-bit value
fn window(value: u128, width: u32, offset: u32, len: u32) -> u128 {
    if len == 0 {
        return 0;
    }
    (value >> (width - offset - len)) & mask(len)
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Parent block plus a valid (newbits, index) pair
fn ipv4_allocation() -> impl Strategy<Value = (CidrBlock, u8, u128)> {
    (any::<u32>(), 0u8..=32)
        .prop_flat_map(|(addr, prefix)| {
            let block = CidrBlock::from_parts(IpAddr::V4(Ipv4Addr::from(addr)), prefix)
                .expect("prefix within width");
            (Just(block), 0u8..=(32 - prefix))
        })
        .prop_flat_map(|(block, newbits)| {
            (Just(block), Just(newbits), 0u128..=mask(u32::from(newbits)))
        })
}

fn ipv6_allocation() -> impl Strategy<Value = (CidrBlock, u8, u128)> {
    (any::<u128>(), 0u8..=128)
        .prop_flat_map(|(addr, prefix)| {
            let block = CidrBlock::from_parts(IpAddr::V6(Ipv6Addr::from(addr)), prefix)
                .expect("prefix within width");
            (Just(block), 0u8..=(128 - prefix))
        })
        .prop_flat_map(|(block, newbits)| {
            (Just(block), Just(newbits), 0u128..=mask(u32::from(newbits)))
        })
}

fn any_allocation() -> impl Strategy<Value = (CidrBlock, u8, u128)> {
    prop_oneof![ipv4_allocation(), ipv6_allocation()]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Result prefix length is parent prefix length plus newbits
    #[test]
    fn prop_prefix_length_extends((parent, newbits, index) in any_allocation()) {
        let child = parent.subnet(newbits, index).unwrap();
        prop_assert_eq!(child.prefix_length(), parent.prefix_length() + newbits);
        prop_assert_eq!(child.is_ipv4(), parent.is_ipv4());
    }

    /// Property: Only the target window changes
    ///
    /// Parent network bits and the bits after the window are untouched; the
    /// window holds the index.
    #[test]
    fn prop_splice_touches_only_window((parent, newbits, index) in any_allocation()) {
        let child = parent.subnet(newbits, index).unwrap();
        let width = u32::from(parent.width());
        let prefix = u32::from(parent.prefix_length());
        let newbits = u32::from(newbits);
        let tail = width - prefix - newbits;

        prop_assert_eq!(window(bits(&child), width, 0, prefix), window(bits(&parent), width, 0, prefix));
        prop_assert_eq!(window(bits(&child), width, prefix, newbits), index);
        prop_assert_eq!(
            window(bits(&child), width, prefix + newbits, tail),
            window(bits(&parent), width, prefix + newbits, tail)
        );
    }

    /// Property: Sibling indexes give distinct blocks
    #[test]
    fn prop_siblings_are_distinct(
        (parent, newbits, first) in any_allocation().prop_filter("need siblings", |(_, n, _)| *n > 0),
        offset in 1u128..1024,
    ) {
        let second = first.wrapping_add(offset) & mask(u32::from(newbits));
        prop_assume!(second != first);

        let a = parent.subnet(newbits, first).unwrap();
        let b = parent.subnet(newbits, second).unwrap();
        prop_assert_ne!(a, b);
    }

    /// Property: Allocation is deterministic and round-trips through text
    #[test]
    fn prop_allocation_is_deterministic((parent, newbits, index) in any_allocation()) {
        let first = cim_topology::allocate(&parent.to_string(), newbits, index).unwrap();
        let second = cim_topology::allocate(&parent.to_string(), newbits, index).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(CidrBlock::new(&first).unwrap(), parent.subnet(newbits, index).unwrap());
    }

    /// Property: An index that does not fit the window is rejected
    #[test]
    fn prop_oversized_index_rejected(
        (parent, newbits, _) in ipv4_allocation(),
        excess in 0u128..1024,
    ) {
        let index = (1u128 << newbits) + excess;
        let result = parent.subnet(newbits, index);
        let is_allocation_error = matches!(result, Err(NetworkError::Allocation { .. }));
        prop_assert!(is_allocation_error);
    }

    /// Property: Extending past the address width is rejected
    #[test]
    fn prop_width_overflow_rejected(prefix in 0u8..=32, extra in 1u8..=16) {
        let parent = CidrBlock::from_parts(IpAddr::V4(Ipv4Addr::UNSPECIFIED), prefix).unwrap();
        let newbits = 32 - prefix + extra;
        let result = parent.subnet(newbits, 0);
        let is_allocation_error = matches!(result, Err(NetworkError::Allocation { .. }));
        prop_assert!(is_allocation_error);
    }
}
