//! Property-based tests for the address/CIDR engine

use proptest::prelude::*;
use talospec_core::{format_ipv4, parse_ipv4, Cidr};

proptest! {
    #[test]
    fn prop_ipv4_round_trips(value: u32) {
        let text = format_ipv4(value);
        prop_assert_eq!(parse_ipv4(&text).unwrap(), value);
    }

    #[test]
    fn prop_containment_matches_range_arithmetic(address: u32, prefix in 0u8..=32) {
        let cidr = Cidr::parse(&format!("{}/{}", format_ipv4(address), prefix)).unwrap();

        let start = u64::from(cidr.network());
        let size = 1u64 << (32 - prefix);

        // The written address is always inside its own range.
        prop_assert!(cidr.contains(address));

        // Exact bounds: first and last address are inside, the immediate
        // neighbours outside (when they exist in the address space).
        prop_assert!(cidr.contains(start as u32));
        prop_assert!(cidr.contains((start + size - 1) as u32));
        if start > 0 {
            prop_assert!(!cidr.contains((start - 1) as u32));
        }
        if start + size <= u64::from(u32::MAX) {
            prop_assert!(!cidr.contains((start + size) as u32));
        }
    }

    #[test]
    fn prop_network_base_is_canonical(address: u32, prefix in 0u8..=32) {
        let cidr = Cidr::parse(&format!("{}/{}", format_ipv4(address), prefix)).unwrap();
        let rebased = Cidr::parse(&cidr.to_string()).unwrap();
        prop_assert_eq!(cidr, rebased);
    }

    #[test]
    fn prop_prefix_zero_contains_everything(address: u32) {
        let cidr = Cidr::parse("0.0.0.0/0").unwrap();
        prop_assert!(cidr.contains(address));
    }

    #[test]
    fn prop_garbage_never_parses_as_ipv4(text in "[a-z!@# ]{1,12}") {
        prop_assert!(parse_ipv4(&text).is_err());
    }
}
