//! Property-based tests for timeout parsing and address splitting.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use mailship_harness::domain::mail::mailbox_path;
use mailship_harness::domain::{PollError, Timeout};

proptest! {
    /// Every non-negative integer round-trips through string parsing.
    #[test]
    fn prop_valid_timeouts_roundtrip(secs in 0u64..=604_800) {
        let parsed: Timeout = secs.to_string().parse().expect("valid timeout");
        prop_assert_eq!(parsed.as_secs(), secs);
    }

    /// Inputs with no digits are always rejected as invalid timeouts.
    #[test]
    fn prop_non_numeric_timeouts_rejected(input in "[a-zA-Z ._@-]{1,12}") {
        let err = input.parse::<Timeout>().expect_err("expected Err");
        prop_assert!(matches!(err, PollError::InvalidTimeout { .. }), "expected InvalidTimeout");
    }

    /// Negative numbers are always rejected.
    #[test]
    fn prop_negative_timeouts_rejected(secs in 1i64..=1_000_000) {
        prop_assert!(format!("-{secs}").parse::<Timeout>().is_err(), "negative rejected");
    }

    /// Well-formed addresses derive a path under the mail volume root.
    #[test]
    fn prop_mailbox_path_well_formed(
        local in "[a-z0-9.]{1,16}",
        domain in "[a-z0-9.]{1,16}",
    ) {
        let path = mailbox_path(&format!("{local}@{domain}")).expect("valid address");
        prop_assert_eq!(path, format!("/var/mail/{domain}/{local}"));
    }

    /// Addresses without an '@' are always rejected.
    #[test]
    fn prop_address_without_at_rejected(input in "[a-z0-9.]{1,24}") {
        prop_assert!(mailbox_path(&input).is_err());
    }
}
