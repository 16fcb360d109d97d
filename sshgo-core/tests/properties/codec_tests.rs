//! Property-based tests for the record codec
//!
//! - decode(encode(r)) == r for every valid record
//! - encode always yields exactly seven fields

use proptest::prelude::*;
use sshgo_core::models::{ConnectionRecord, Protocol};
use sshgo_core::store::{FIELD_COUNT, Line, decode, encode};

// ============================================================================
// Generators
// ============================================================================

fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop_oneof![Just(Protocol::Ssh), Just(Protocol::Rdp)]
}

/// Names never start with whitespace-only content or `#`
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_. -]{0,19}"
}

/// Any text free of the delimiter and line breaks
fn arb_field() -> impl Strategy<Value = String> {
    "[^|\r\n]{0,24}"
}

prop_compose! {
    fn arb_record()(
        name in arb_name(),
        protocol in arb_protocol(),
        host in "[a-z0-9][a-z0-9.-]{0,30}",
        port in prop::option::of(1u16..=65535),
        username in arb_field(),
        secret in arb_field(),
        extra in arb_field(),
    ) -> ConnectionRecord {
        let mut record = ConnectionRecord::new(name, protocol, host)
            .with_username(username)
            .with_secret(secret)
            .with_extra_params(extra);
        record.port = port;
        record
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_round_trip(record in arb_record()) {
        prop_assert!(record.validate().is_ok());
        let line = encode(&record);
        prop_assert_eq!(decode(&line), Ok(Line::Record(record.clone())));

        let with_newline = format!("{line}\n");
        prop_assert_eq!(decode(&with_newline), Ok(Line::Record(record)));
    }

    #[test]
    fn prop_encode_has_fixed_field_count(record in arb_record()) {
        let line = encode(&record);
        prop_assert_eq!(line.split('|').count(), FIELD_COUNT);
        prop_assert!(!line.contains('\n'));
    }

    #[test]
    fn prop_wrong_field_count_is_rejected(
        fields in prop::collection::vec("[a-z0-9]{1,5}", 2..12usize)
    ) {
        prop_assume!(fields.len() != FIELD_COUNT);
        let line = fields.join("|");
        prop_assert!(decode(&line).is_err());
    }
}
