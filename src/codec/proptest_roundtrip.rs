//! Property-based tests for the encode/decode round trip.
//!
//! Scalars never start with `[`: the decoder always reads such a body as a
//! list, which the wire format cannot distinguish from a scalar.

use proptest::prelude::*;

use super::{decode_answer, decode_nested_value, encode};
use crate::protocol::{Answer, NestedValue};

/// Strategy for scalar text, including multi-byte characters and delimiters.
fn scalar_text() -> impl Strategy<Value = String> {
    "([a-zA-Z0-9 ._:/é€-][a-zA-Z0-9 ._:/é€\\[\\]-]{0,15})?"
}

/// Strategy for nested values up to a few levels deep.
fn nested_value() -> impl Strategy<Value = NestedValue> {
    let leaf = scalar_text().prop_map(NestedValue::Scalar);
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(NestedValue::List)
    })
}

proptest! {
    /// Property: decoding an encoded value yields the value.
    #[test]
    fn prop_round_trip(value in nested_value()) {
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(decode_nested_value(&encoded).unwrap(), value);
    }

    /// Property: the outer length field equals the payload byte length.
    #[test]
    fn prop_outer_length_matches_payload(value in nested_value()) {
        let encoded = encode(&value).unwrap();
        let declared: usize = encoded[..6].parse().unwrap();
        prop_assert_eq!(declared, encoded.len() - 7);
    }

    /// Property: non-exception scalars decode as `Ok` answers unchanged.
    #[test]
    fn prop_plain_scalar_answer(text in scalar_text()) {
        prop_assume!(!text.starts_with("__EXCEPTION__:"));
        let encoded = encode(text.as_str()).unwrap();
        prop_assert_eq!(
            decode_answer(&encoded).unwrap(),
            Answer::Ok(NestedValue::Scalar(text))
        );
    }

    /// Property: arbitrary bytes never panic the decoder.
    #[test]
    fn prop_decoder_total_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode_nested_value(&bytes);
    }

    /// Property: truncating a valid encoding is always an error.
    #[test]
    fn prop_truncation_is_error(value in nested_value(), cut in 0usize..1000) {
        let encoded = encode(&value).unwrap();
        let cut = cut % encoded.len();
        prop_assert!(decode_nested_value(&encoded.as_bytes()[..cut]).is_err());
    }
}
