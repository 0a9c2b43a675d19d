//! Codec module - SLIM wire encoding and decoding.
//!
//! This module converts protocol entities to and from the wire format:
//!
//! - [`Encodable`] / [`encode`] - strings, [`NestedValue`]s, sequences and
//!   [`Instruction`]s to length-prefixed text
//! - [`decode_nested_value`] / [`decode_answer`] - recursive-descent parser
//!   back to values and answers
//!
//! Both directions are pure: no I/O, no logging, no shared state.
//!
//! # Example
//!
//! ```
//! use slim_client::codec::{decode_nested_value, encode};
//! use slim_client::protocol::NestedValue;
//!
//! let value = NestedValue::list(["else", "other"]);
//! let encoded = encode(&value).unwrap();
//! assert_eq!(encoded, "000034:[000002:000004:else:000005:other:]");
//! assert_eq!(decode_nested_value(&encoded).unwrap(), value);
//! ```
//!
//! [`NestedValue`]: crate::protocol::NestedValue
//! [`Instruction`]: crate::protocol::Instruction

mod decoder;
mod encoder;

#[cfg(test)]
mod proptest_roundtrip;

pub use decoder::{
    decode_answer, decode_answer_with, decode_nested_value, decode_nested_value_with,
    DecodeOptions, DEFAULT_MAX_DEPTH,
};
pub use encoder::{encode, encode_sequence, Encodable};
