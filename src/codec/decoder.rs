//! SLIM decoder.
//!
//! Single-pass recursive descent over the input bytes:
//!
//! ```text
//! value  := length ':' ( list | scalar )
//! list   := '[' length ':' ( value ':' )* ']'      element count = length
//! scalar := <exactly `length` bytes>
//! ```
//!
//! A body starting with `[` is always a list; there is no backtracking, so a
//! scalar whose content starts with `[` cannot be told apart from a broken
//! list and fails with `MalformedList`.
//!
//! # Example
//!
//! ```
//! use slim_client::codec::{decode_answer, decode_nested_value};
//! use slim_client::protocol::{Answer, NestedValue};
//!
//! let value = decode_nested_value("000009:[000000:]").unwrap();
//! assert_eq!(value, NestedValue::List(vec![]));
//!
//! let answer = decode_answer("000019:__EXCEPTION__:error").unwrap();
//! assert_eq!(answer, Answer::Exception("error".to_string()));
//! ```

use crate::error::ParseFailure;
use crate::protocol::{
    decode_length, Answer, NestedValue, DELIMITER, LENGTH_FIELD_SIZE, LIST_CLOSE, LIST_OPEN,
};

/// Default nesting guard.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum list nesting. The top-level list is depth 0.
    pub max_depth: usize,
    /// Check that each list consumes exactly its declared length and that
    /// nothing follows the top-level value.
    pub verify_lengths: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            verify_lengths: true,
        }
    }
}

/// Decode one value with default options.
pub fn decode_nested_value(input: impl AsRef<[u8]>) -> Result<NestedValue, ParseFailure> {
    decode_nested_value_with(input, &DecodeOptions::default())
}

/// Decode one value.
pub fn decode_nested_value_with(
    input: impl AsRef<[u8]>,
    options: &DecodeOptions,
) -> Result<NestedValue, ParseFailure> {
    let input = input.as_ref();
    let mut parser = Parser {
        input,
        pos: 0,
        options,
    };
    let value = parser.value(0)?;
    if options.verify_lengths && parser.pos != input.len() {
        return Err(ParseFailure::TrailingData { offset: parser.pos });
    }
    Ok(value)
}

/// Decode one value and classify it as an answer, with default options.
pub fn decode_answer(input: impl AsRef<[u8]>) -> Result<Answer, ParseFailure> {
    decode_nested_value(input).map(Answer::classify)
}

/// Decode one value and classify it as an answer.
pub fn decode_answer_with(
    input: impl AsRef<[u8]>,
    options: &DecodeOptions,
) -> Result<Answer, ParseFailure> {
    decode_nested_value_with(input, options).map(Answer::classify)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    options: &'a DecodeOptions,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn length(&mut self) -> Result<usize, ParseFailure> {
        let length = decode_length(&self.input[self.pos..])
            .ok_or(ParseFailure::BadLength { offset: self.pos })?;
        self.pos += LENGTH_FIELD_SIZE;
        Ok(length)
    }

    fn delimiter(&mut self) -> Result<(), ParseFailure> {
        if self.peek() != Some(DELIMITER) {
            return Err(ParseFailure::MalformedDelimiter { offset: self.pos });
        }
        self.pos += 1;
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<NestedValue, ParseFailure> {
        let length = self.length()?;
        self.delimiter()?;

        if self.peek() == Some(LIST_OPEN) {
            self.list(length, depth)
        } else {
            self.scalar(length)
        }
    }

    fn scalar(&mut self, length: usize) -> Result<NestedValue, ParseFailure> {
        let start = self.pos;
        let bytes = self
            .input
            .get(start..start + length)
            .ok_or(ParseFailure::Truncated {
                offset: start,
                needed: length,
                available: self.remaining(),
            })?;
        let text =
            std::str::from_utf8(bytes).map_err(|_| ParseFailure::InvalidUtf8 { offset: start })?;
        self.pos += length;
        Ok(NestedValue::Scalar(text.to_string()))
    }

    fn list(&mut self, declared: usize, depth: usize) -> Result<NestedValue, ParseFailure> {
        if depth >= self.options.max_depth {
            return Err(ParseFailure::TooDeep {
                max_depth: self.options.max_depth,
            });
        }

        let start = self.pos;
        self.pos += 1; // '['

        let count = self.length().map_err(|_| ParseFailure::MalformedList {
            offset: self.pos,
            reason: "bad element count",
        })?;
        self.delimiter().map_err(|_| ParseFailure::MalformedList {
            offset: self.pos,
            reason: "expected ':' after element count",
        })?;

        // Every element needs at least 8 bytes, so don't trust `count` for capacity.
        let mut items = Vec::with_capacity(count.min(self.remaining() / 8));
        for _ in 0..count {
            let element_start = self.pos;
            let item = self.value(depth + 1).map_err(|err| match err {
                ParseFailure::BadLength { .. }
                | ParseFailure::MalformedDelimiter { .. }
                | ParseFailure::Truncated { .. } => ParseFailure::MalformedList {
                    offset: element_start,
                    reason: "bad element",
                },
                other => other,
            })?;
            items.push(item);
            self.delimiter().map_err(|_| ParseFailure::MalformedList {
                offset: self.pos,
                reason: "expected ':' after element",
            })?;
        }

        if self.peek() != Some(LIST_CLOSE) {
            return Err(ParseFailure::MalformedList {
                offset: self.pos,
                reason: "expected ']'",
            });
        }
        self.pos += 1;

        let actual = self.pos - start;
        if self.options.verify_lengths && actual != declared {
            return Err(ParseFailure::LengthMismatch {
                offset: start,
                declared,
                actual,
            });
        }

        Ok(NestedValue::List(items))
    }
}
