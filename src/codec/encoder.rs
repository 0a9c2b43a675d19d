//! SLIM encoder.
//!
//! A scalar `s` becomes `<len(s)>:<s>`. A list becomes the scalar encoding
//! of its bracketed body `[<count>:<e1>:<e2>:...:]`, so every list carries
//! two length fields: the outer byte length and the inner element count.
//!
//! Lengths are byte counts. Anything longer than 999999 bytes is rejected
//! with `EncodingOverflow` before a single byte is produced.

use crate::error::Result;
use crate::protocol::{push_length, Instruction, NestedValue, DELIMITER, LIST_CLOSE, LIST_OPEN};

/// A protocol entity with a SLIM wire encoding.
pub trait Encodable {
    /// Append the wire encoding of `self` to `out`.
    ///
    /// On error `out` may hold a partial encoding and must be discarded.
    fn encode_into(&self, out: &mut String) -> Result<()>;

    /// Encode `self` into a fresh string.
    fn encode(&self) -> Result<String> {
        let mut out = String::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

/// Encode any encodable value.
///
/// # Example
///
/// ```
/// use slim_client::codec::encode;
/// use slim_client::protocol::NestedValue;
///
/// assert_eq!(encode(&NestedValue::scalar("some.clas.path")).unwrap(), "000014:some.clas.path");
/// assert_eq!(encode(&NestedValue::List(vec![])).unwrap(), "000009:[000000:]");
/// ```
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Result<String> {
    value.encode()
}

/// Encode an ordered sequence as a SLIM list.
pub fn encode_sequence<T: Encodable>(items: &[T]) -> Result<String> {
    let mut out = String::new();
    encode_list_into(items.iter().map(|item| item as &dyn Encodable), &mut out)?;
    Ok(out)
}

fn encode_scalar_into(text: &str, out: &mut String) -> Result<()> {
    push_length(out, text.len())?;
    out.push(char::from(DELIMITER));
    out.push_str(text);
    Ok(())
}

fn encode_list_into<'a, I>(items: I, out: &mut String) -> Result<()>
where
    I: ExactSizeIterator<Item = &'a dyn Encodable>,
{
    let mut body = String::new();
    body.push(char::from(LIST_OPEN));
    push_length(&mut body, items.len())?;
    body.push(char::from(DELIMITER));
    for item in items {
        item.encode_into(&mut body)?;
        body.push(char::from(DELIMITER));
    }
    body.push(char::from(LIST_CLOSE));
    encode_scalar_into(&body, out)
}

impl Encodable for str {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        encode_scalar_into(self, out)
    }
}

impl Encodable for String {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        encode_scalar_into(self, out)
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        (**self).encode_into(out)
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        encode_list_into(self.iter().map(|item| item as &dyn Encodable), out)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        self.as_slice().encode_into(out)
    }
}

impl Encodable for NestedValue {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        match self {
            NestedValue::Scalar(text) => encode_scalar_into(text, out),
            NestedValue::List(items) => items.encode_into(out),
        }
    }
}

impl Encodable for Instruction {
    fn encode_into(&self, out: &mut String) -> Result<()> {
        self.wire_elements().encode_into(out)
    }
}
