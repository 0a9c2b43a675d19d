//! Wire format constants and length-field helpers.
//!
//! Every SLIM value is framed as:
//! ```text
//! ┌──────────────┬───┬──────────────────────────────────────┐
//! │ Length       │ : │ Payload                              │
//! │ 6 ASCII dig. │   │ raw scalar bytes                     │
//! │ zero-padded  │   │ or [<6-digit count>:<elem>:...:]     │
//! └──────────────┴───┴──────────────────────────────────────┘
//! ```
//!
//! The length counts payload bytes only, never the header itself.

use crate::error::{Result, SlimError};

/// Length field size in bytes (fixed, exactly 6).
pub const LENGTH_FIELD_SIZE: usize = 6;

/// Largest length representable in the length field.
pub const MAX_ENCODABLE_LENGTH: usize = 999_999;

/// Separator after every length field and after every list element.
pub const DELIMITER: u8 = b':';

/// Opens a list body.
pub const LIST_OPEN: u8 = b'[';

/// Closes a list body.
pub const LIST_CLOSE: u8 = b']';

/// Prefix marking a scalar as a remote exception.
pub const EXCEPTION_PREFIX: &str = "__EXCEPTION__:";

/// Scalar returned for calls with no return value.
pub const VOID_VALUE: &str = "/__VOID__/";

/// Scalar the client sends to end a session.
pub const BYE: &str = "bye";

/// Append a zero-padded 6-digit length to `out`.
///
/// # Errors
///
/// Returns `EncodingOverflow` if `length` exceeds [`MAX_ENCODABLE_LENGTH`].
///
/// # Example
///
/// ```
/// use slim_client::protocol::push_length;
///
/// let mut out = String::new();
/// push_length(&mut out, 14).unwrap();
/// assert_eq!(out, "000014");
/// ```
pub fn push_length(out: &mut String, length: usize) -> Result<()> {
    if length > MAX_ENCODABLE_LENGTH {
        return Err(SlimError::EncodingOverflow { length });
    }
    out.push_str(&format!("{:06}", length));
    Ok(())
}

/// Decode a 6-digit length field from the start of `buf`.
///
/// Returns `None` if the buffer is too short or a byte is not a decimal digit.
///
/// # Example
///
/// ```
/// use slim_client::protocol::decode_length;
///
/// assert_eq!(decode_length(b"000019:__EXCEPTION__:error"), Some(19));
/// assert_eq!(decode_length(b"00a019"), None);
/// ```
pub fn decode_length(buf: &[u8]) -> Option<usize> {
    let field = buf.get(..LENGTH_FIELD_SIZE)?;
    field.iter().try_fold(0usize, |acc, &b| {
        b.is_ascii_digit()
            .then(|| acc * 10 + usize::from(b - b'0'))
    })
}
