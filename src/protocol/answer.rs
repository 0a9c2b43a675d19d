//! Per-instruction results returned by the server.

use super::value::NestedValue;
use super::wire_format::EXCEPTION_PREFIX;

/// The server's result for one instruction.
///
/// A remote exception is data, not a local error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Successful result payload (may be the `/__VOID__/` scalar).
    Ok(NestedValue),
    /// Server-reported failure; the text after `__EXCEPTION__:`.
    Exception(String),
}

impl Answer {
    /// Classify a decoded value.
    ///
    /// A scalar starting with `__EXCEPTION__:` becomes `Exception` carrying
    /// the remainder; anything else is `Ok`.
    ///
    /// # Example
    ///
    /// ```
    /// use slim_client::protocol::{Answer, NestedValue};
    ///
    /// let answer = Answer::classify(NestedValue::scalar("__EXCEPTION__:boom"));
    /// assert_eq!(answer, Answer::Exception("boom".to_string()));
    /// ```
    pub fn classify(value: NestedValue) -> Self {
        match value {
            NestedValue::Scalar(text) => match text.strip_prefix(EXCEPTION_PREFIX) {
                Some(message) => Self::Exception(message.to_string()),
                None => Self::Ok(NestedValue::Scalar(text)),
            },
            list => Self::Ok(list),
        }
    }

    /// Check if this is an exception.
    #[inline]
    pub fn is_exception(&self) -> bool {
        matches!(self, Self::Exception(_))
    }

    /// Check if this is a successful `/__VOID__/` result.
    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Ok(value) if value.is_void())
    }

    /// Exception message, if any.
    pub fn exception_message(&self) -> Option<&str> {
        match self {
            Self::Exception(message) => Some(message),
            Self::Ok(_) => None,
        }
    }

    /// Successful payload, if any.
    pub fn value(&self) -> Option<&NestedValue> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Exception(_) => None,
        }
    }
}
