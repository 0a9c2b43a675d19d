//! The universal SLIM data shape: a string or an ordered list of values.
//!
//! # Example
//!
//! ```
//! use slim_client::protocol::NestedValue;
//!
//! let value = NestedValue::list(["1", "OK"]);
//! assert_eq!(value.as_list().map(|items| items.len()), Some(2));
//! assert_eq!(value.as_list().unwrap()[1].as_scalar(), Some("OK"));
//! ```

use serde::{Deserialize, Serialize};

use super::wire_format::VOID_VALUE;

/// A decoded or to-be-encoded SLIM value.
///
/// Serializes untagged (a JSON string or array), which makes responses easy
/// to dump when debugging a fixture server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedValue {
    /// Opaque string payload.
    Scalar(String),
    /// Ordered sequence of values; may be empty.
    List(Vec<NestedValue>),
}

impl NestedValue {
    /// Create a scalar.
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// Create a list from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NestedValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Scalar content, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// List items, if this is a list.
    pub fn as_list(&self) -> Option<&[NestedValue]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Consume into list items, if this is a list.
    pub fn into_list(self) -> Option<Vec<NestedValue>> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Whether this is the `/__VOID__/` scalar.
    pub fn is_void(&self) -> bool {
        self.as_scalar() == Some(VOID_VALUE)
    }
}

impl From<&str> for NestedValue {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_string())
    }
}

impl From<String> for NestedValue {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<Vec<NestedValue>> for NestedValue {
    fn from(items: Vec<NestedValue>) -> Self {
        Self::List(items)
    }
}
