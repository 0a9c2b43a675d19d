//! Response buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for buffer management.
//! Implements a state machine for handling fragmented responses:
//! - `WaitingForHeader`: Need at least 6 bytes (the length field)
//! - `WaitingForBody`: Length parsed, need `length + 1` more bytes
//!   (the `:` delimiter plus the payload)
//!
//! An extracted response still carries its length field, so it can be fed
//! straight to the decoder.
//!
//! # Example
//!
//! ```
//! use slim_client::protocol::ResponseBuffer;
//!
//! let mut buffer = ResponseBuffer::new();
//!
//! assert!(buffer.push(b"000002").unwrap().is_none());
//! let response = buffer.push(b":OK").unwrap().unwrap();
//! assert_eq!(&response[..], b"000002:OK");
//! ```

use bytes::{Bytes, BytesMut};

use super::wire_format::{decode_length, LENGTH_FIELD_SIZE, MAX_ENCODABLE_LENGTH};
use crate::error::{ParseFailure, Result, SlimError};

/// State machine for response extraction.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Waiting for the 6-byte length field.
    WaitingForHeader,
    /// Length parsed, waiting for the delimiter and payload.
    WaitingForBody { length: usize },
}

/// Buffer for accumulating incoming bytes and extracting complete responses.
///
/// Bytes past the end of one response stay buffered for the next.
pub struct ResponseBuffer {
    /// Accumulated bytes from socket reads.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
    /// Maximum allowed declared length.
    max_response_size: usize,
}

impl ResponseBuffer {
    /// Create a new response buffer with default settings.
    ///
    /// Default capacity: 64KB, max response: 999999 bytes.
    pub fn new() -> Self {
        Self::with_capacity_and_max_response(64 * 1024, MAX_ENCODABLE_LENGTH)
    }

    /// Create a new response buffer with a custom max response size.
    pub fn with_max_response(max_response_size: usize) -> Self {
        Self::with_capacity_and_max_response(64 * 1024, max_response_size)
    }

    /// Create a new response buffer with custom capacity and max response size.
    pub fn with_capacity_and_max_response(capacity: usize, max_response_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            state: State::WaitingForHeader,
            max_response_size,
        }
    }

    /// Push data into the buffer and extract the next complete response.
    ///
    /// Returns `Ok(None)` while more data is needed. At most one response is
    /// returned per call; call [`next_response`](Self::next_response) to drain
    /// any further responses already buffered.
    ///
    /// # Errors
    ///
    /// - `Parse(BadLength)` if the length field is not 6 digits.
    /// - `Protocol` if the declared length exceeds `max_response_size`.
    pub fn push(&mut self, data: &[u8]) -> Result<Option<Bytes>> {
        self.buffer.extend_from_slice(data);
        self.next_response()
    }

    /// Extract the next complete response from already-buffered bytes.
    pub fn next_response(&mut self) -> Result<Option<Bytes>> {
        loop {
            match self.state {
                State::WaitingForHeader => {
                    if self.buffer.len() < LENGTH_FIELD_SIZE {
                        return Ok(None);
                    }

                    // Peek only; the length field stays in the response.
                    let length = decode_length(&self.buffer)
                        .ok_or(SlimError::Parse(ParseFailure::BadLength { offset: 0 }))?;

                    if length > self.max_response_size {
                        return Err(SlimError::Protocol(format!(
                            "Response size {} exceeds maximum {}",
                            length, self.max_response_size
                        )));
                    }

                    self.state = State::WaitingForBody { length };
                }

                State::WaitingForBody { length } => {
                    let total = LENGTH_FIELD_SIZE + 1 + length;
                    if self.buffer.len() < total {
                        return Ok(None);
                    }

                    let response = self.buffer.split_to(total).freeze();
                    self.state = State::WaitingForHeader;
                    return Ok(Some(response));
                }
            }
        }
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForHeader => "WaitingForHeader",
            State::WaitingForBody { .. } => "WaitingForBody",
        }
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}
