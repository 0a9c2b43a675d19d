//! Client builder and request/response session.
//!
//! The [`ClientBuilder`] provides a fluent API for configuring the decoder
//! and response limits. The [`Client`] drives one request at a time:
//! 1. Encode the instruction batch (fails before any bytes are written)
//! 2. Write it to the stream
//! 3. Read until one complete length-prefixed response is buffered
//! 4. Decode it and match each instruction to its answer
//!
//! # Example
//!
//! ```ignore
//! use slim_client::{Client, InstructionBatch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::builder().connect("127.0.0.1:8085").await?;
//!
//!     let mut batch = InstructionBatch::new();
//!     batch.import("fitnesse.slim.test");
//!     batch.make("fraction", "Fraction", Vec::<String>::new());
//!     batch.call("fraction", "quotient", Vec::<String>::new());
//!
//!     for (instruction, answer) in client.execute_batch(batch).await? {
//!         println!("{} -> {:?}", instruction.id(), answer);
//!     }
//!
//!     client.bye().await?;
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::ToSocketAddrs;

use crate::codec::{decode_nested_value_with, encode, DecodeOptions, DEFAULT_MAX_DEPTH};
use crate::error::{Result, SlimError};
use crate::protocol::{
    match_instructions_to_answers, Answer, Instruction, InstructionBatch, ResponseBuffer, BYE,
    MAX_ENCODABLE_LENGTH,
};
use crate::transport::{connect, SlimStream};

/// Default read chunk size.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Client settings.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum list nesting accepted in a response.
    pub max_depth: usize,
    /// Reject responses whose declared lengths disagree with their content.
    pub verify_lengths: bool,
    /// Largest declared response length accepted.
    pub max_response_size: usize,
    /// Size of each socket read.
    pub read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            verify_lengths: true,
            max_response_size: MAX_ENCODABLE_LENGTH,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ClientConfig {
    /// Parse a config from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use slim_client::ClientConfig;
    ///
    /// let config = ClientConfig::from_json(r#"{"max_depth": 8}"#).unwrap();
    /// assert_eq!(config.max_depth, 8);
    /// assert!(config.verify_lengths);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_depth: self.max_depth,
            verify_lengths: self.verify_lengths,
        }
    }
}

/// Builder for configuring and creating a SLIM client.
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Replace all settings at once.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum response nesting depth.
    ///
    /// Default: 64
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Enable or disable length verification while decoding.
    ///
    /// Default: true
    pub fn verify_lengths(mut self, verify: bool) -> Self {
        self.config.verify_lengths = verify;
        self
    }

    /// Set the largest accepted response length.
    ///
    /// Default: 999999
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.config.max_response_size = size;
        self
    }

    /// Set the socket read chunk size.
    ///
    /// Default: 64KB
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Build a client over an already-connected stream.
    pub fn build<S>(self, stream: S) -> Client<S>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        Client::new(stream, self.config)
    }

    /// Connect to a SLIM server over TCP and build a client.
    pub async fn connect<A: ToSocketAddrs>(self, addr: A) -> Result<Client<SlimStream>> {
        let stream = connect(addr).await?;
        Ok(self.build(stream))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A SLIM session over a duplex byte stream.
///
/// One request is in flight at a time; `&mut self` enforces it.
pub struct Client<S> {
    stream: S,
    buffer: ResponseBuffer,
    config: ClientConfig,
}

impl Client<SlimStream> {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn new(stream: S, config: ClientConfig) -> Self {
        Self {
            stream,
            buffer: ResponseBuffer::with_capacity_and_max_response(
                config.read_buffer_size,
                config.max_response_size,
            ),
            config,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a batch and return each instruction paired with its answer, in
    /// instruction order.
    ///
    /// # Errors
    ///
    /// - `EncodingOverflow` if the batch is too large; nothing is written.
    /// - `Io` / `ConnectionClosed` on stream failure.
    /// - `Parse` if the response is malformed.
    /// - `Protocol` / `CorrelationMiss` if the answers don't cover the batch.
    pub async fn execute(
        &mut self,
        instructions: Vec<Instruction>,
    ) -> Result<Vec<(Instruction, Answer)>> {
        let request = encode(&instructions)?;

        tracing::debug!(
            instructions = instructions.len(),
            bytes = request.len(),
            "Sending instruction batch"
        );
        self.stream.write_all(request.as_bytes()).await?;
        self.stream.flush().await?;

        let response = self.read_response().await?;
        tracing::debug!(bytes = response.len(), "Received response");

        let answers = decode_nested_value_with(&response, &self.config.decode_options())?;
        match_instructions_to_answers(instructions, answers)
    }

    /// Send a batch built with [`InstructionBatch`].
    pub async fn execute_batch(
        &mut self,
        batch: InstructionBatch,
    ) -> Result<Vec<(Instruction, Answer)>> {
        self.execute(batch.into_instructions()).await
    }

    /// End the session: send `bye` and shut down the write half.
    pub async fn bye(mut self) -> Result<()> {
        let request = encode(BYE)?;
        tracing::debug!("Sending bye");
        self.stream.write_all(request.as_bytes()).await?;
        self.stream.flush().await?;
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Consume the client and return the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Read until one complete response is buffered.
    async fn read_response(&mut self) -> Result<bytes::Bytes> {
        if let Some(response) = self.buffer.next_response()? {
            return Ok(response);
        }

        let mut chunk = vec![0u8; self.config.read_buffer_size.max(1)];
        loop {
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::warn!(
                        buffered = self.buffer.len(),
                        "Connection closed mid-response"
                    );
                }
                return Err(SlimError::ConnectionClosed);
            }

            if let Some(response) = self.buffer.push(&chunk[..n])? {
                return Ok(response);
            }
        }
    }
}
