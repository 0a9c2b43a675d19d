//! # slim-client
//!
//! Rust client for the SLIM protocol, the length-prefixed text RPC used by
//! FitNesse to drive remote test fixtures.
//!
//! This crate sends batches of instructions (`import`, `make`, `call`,
//! `callAndAssign`) to an already-running SLIM server and matches the
//! returned answers back to them by id.
//!
//! ## Architecture
//!
//! - **Codec** (pure): `NestedValue` / `Instruction` to wire text and back
//! - **Protocol**: data model, sentinels, answer correlation
//! - **Session** (tokio): writes a batch, reads one response, decodes it
//!
//! ## Example
//!
//! ```ignore
//! use slim_client::{Client, InstructionBatch};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut client = Client::builder()
//!         .connect("127.0.0.1:8085")
//!         .await
//!         .unwrap();
//!
//!     let mut batch = InstructionBatch::new();
//!     batch.import("fitnesse.slim.test");
//!     let results = client.execute_batch(batch).await.unwrap();
//!     assert!(!results[0].1.is_exception());
//! }
//! ```
//!
//! A complete runnable session lives in `demos/fraction.rs`, registered as the
//! `fraction` example (`cargo run --example fraction -- 127.0.0.1:8085`).

pub mod codec;
pub mod error;
pub mod protocol;
pub mod transport;

mod client;

pub use client::{Client, ClientBuilder, ClientConfig, DEFAULT_READ_BUFFER_SIZE};
pub use error::{ParseFailure, SlimError};
pub use protocol::{Answer, Instruction, InstructionBatch, NestedValue};
