//! Transport module - connection to a running SLIM server.
//!
//! Provides a TCP connector. The session itself works over any
//! `AsyncRead + AsyncWrite` stream, so other transports can be injected.

mod tcp;

pub use tcp::{connect, SlimStream};
