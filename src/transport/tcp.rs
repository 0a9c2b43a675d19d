//! TCP stream to a SLIM server.
//!
//! # Example
//!
//! ```ignore
//! use slim_client::transport::connect;
//!
//! let stream = connect("127.0.0.1:8085").await?;
//! println!("connected to {}", stream.peer_addr()?);
//! ```

use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::error::Result;

/// Connected TCP stream to a SLIM server.
pub struct SlimStream {
    stream: TcpStream,
}

/// Connect to a SLIM server.
///
/// Disables Nagle's algorithm: requests are written in one piece and the
/// client then waits for the reply.
pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<SlimStream> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;
    Ok(SlimStream { stream })
}

impl SlimStream {
    /// Wrap an already-connected stream.
    pub fn from_tcp(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Address of the server.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    /// Get a reference to the underlying stream.
    pub fn inner(&self) -> &TcpStream {
        &self.stream
    }

    /// Consume into the underlying stream.
    pub fn into_inner(self) -> TcpStream {
        self.stream
    }
}

impl AsyncRead for SlimStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_read(cx, buf)
    }
}

impl AsyncWrite for SlimStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.stream).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_shutdown(cx)
    }
}
