//! Byte-stream transports carrying the line protocol.
//!
//! A transport moves raw bytes only; framing is the job of
//! [`FrameCodec`](crate::codec::FrameCodec).

#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write all of `bytes`.
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()>;

    /// Read the next chunk into `buf`. `Ok(0)` means the peer closed the connection.
    ///
    /// Must be cancel safe: the session loop races it against local input.
    async fn recv(&mut self, buf: &mut [u8]) -> anyhow::Result<usize>;

    /// Close the connection. Later sends fail.
    async fn close(&mut self) -> anyhow::Result<()>;
}

pub mod in_memory;
pub mod tcp;
