use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_SEND_TIMEOUT};
use crate::transport::Transport;

pub struct TcpTransport {
    stream: TcpStream,
    send_timeout: Duration,
    closed: bool,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_SEND_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, send_timeout: Duration) -> Self {
        // Frames are small and interactive; don't let Nagle hold them back.
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("could not disable Nagle: {}", e);
        }
        Self {
            stream,
            send_timeout,
            closed: false,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Self::connect_timeout(addr, DEFAULT_CONNECT_TIMEOUT).await
    }

    pub async fn connect_timeout<A: ToSocketAddrs>(
        addr: A,
        connect_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let stream = timeout(connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", connect_timeout))?
            .map_err(|e| anyhow::anyhow!("Connect error: {}", e))?;
        Ok(Self::new(stream))
    }
}

fn closed_or(e: std::io::Error, what: &str) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("{} error: {}", what, e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        let send_timeout = self.send_timeout;
        let stream = &mut self.stream;
        let send_op = async move {
            stream
                .write_all(bytes)
                .await
                .map_err(|e| closed_or(e, "Write"))?;
            stream.flush().await.map_err(|e| closed_or(e, "Write"))
        };
        timeout(send_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", send_timeout))?
    }

    async fn recv(&mut self, buf: &mut [u8]) -> anyhow::Result<usize> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        match self.stream.read(buf).await {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => Ok(0),
            Err(e) => Err(anyhow::anyhow!("Read error: {}", e)),
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream
            .shutdown()
            .await
            .map_err(|e| anyhow::anyhow!("Shutdown error: {}", e))
    }
}
