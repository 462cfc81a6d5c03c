use tokio::sync::mpsc;

use crate::transport::Transport;

/// One end of an in-process byte pipe. Useful for tests and for driving a
/// session from a scripted peer.
pub struct InMemoryTransport {
    tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
    leftover: Vec<u8>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        (
            Self {
                tx: Some(tx1),
                rx: rx2,
                leftover: Vec::new(),
            },
            Self {
                tx: Some(tx2),
                rx: rx1,
                leftover: Vec::new(),
            },
        )
    }

    fn take_leftover(&mut self, buf: &mut [u8]) -> usize {
        let n = self.leftover.len().min(buf.len());
        buf[..n].copy_from_slice(&self.leftover[..n]);
        self.leftover.drain(..n);
        n
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        if bytes.is_empty() {
            return Ok(());
        }
        tx.send(bytes.to_vec())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    async fn recv(&mut self, buf: &mut [u8]) -> anyhow::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if !self.leftover.is_empty() {
                return Ok(self.take_leftover(buf));
            }
            match self.rx.recv().await {
                Some(chunk) => self.leftover = chunk,
                None => return Ok(0),
            }
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.tx = None;
        self.rx.close();
        Ok(())
    }
}
