//! Newline framing over a byte stream.
//!
//! The codec keeps whatever follows the last newline of a chunk and
//! completes it with the next one, so frames come out the same however
//! the stream was split.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::config::MAX_FRAME_LEN;
use crate::protocol::ClientFrame;

/// Fatal conditions met while framing the incoming stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A zero-length read: the peer closed the connection.
    PeerClosed,
    /// No newline within `max` buffered bytes.
    FrameTooLong { max: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::PeerClosed => write!(f, "Connection closed by peer"),
            CodecError::FrameTooLong { max } => {
                write!(f, "Frame exceeds {} bytes without a line terminator", max)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameCodec {
    buf: Vec<u8>,
    max_frame_len: usize,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self::with_max_frame_len(MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_frame_len,
        }
    }

    /// Append `chunk` and return every frame it completes, in order.
    ///
    /// Blank lines are dropped and a `\r` before the newline is stripped.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, CodecError> {
        if chunk.is_empty() {
            return Err(CodecError::PeerClosed);
        }
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buf[start..].iter().position(|b| *b == b'\n') {
            let end = start + pos;
            let mut line = &self.buf[start..end];
            if let [rest @ .., b'\r'] = line {
                line = rest;
            }
            if !line.is_empty() {
                frames.push(String::from_utf8_lossy(line).into_owned());
            }
            start = end + 1;
        }
        self.buf.drain(..start);

        if self.buf.len() > self.max_frame_len {
            return Err(CodecError::FrameTooLong {
                max: self.max_frame_len,
            });
        }
        Ok(frames)
    }

    /// Bytes received after the last complete frame.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn encode(frame: &ClientFrame) -> Vec<u8> {
        frame.encode().into_bytes()
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}
