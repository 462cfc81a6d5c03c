#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod board;
pub mod codec;
pub mod command;
mod common;
mod config;
pub mod controller;
mod game;
pub mod protocol;
mod ship;
#[cfg(feature = "std")]
pub mod input;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session_loop;
#[cfg(feature = "std")]
pub mod shutdown;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use board::*;
pub use codec::{CodecError, FrameCodec};
pub use command::{InputError, LocalCommand};
pub use common::*;
pub use config::*;
pub use controller::{InputRequest, Notice, Output, TurnController};
pub use game::*;
pub use protocol::{ClientFrame, FrameError, ServerFrame, ShotReport};
pub use ship::*;
#[cfg(feature = "std")]
pub use input::{InputSource, ScriptedInput, StdinInput};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use session_loop::{SessionEnd, SessionLoop};
#[cfg(feature = "std")]
pub use shutdown::ShutdownToken;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
