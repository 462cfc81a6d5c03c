use core::time::Duration;

#[cfg(not(feature = "std"))]
use alloc::string::String;

pub const BOARD_SIZE: u8 = 10;

/// Longest unterminated frame the codec will buffer before giving up on the peer.
pub const MAX_FRAME_LEN: usize = 1024;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;

/// How often a pending input wait wakes up to re-check the connection and shutdown token.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the best-effort QUIT + close performed on interrupt.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Attempts made by `Board::random_placement` before giving up.
pub const RANDOM_PLACEMENT_ATTEMPTS: usize = 100;

// Board symbols used in renders and the log file.
pub const WATER_SYMBOL: char = '~';
pub const SHIP_SYMBOL: char = 'O';
pub const HIT_SYMBOL: char = 'X';
pub const SUNK_SYMBOL: char = '#';
pub const MISS_SYMBOL: char = 'A';

/// Runtime options for a client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub player_name: String,
    pub email: Option<String>,
    /// Whether the server sends PLACE_SHIP requests after login.
    pub expect_placement: bool,
    /// Number of ships the server will ask for, when known.
    pub fleet_size: Option<usize>,
    /// Watch the connection while waiting for local input.
    pub multiplex_input: bool,
    pub poll_interval: Duration,
    pub login_timeout: Duration,
    pub seed: Option<u64>,
}

impl ClientConfig {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            email: None,
            expect_placement: true,
            fleet_size: None,
            multiplex_input: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
            seed: None,
        }
    }
}

/// Check a player name can travel inside a LOGIN frame.
pub fn valid_player_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(|c: char| matches!(c, '|' | ',' | '\n' | '\r'))
}
