//! Line protocol spoken with the game server.
//!
//! Every frame is one line: an uppercase tag, `|`, and a payload whose
//! fields are split by `|` or `,` depending on the tag. Shots are the one
//! exception and travel as a bare `row,col`.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
};

use crate::common::{Coord, Orientation, ShotOutcome};
use crate::ship::ShipRequest;

pub const TAG_LOGIN: &str = "LOGIN";
pub const TAG_PLACE_SHIP: &str = "PLACE_SHIP";
pub const TAG_SHIP_POS: &str = "SHIP_POS";
pub const TAG_YOUR_TURN: &str = "YOUR_TURN";
pub const TAG_WAIT_TURN: &str = "WAIT_TURN";
pub const TAG_RESULT: &str = "RESULT";
pub const TAG_ENEMY_HIT: &str = "ENEMY_HIT";
pub const TAG_TURN_END: &str = "TURN_END";
pub const TAG_GAME_OVER: &str = "GAME_OVER";
pub const TAG_ERROR: &str = "ERROR";
pub const TAG_QUIT: &str = "QUIT";

/// Payload of `RESULT` acknowledging a placement rather than a shot.
const SHIP_PLACED: &str = "SHIP_PLACED";

/// What a RESULT frame reports about our last shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotReport {
    /// Outcome only; it refers to the last shot we sent.
    Outcome(ShotOutcome),
    /// Outcome with the coordinate the server resolved.
    At(Coord, ShotOutcome),
    /// The server accepted a SHIP_POS.
    ShipPlaced,
}

/// Frames received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    LoginOk,
    /// `LOGIN|<anything but OK>`.
    LoginRejected(String),
    PlaceShip(ShipRequest),
    YourTurn(String),
    WaitTurn(String),
    Result(ShotReport),
    EnemyHit(Coord),
    TurnEnd(String),
    GameOver(String),
    Error(String),
    /// Informational tags (`WAITING`, `GAME_START`, `READY`).
    Info { tag: String, note: String },
}

/// Frames the client sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFrame {
    Login { name: String, email: Option<String> },
    ShipPos { at: Coord, orientation: Orientation },
    Shot(Coord),
    Quit,
}

/// Reasons a received line could not be turned into a [`ServerFrame`].
/// None of them are fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Tag not known to this client; carries the raw line.
    UnknownTag(String),
    /// Known tag with a payload that does not fit its schema.
    Malformed { tag: String, raw: String },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnknownTag(raw) => write!(f, "unrecognized frame: {}", raw),
            FrameError::Malformed { tag, raw } => {
                write!(f, "malformed {} frame: {}", tag, raw)
            }
        }
    }
}

/// Split a line into its tag and raw payload.
pub fn split_tag(line: &str) -> (&str, &str) {
    line.split_once('|').unwrap_or((line, ""))
}

impl ServerFrame {
    /// Decode one frame (without its newline).
    pub fn decode(line: &str) -> Result<Self, FrameError> {
        let (tag, payload) = split_tag(line);
        let malformed = || FrameError::Malformed {
            tag: tag.to_string(),
            raw: line.to_string(),
        };
        let frame = match tag {
            TAG_LOGIN if payload == "OK" => ServerFrame::LoginOk,
            TAG_LOGIN => ServerFrame::LoginRejected(payload.to_string()),
            TAG_PLACE_SHIP => {
                let (name, size) = payload.split_once('|').ok_or_else(malformed)?;
                let size: usize = size.trim().parse().map_err(|_| malformed())?;
                if name.is_empty() || size == 0 {
                    return Err(malformed());
                }
                ServerFrame::PlaceShip(ShipRequest::new(name, size))
            }
            TAG_YOUR_TURN | "TURN" => ServerFrame::YourTurn(payload.to_string()),
            TAG_WAIT_TURN => ServerFrame::WaitTurn(payload.to_string()),
            TAG_RESULT => ServerFrame::Result(parse_report(payload).ok_or_else(malformed)?),
            TAG_ENEMY_HIT => ServerFrame::EnemyHit(Coord::parse(payload).ok_or_else(malformed)?),
            TAG_TURN_END => ServerFrame::TurnEnd(payload.to_string()),
            TAG_GAME_OVER => ServerFrame::GameOver(payload.to_string()),
            "VICTORY" | "DEFEAT" => ServerFrame::GameOver(format!("{}: {}", tag, payload)),
            TAG_ERROR => ServerFrame::Error(payload.to_string()),
            "WAITING" | "GAME_START" | "READY" => ServerFrame::Info {
                tag: tag.to_string(),
                note: payload.to_string(),
            },
            _ => return Err(FrameError::UnknownTag(line.to_string())),
        };
        Ok(frame)
    }
}

fn parse_report(payload: &str) -> Option<ShotReport> {
    if payload.trim() == SHIP_PLACED {
        return Some(ShotReport::ShipPlaced);
    }
    match payload.rsplit_once(',') {
        Some((coord, outcome)) => Some(ShotReport::At(
            Coord::parse(coord)?,
            ShotOutcome::parse(outcome)?,
        )),
        None => ShotOutcome::parse(payload).map(ShotReport::Outcome),
    }
}

impl ClientFrame {
    /// Encode as a full line, newline included.
    pub fn encode(&self) -> String {
        match self {
            ClientFrame::Login { name, email: None } => encode_tagged(TAG_LOGIN, name),
            ClientFrame::Login {
                name,
                email: Some(email),
            } => encode_tagged(TAG_LOGIN, &format!("{}|{}", name, email)),
            ClientFrame::ShipPos { at, orientation } => {
                encode_tagged(TAG_SHIP_POS, &format!("{},{}", at, orientation.letter()))
            }
            ClientFrame::Shot(at) => format!("{}\n", at),
            ClientFrame::Quit => encode_tagged(TAG_QUIT, ""),
        }
    }
}

/// `tag|payload\n`
pub fn encode_tagged(tag: &str, payload: &str) -> String {
    format!("{}|{}\n", tag, payload)
}

impl fmt::Display for ClientFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode().trim_end())
    }
}
