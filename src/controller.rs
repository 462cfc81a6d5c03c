//! Client turn state machine.
//!
//! The controller is driven by two kinds of events: decoded server frames
//! and lines of local input. Each event returns the frames to send and the
//! notices to show; the controller itself performs no I/O, so the session
//! loop decides how those reach the wire and the screen.

use core::fmt;
use rand::{rngs::SmallRng, SeedableRng};

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec, vec::Vec};

use crate::{
    command::{parse_placement, parse_turn, InputError, LocalCommand},
    common::{Cell, Coord, Orientation, ShotOutcome},
    config::ClientConfig,
    game::{Session, ShotMismatch, TurnState},
    protocol::{ClientFrame, FrameError, ServerFrame, ShotReport},
    ship::ShipRequest,
};

/// Local input the controller is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRequest {
    Placement(ShipRequest),
    Shot,
}

/// Something the player should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoggedIn,
    PlacementRequested(ShipRequest),
    ShipPlaced {
        ship: ShipRequest,
        at: Coord,
        orientation: Orientation,
        random: bool,
    },
    PlacementConfirmed,
    PlacementComplete,
    YourTurn(String),
    WaitTurn(String),
    ShotFired(Coord),
    ShotResolved { at: Coord, outcome: ShotOutcome },
    IncomingHit { at: Coord, ship: Option<String> },
    TurnEnded(String),
    Surrendered,
    GameOver(String),
    ServerError(String),
    Info { tag: String, note: String },
    /// A frame that makes no sense in the current state. Nothing changed.
    Inconsistent(String),
    BadFrame(FrameError),
}

impl Notice {
    /// Protocol problems are logged as warnings; everything else is game news.
    pub fn is_protocol_problem(&self) -> bool {
        matches!(
            self,
            Notice::Inconsistent(_) | Notice::BadFrame(_) | Notice::ServerError(_)
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoggedIn => write!(f, "Login accepted, waiting for the game to start"),
            Notice::PlacementRequested(ship) => write!(f, "Place your {}", ship),
            Notice::ShipPlaced {
                ship,
                at,
                orientation,
                random,
            } => write!(
                f,
                "{} placed at {} {}{}",
                ship.name,
                at,
                orientation.letter(),
                if *random { " (random)" } else { "" }
            ),
            Notice::PlacementConfirmed => write!(f, "Server accepted the placement"),
            Notice::PlacementComplete => write!(f, "All ships placed"),
            Notice::YourTurn(note) => write!(f, "--- YOUR TURN --- {}", note),
            Notice::WaitTurn(note) => write!(f, "Waiting for the opponent... {}", note),
            Notice::ShotFired(at) => write!(f, "Fired at {}", at),
            Notice::ShotResolved { at, outcome } => write!(f, "Shot at {}: {}", at, outcome),
            Notice::IncomingHit { at, ship: Some(name) } => {
                write!(f, "Enemy hit your {} at {}", name, at)
            }
            Notice::IncomingHit { at, ship: None } => write!(f, "Enemy hit {}", at),
            Notice::TurnEnded(note) => write!(f, "Your turn is over: {}", note),
            Notice::Surrendered => write!(f, "You surrendered"),
            Notice::GameOver(summary) => write!(f, "Game over! {}", summary),
            Notice::ServerError(message) => write!(f, "Server error: {}", message),
            Notice::Info { tag, note } => write!(f, "{} {}", tag, note),
            Notice::Inconsistent(what) => write!(f, "Protocol inconsistency: {}", what),
            Notice::BadFrame(e) => write!(f, "{}", e),
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Send(ClientFrame),
    Notify(Notice),
}

pub struct TurnController {
    session: Session,
    expect_placement: bool,
    fleet_size: Option<usize>,
    email: Option<String>,
    rng: SmallRng,
}

impl TurnController {
    pub fn new(config: &ClientConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            #[cfg(feature = "std")]
            None => SmallRng::from_rng(&mut rand::rng()),
            #[cfg(not(feature = "std"))]
            None => SmallRng::seed_from_u64(0),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &ClientConfig, rng: SmallRng) -> Self {
        Self {
            session: Session::new(config.player_name.clone()),
            expect_placement: config.expect_placement,
            fleet_size: config.fleet_size,
            email: config.email.clone(),
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> TurnState {
        self.session.state()
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// The LOGIN frame that opens the handshake.
    pub fn login_frame(&self) -> ClientFrame {
        ClientFrame::Login {
            name: self.session.player_name().into(),
            email: self.email.clone(),
        }
    }

    /// What local input, if any, the controller is waiting for.
    pub fn input_request(&self) -> Option<InputRequest> {
        match self.session.state() {
            TurnState::PlacingShips => self
                .session
                .pending_ship()
                .cloned()
                .map(InputRequest::Placement),
            TurnState::MyTurn => Some(InputRequest::Shot),
            _ => None,
        }
    }

    /// Dispatch one decoded server frame.
    pub fn handle_frame(&mut self, frame: ServerFrame) -> Vec<Output> {
        if self.session.is_over() {
            log::debug!("ignoring {:?} after game over", frame);
            return Vec::new();
        }
        let state = self.session.state();
        let mut out = Vec::new();
        match frame {
            ServerFrame::LoginOk if state == TurnState::AwaitingLogin => {
                let next = if self.expect_placement {
                    TurnState::PlacingShips
                } else {
                    TurnState::AwaitingOpponentTurn
                };
                self.session.set_state(next);
                out.push(Output::Notify(Notice::LoggedIn));
            }
            ServerFrame::LoginOk => inconsistent(&mut out, "LOGIN|OK after login"),
            ServerFrame::LoginRejected(reason) => {
                inconsistent(&mut out, &format!("LOGIN|{} outside the handshake", reason))
            }
            ServerFrame::PlaceShip(ship) if state == TurnState::PlacingShips => {
                if let Some(previous) = self.session.set_pending_ship(Some(ship.clone())) {
                    log::warn!("placement of {} replaced by {}", previous, ship);
                }
                out.push(Output::Notify(Notice::PlacementRequested(ship)));
            }
            ServerFrame::PlaceShip(ship) => inconsistent(
                &mut out,
                &format!("placement request for {} in state {:?}", ship, state),
            ),
            ServerFrame::YourTurn(note) => {
                self.finish_placement(&mut out);
                self.session.set_state(TurnState::MyTurn);
                out.push(Output::Notify(Notice::YourTurn(note)));
            }
            ServerFrame::WaitTurn(note) => match state {
                TurnState::AwaitingLogin => {
                    inconsistent(&mut out, "WAIT_TURN before login")
                }
                TurnState::PlacingShips => {
                    self.finish_placement(&mut out);
                    out.push(Output::Notify(Notice::WaitTurn(note)));
                }
                _ => {
                    self.session.set_state(TurnState::AwaitingOpponentTurn);
                    out.push(Output::Notify(Notice::WaitTurn(note)));
                }
            },
            ServerFrame::Result(ShotReport::ShipPlaced) => {
                if state == TurnState::PlacingShips || self.session.ships_placed() > 0 {
                    out.push(Output::Notify(Notice::PlacementConfirmed));
                } else {
                    inconsistent(&mut out, "placement acknowledged but nothing was placed");
                }
            }
            ServerFrame::Result(ShotReport::Outcome(outcome)) => {
                self.resolve_shot(&mut out, state, None, outcome)
            }
            ServerFrame::Result(ShotReport::At(at, outcome)) => {
                self.resolve_shot(&mut out, state, Some(at), outcome)
            }
            ServerFrame::EnemyHit(at) => {
                let ship = self
                    .session
                    .own_board_mut()
                    .record_incoming_hit(at)
                    .map(|s| String::from(s.name()));
                out.push(Output::Notify(Notice::IncomingHit { at, ship }));
            }
            ServerFrame::TurnEnd(note) if state == TurnState::MyTurn => {
                self.session.set_state(TurnState::AwaitingOpponentTurn);
                out.push(Output::Notify(Notice::TurnEnded(note)));
            }
            ServerFrame::TurnEnd(note) => inconsistent(
                &mut out,
                &format!("TURN_END|{} in state {:?}", note, state),
            ),
            ServerFrame::GameOver(summary) => {
                self.session.finish(summary.clone());
                out.push(Output::Notify(Notice::GameOver(summary)));
            }
            ServerFrame::Error(message) => out.push(Output::Notify(Notice::ServerError(message))),
            ServerFrame::Info { tag, note } => out.push(Output::Notify(Notice::Info { tag, note })),
        }
        out
    }

    /// Report a line that did not decode. The state never changes.
    pub fn handle_frame_error(&mut self, err: FrameError) -> Vec<Output> {
        vec![Output::Notify(Notice::BadFrame(err))]
    }

    /// Feed one line of local input to whatever request is pending.
    pub fn handle_input(&mut self, line: &str) -> Result<Vec<Output>, InputError> {
        match self.input_request() {
            Some(InputRequest::Placement(ship)) => {
                let command = parse_placement(line)?;
                self.place(ship, command)
            }
            Some(InputRequest::Shot) => match parse_turn(line)? {
                LocalCommand::Surrender => Ok(self.surrender()),
                LocalCommand::Shoot(at) => self.shoot(at),
                _ => Err(InputError::NotExpected),
            },
            None => Err(InputError::NotExpected),
        }
    }

    /// Leave the game voluntarily: send QUIT and stop.
    pub fn surrender(&mut self) -> Vec<Output> {
        if self.session.is_over() {
            return Vec::new();
        }
        self.session.finish(String::from("QUIT"));
        vec![
            Output::Send(ClientFrame::Quit),
            Output::Notify(Notice::Surrendered),
        ]
    }

    fn place(&mut self, ship: ShipRequest, command: LocalCommand) -> Result<Vec<Output>, InputError> {
        let (at, orientation, random) = match command {
            LocalCommand::Place { at, orientation } => (at, orientation, false),
            LocalCommand::PlaceRandom => {
                let (at, orientation) = self
                    .session
                    .own_board()
                    .random_placement(&mut self.rng, ship.size)
                    .map_err(InputError::Placement)?;
                (at, orientation, true)
            }
            _ => return Err(InputError::NotExpected),
        };
        self.session
            .own_board_mut()
            .try_place_ship(
                &ship.name,
                ship.size,
                at.row as usize,
                at.col as usize,
                orientation,
            )
            .map_err(InputError::Placement)?;
        self.session.ship_placed();
        log::info!("placed {} at {} {}", ship, at, orientation.letter());

        let mut out = vec![
            Output::Send(ClientFrame::ShipPos { at, orientation }),
            Output::Notify(Notice::ShipPlaced {
                ship,
                at,
                orientation,
                random,
            }),
        ];
        if self
            .fleet_size
            .is_some_and(|n| self.session.ships_placed() >= n)
        {
            self.finish_placement(&mut out);
        }
        Ok(out)
    }

    fn shoot(&mut self, at: Coord) -> Result<Vec<Output>, InputError> {
        if self.session.opponent_view().cell(at) != Cell::Water {
            return Err(InputError::AlreadyTargeted(at));
        }
        self.session.shot_fired(at);
        log::info!("firing at {}", at);
        Ok(vec![
            Output::Send(ClientFrame::Shot(at)),
            Output::Notify(Notice::ShotFired(at)),
        ])
    }

    fn resolve_shot(
        &mut self,
        out: &mut Vec<Output>,
        state: TurnState,
        reported: Option<Coord>,
        outcome: ShotOutcome,
    ) {
        if !matches!(state, TurnState::AwaitingOpponentTurn | TurnState::MyTurn) {
            inconsistent(out, &format!("RESULT|{} in state {:?}", outcome, state));
            return;
        }
        match self.session.resolve_shot(reported, outcome) {
            Ok(at) => out.push(Output::Notify(Notice::ShotResolved { at, outcome })),
            Err(ShotMismatch::NoShotOutstanding) => {
                inconsistent(out, &format!("RESULT|{} with no shot outstanding", outcome))
            }
            Err(ShotMismatch::WrongCoord { fired, reported }) => inconsistent(
                out,
                &format!("RESULT for {} but the last shot was {}", reported, fired),
            ),
        }
    }

    /// Leave PlacingShips for AwaitingOpponentTurn. No-op in any other state.
    fn finish_placement(&mut self, out: &mut Vec<Output>) {
        if self.session.state() != TurnState::PlacingShips {
            return;
        }
        if let Some(abandoned) = self.session.set_pending_ship(None) {
            inconsistent(out, &format!("placement of {} abandoned", abandoned));
        }
        self.session.set_state(TurnState::AwaitingOpponentTurn);
        out.push(Output::Notify(Notice::PlacementComplete));
    }
}

fn inconsistent(out: &mut Vec<Output>, what: &str) {
    out.push(Output::Notify(Notice::Inconsistent(String::from(what))));
}
