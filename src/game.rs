//! Session state owned by the turn controller.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::{
    board::Board,
    common::{Coord, ShotOutcome},
    ship::ShipRequest,
};

/// States of the client turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingLogin,
    PlacingShips,
    AwaitingOpponentTurn,
    MyTurn,
    GameOver,
}

/// A RESULT that could not be applied to the opponent view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotMismatch {
    /// No shot is waiting for its result.
    NoShotOutstanding,
    /// The server resolved a different cell than the one we fired at.
    WrongCoord { fired: Coord, reported: Coord },
}

/// Everything the client knows about the game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    player_name: String,
    own: Board,
    opponent: Board,
    my_turn: bool,
    last_shot: Option<Coord>,
    state: TurnState,
    pending_ship: Option<ShipRequest>,
    ships_placed: usize,
    summary: Option<String>,
}

impl Session {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            own: Board::new(),
            opponent: Board::new(),
            my_turn: false,
            last_shot: None,
            state: TurnState::AwaitingLogin,
            pending_ship: None,
            ships_placed: 0,
            summary: None,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn own_board(&self) -> &Board {
        &self.own
    }

    pub fn opponent_view(&self) -> &Board {
        &self.opponent
    }

    pub fn my_turn(&self) -> bool {
        self.my_turn
    }

    pub fn last_shot(&self) -> Option<Coord> {
        self.last_shot
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn pending_ship(&self) -> Option<&ShipRequest> {
        self.pending_ship.as_ref()
    }

    pub fn ships_placed(&self) -> usize {
        self.ships_placed
    }

    /// Summary from the server's GAME_OVER, once received.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn is_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    pub(crate) fn own_board_mut(&mut self) -> &mut Board {
        &mut self.own
    }

    pub(crate) fn set_state(&mut self, state: TurnState) {
        self.state = state;
        self.my_turn = state == TurnState::MyTurn;
    }

    pub(crate) fn set_pending_ship(&mut self, ship: Option<ShipRequest>) -> Option<ShipRequest> {
        core::mem::replace(&mut self.pending_ship, ship)
    }

    pub(crate) fn ship_placed(&mut self) {
        self.pending_ship = None;
        self.ships_placed += 1;
    }

    pub(crate) fn shot_fired(&mut self, at: Coord) {
        self.last_shot = Some(at);
        self.set_state(TurnState::AwaitingOpponentTurn);
    }

    /// Apply a RESULT to the opponent view. `reported` is the coordinate the
    /// server named, when it named one; it must match the shot we sent.
    pub(crate) fn resolve_shot(
        &mut self,
        reported: Option<Coord>,
        outcome: ShotOutcome,
    ) -> Result<Coord, ShotMismatch> {
        let fired = self.last_shot.ok_or(ShotMismatch::NoShotOutstanding)?;
        if let Some(reported) = reported {
            if reported != fired {
                return Err(ShotMismatch::WrongCoord { fired, reported });
            }
        }
        self.opponent.record_shot_outcome(fired, outcome);
        self.last_shot = None;
        Ok(fired)
    }

    pub(crate) fn finish(&mut self, summary: String) {
        self.set_state(TurnState::GameOver);
        self.pending_ship = None;
        self.summary = Some(summary);
    }
}
